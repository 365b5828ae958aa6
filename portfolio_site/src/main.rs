//! Drives the portfolio page logic from JSON-lines events on stdin and
//! prints the resulting UI signals as JSON lines on stdout.

use anyhow::Result;
use portfolio_core::{run_site, AppConfig, JsonLinesUi, Site};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = match std::env::args_os().nth(1) {
        Some(path) => AppConfig::load_from(&PathBuf::from(path)),
        None => AppConfig::load(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    info!("Configuration loaded successfully");
    info!(
        "Simulated submission delay: {} ms, banner display: {} ms",
        config.transport.simulated_delay_ms, config.form.notification_display_ms
    );

    let ui = Arc::new(JsonLinesUi::new(std::io::stdout()));
    let site = Site::new(&config, ui);

    info!("Portfolio site v{} ready for events", env!("CARGO_PKG_VERSION"));

    run_site(BufReader::new(tokio::io::stdin()), site).await?;

    info!("Shutdown complete");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            let default_level = if cfg!(debug_assertions) {
                "debug"
            } else {
                "info"
            };

            format!(
                "{}={},portfolio_core={}",
                env!("CARGO_CRATE_NAME").replace('-', "_"),
                default_level,
                default_level
            ).into()
        });

    // stdout carries the UI signals, so logs go to stderr.
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let is_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .init();
    }
}
