//! Interactivity for a single-page portfolio: the contact form engine, the
//! navigation state and the event loop that drives them.

pub mod config;
pub mod error;
pub mod events;
pub mod form;
pub mod navigation;
pub mod ui;
pub mod util;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, Result, SubmissionError};
pub use events::SiteEvent;
pub use form::{
    ContactMessage, FieldState, FormState, FormValidationEngine, SimulatedTransport,
    SubmissionOutcome, SubmissionState, SubmissionTransport,
};
pub use navigation::{Navigation, Section};
pub use ui::{FormUi, JsonLinesUi, NavSignal, NavigationUi, RecordingUi, UiSignal};
pub use validation::{FieldName, ValidationResult, Validity};

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// The contact form and the navigation of one page.
#[derive(Clone)]
pub struct Site {
    pub form: FormValidationEngine,
    pub navigation: Navigation,
    in_flight: Arc<Mutex<Vec<JoinHandle<SubmissionOutcome>>>>,
}

impl Site {
    pub fn new<U>(config: &AppConfig, ui: Arc<U>) -> Self
    where
        U: FormUi + NavigationUi + 'static,
    {
        let transport = Arc::new(SimulatedTransport::new(config.transport.simulated_delay()));
        Self::with_transport(config, ui, transport)
    }

    pub fn with_transport<U>(
        config: &AppConfig,
        ui: Arc<U>,
        transport: Arc<dyn SubmissionTransport>,
    ) -> Self
    where
        U: FormUi + NavigationUi + 'static,
    {
        let form = FormValidationEngine::new(
            config.form.clone(),
            config.bindings.clone(),
            ui.clone(),
            transport,
        );
        let navigation = Navigation::new(&config.navigation, ui);

        Self {
            form,
            navigation,
            in_flight: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Routes one event. Submissions run in the background so later events
    /// are still handled while one is in flight.
    pub fn dispatch(&self, event: SiteEvent) -> Result<()> {
        debug!(?event, "Dispatching event");

        match event {
            SiteEvent::FieldBlur { field, value } => {
                let field: FieldName = field.parse()?;
                self.form.on_field_blur(field, &value);
            }
            SiteEvent::FieldInput { field, value } => {
                let field: FieldName = field.parse()?;
                self.form.on_field_input(field, &value);
            }
            SiteEvent::Submit => {
                let form = self.form.clone();
                let handle = tokio::spawn(async move { form.submit().await });
                let mut in_flight = self.in_flight.lock();
                in_flight.retain(|h| !h.is_finished());
                in_flight.push(handle);
            }
            SiteEvent::Reset => self.form.reset(),
            SiteEvent::Layout { sections } => self.navigation.set_layout(sections),
            SiteEvent::Scroll { y } => self.navigation.on_scroll(y),
            SiteEvent::HamburgerClick => self.navigation.on_hamburger_click(),
            SiteEvent::LinkClick { target } => self.navigation.on_link_click(&target),
            SiteEvent::OutsideClick => self.navigation.on_outside_click(),
            SiteEvent::KeyDown { key } => self.navigation.on_key_down(&key),
            SiteEvent::Resize { width } => self.navigation.on_resize(width),
            SiteEvent::LogoClick => self.navigation.on_logo_click(),
        }

        Ok(())
    }

    /// Waits for every submission started so far and returns their outcomes
    /// in dispatch order.
    pub async fn settle(&self) -> Result<Vec<SubmissionOutcome>> {
        let handles = std::mem::take(&mut *self.in_flight.lock());

        let mut outcomes = Vec::with_capacity(handles.len());
        for handle in handles {
            let outcome = handle
                .await
                .map_err(|e| anyhow::anyhow!("Submission task failed: {}", e))?;
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }
}

/// Reads newline-delimited JSON events until EOF or Ctrl+C. Malformed lines
/// are skipped; an event naming an unknown field ends the loop with an error.
///
/// At EOF the loop also lets a visible banner run out its display window, so
/// the submission lifecycle is back to Idle on return. A shutdown signal
/// skips that wait.
pub async fn run_site<R>(reader: R, site: Site) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let mut interrupted = false;
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Event stream closed");
                    break;
                };

                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match SiteEvent::from_json(line) {
                    Ok(event) => site.dispatch(event)?,
                    Err(e) => warn!("Skipping malformed event: {}", e),
                }
            }
            _ = &mut shutdown => {
                info!("Stopping event loop");
                interrupted = true;
                break;
            }
        }
    }

    let outcomes = site.settle().await?;
    info!("Event loop finished, {} submissions settled", outcomes.len());

    if !interrupted {
        tokio::select! {
            _ = site.form.banner_dismissed() => {}
            _ = &mut shutdown => info!("Stopping before banner dismissal"),
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
