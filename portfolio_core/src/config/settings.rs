use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::validation::FieldName;

pub const DEFAULT_CONFIG_FILE: &str = "portfolio.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub form: FormConfig,
    pub transport: TransportConfig,
    pub navigation: NavigationConfig,
    pub bindings: BindingsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    pub submit_label: String,
    pub busy_label: String,
    pub success_message: String,
    pub failure_message: String,
    pub notification_display_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    pub simulated_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Height of the fixed navbar subtracted from scroll targets.
    pub navbar_offset: f64,
    /// Added to the scroll position before looking up the active section.
    pub active_offset: f64,
    pub elevated_threshold: f64,
    pub mobile_breakpoint: u32,
    pub resize_debounce_ms: u64,
}

/// Presentation handle of one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBinding {
    pub input_id: String,
    pub error_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingsConfig {
    pub name: FieldBinding,
    pub email: FieldBinding,
    pub subject: FieldBinding,
    pub message: FieldBinding,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            form: FormConfig::default(),
            transport: TransportConfig::default(),
            navigation: NavigationConfig::default(),
            bindings: BindingsConfig::default(),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            submit_label: "Send Message".to_string(),
            busy_label: "Sending...".to_string(),
            success_message: "Thank you! Your message has been sent successfully.".to_string(),
            failure_message: "Sorry, there was an error sending your message. Please try again."
                .to_string(),
            notification_display_ms: 5000,
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            simulated_delay_ms: 2000,
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            navbar_offset: 80.0,
            active_offset: 100.0,
            elevated_threshold: 50.0,
            mobile_breakpoint: 600,
            resize_debounce_ms: 250,
        }
    }
}

impl FieldBinding {
    fn for_field(field: FieldName) -> Self {
        Self {
            input_id: field.as_str().to_string(),
            error_id: format!("{}-error", field.as_str()),
        }
    }
}

impl Default for BindingsConfig {
    fn default() -> Self {
        Self {
            name: FieldBinding::for_field(FieldName::Name),
            email: FieldBinding::for_field(FieldName::Email),
            subject: FieldBinding::for_field(FieldName::Subject),
            message: FieldBinding::for_field(FieldName::Message),
        }
    }
}

impl BindingsConfig {
    pub fn get(&self, field: FieldName) -> &FieldBinding {
        match field {
            FieldName::Name => &self.name,
            FieldName::Email => &self.email,
            FieldName::Subject => &self.subject,
            FieldName::Message => &self.message,
        }
    }
}

impl FormConfig {
    pub fn notification_display(&self) -> Duration {
        Duration::from_millis(self.notification_display_ms)
    }
}

impl TransportConfig {
    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }
}

impl NavigationConfig {
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Layers defaults, the given file (when it exists) and `PORTFOLIO_*`
    /// environment variables, e.g. `PORTFOLIO_FORM__SUBMIT_LABEL`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("PORTFOLIO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.form.notification_display_ms == 0 {
            return Err(ConfigError::Message(
                "Notification display time must be greater than 0".to_string(),
            ));
        }

        if self.form.submit_label.trim().is_empty() || self.form.busy_label.trim().is_empty() {
            return Err(ConfigError::Message(
                "Submit button labels cannot be empty".to_string(),
            ));
        }

        if self.navigation.mobile_breakpoint == 0 {
            return Err(ConfigError::Message(
                "Mobile breakpoint must be greater than 0".to_string(),
            ));
        }

        if self.navigation.resize_debounce_ms == 0 {
            return Err(ConfigError::Message(
                "Resize debounce must be greater than 0".to_string(),
            ));
        }

        for field in FieldName::ALL {
            let binding = self.bindings.get(field);
            if binding.input_id.is_empty() || binding.error_id.is_empty() {
                return Err(ConfigError::Message(format!(
                    "Binding for field '{}' needs both an input and an error id",
                    field
                )));
            }
        }

        if self.transport.simulated_delay_ms == 0 {
            tracing::warn!("Simulated submission delay is 0 - the busy state will not be visible");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.form.notification_display_ms, 5000);
        assert_eq!(config.transport.simulated_delay_ms, 2000);
        assert_eq!(config.navigation.mobile_breakpoint, 600);
        assert_eq!(config.bindings.email.input_id, "email");
        assert_eq!(config.bindings.email.error_id, "email-error");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        config.form.notification_display_ms = 0;
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.form.busy_label = "  ".to_string();
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.navigation.resize_debounce_ms = 0;
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.bindings.subject.error_id = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("missing.toml"))
            .expect("Should load default configuration");

        assert_eq!(config.form.submit_label, "Send Message");
        assert_eq!(config.navigation.navbar_offset, 80.0);
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "[form]\nsubmit_label = \"Send\"\nnotification_display_ms = 3000\n\n[bindings.name]\ninput_id = \"contact-name\"\nerror_id = \"contact-name-error\""
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).expect("Should load configuration file");

        assert_eq!(config.form.submit_label, "Send");
        assert_eq!(config.form.notification_display(), Duration::from_secs(3));
        assert_eq!(config.form.busy_label, "Sending...");
        assert_eq!(config.bindings.get(FieldName::Name).input_id, "contact-name");
        assert_eq!(config.bindings.get(FieldName::Email).input_id, "email");
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "[navigation]\nmobile_breakpoint = 0").unwrap();

        assert!(AppConfig::load_from(file.path()).is_err());
    }
}
