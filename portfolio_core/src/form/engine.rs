//! Contact form validation and submission lifecycle

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{BindingsConfig, FormConfig};
use crate::error::{Result, SubmissionError};
use crate::ui::{FieldVisual, FormUi, NotificationKind, UiSignal};
use crate::validation::{self, FieldName, ValidationResult, Validity};

use super::notifier::BannerNotifier;
use super::state::{FieldState, FormState, SubmissionOutcome, SubmissionState};
use super::transport::SubmissionTransport;

#[derive(Debug, Default)]
struct EngineState {
    form: FormState,
    submission: SubmissionState,
}

/// Owns the four contact form fields and the submission lifecycle.
///
/// State sits behind a mutex that is never held across an await or while
/// signals are emitted.
#[derive(Clone)]
pub struct FormValidationEngine {
    state: Arc<Mutex<EngineState>>,
    ui: Arc<dyn FormUi>,
    transport: Arc<dyn SubmissionTransport>,
    notifier: BannerNotifier,
    bindings: BindingsConfig,
    config: FormConfig,
}

impl FormValidationEngine {
    pub fn new(
        config: FormConfig,
        bindings: BindingsConfig,
        ui: Arc<dyn FormUi>,
        transport: Arc<dyn SubmissionTransport>,
    ) -> Self {
        let notifier = BannerNotifier::new(ui.clone(), config.notification_display());

        Self {
            state: Arc::new(Mutex::new(EngineState::default())),
            ui,
            transport,
            notifier,
            bindings,
            config,
        }
    }

    /// Stores the trimmed value, applies the field's rule and refreshes the
    /// field's visual state and error text.
    pub fn validate_field(&self, field: FieldName, raw_value: &str) -> ValidationResult {
        let result = {
            let mut state = self.state.lock();
            let field_state = state.form.get_mut(field);
            field_state.set_value(raw_value);
            Self::evaluate(field_state)
        };

        self.emit_field(field, &result);
        result
    }

    /// String-keyed entry point for adapters; unknown names are an
    /// `InvalidArgument` error.
    pub fn validate_named_field(&self, name: &str, raw_value: &str) -> Result<ValidationResult> {
        let field: FieldName = name.parse()?;
        Ok(self.validate_field(field, raw_value))
    }

    pub fn on_field_blur(&self, field: FieldName, raw_value: &str) -> ValidationResult {
        self.validate_field(field, raw_value)
    }

    /// Stores the value and re-validates only a field currently marked invalid.
    pub fn on_field_input(&self, field: FieldName, raw_value: &str) -> Option<ValidationResult> {
        let result = {
            let mut state = self.state.lock();
            let field_state = state.form.get_mut(field);
            field_state.set_value(raw_value);

            if field_state.validity != Validity::Invalid {
                return None;
            }
            Self::evaluate(field_state)
        };

        self.emit_field(field, &result);
        Some(result)
    }

    /// Validates every field, without short-circuiting, so all error displays
    /// refresh together.
    pub fn validate_form(&self) -> bool {
        let results = {
            let mut state = self.state.lock();
            Self::evaluate_all(&mut state.form)
        };

        self.emit_all(&results)
    }

    /// Form reset request. Leaves the submission lifecycle alone.
    pub fn reset(&self) {
        self.state.lock().form.clear();
        self.emit_reset();
    }

    pub async fn submit(&self) -> SubmissionOutcome {
        let (results, message) = {
            let mut state = self.state.lock();

            if state.submission != SubmissionState::Idle {
                debug!("Submit ignored while {:?}", state.submission);
                return SubmissionOutcome::Ignored;
            }

            let results = Self::evaluate_all(&mut state.form);
            let valid = results.iter().all(|(_, r)| r.valid);
            if valid {
                state.submission = SubmissionState::Submitting;
                (results, Some(state.form.to_message()))
            } else {
                (results, None)
            }
        };

        self.emit_all(&results);

        let Some(message) = message else {
            debug!("Submit rejected: form has invalid fields");
            return SubmissionOutcome::Invalid;
        };

        info!("Submitting contact form");
        self.ui.form_signal(UiSignal::SubmitBusy {
            busy: true,
            label: self.config.busy_label.clone(),
        });

        // The send and its settlement run in a task the engine owns, so the
        // lifecycle still leaves Submitting if the caller drops this future.
        let engine = self.clone();
        let task = tokio::spawn(async move {
            let sent = engine.transport.send(&message).await;
            engine.settle(sent)
        });

        match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Submission task ended abnormally: {}", e);
                self.settle(Err(SubmissionError::Other(anyhow::anyhow!(
                    "submission task ended abnormally: {}",
                    e
                ))))
            }
        }
    }

    fn settle(&self, sent: std::result::Result<(), SubmissionError>) -> SubmissionOutcome {
        let outcome = match sent {
            Ok(()) => {
                {
                    let mut state = self.state.lock();
                    state.submission = SubmissionState::Succeeded;
                    state.form.clear();
                }
                info!("Contact form submitted successfully");

                self.show_banner(&self.config.success_message, NotificationKind::Success);
                self.emit_reset();
                SubmissionOutcome::Succeeded
            }
            Err(e) => {
                self.state.lock().submission = SubmissionState::Failed;
                warn!("Contact form submission failed: {}", e);

                self.show_banner(&self.config.failure_message, NotificationKind::Failure);
                SubmissionOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        self.ui.form_signal(UiSignal::SubmitBusy {
            busy: false,
            label: self.config.submit_label.clone(),
        });

        outcome
    }

    /// Resolves once no banner is displayed.
    pub async fn banner_dismissed(&self) {
        self.notifier.dismissed().await;
    }

    pub fn field_state(&self, field: FieldName) -> FieldState {
        self.state.lock().form.get(field).clone()
    }

    pub fn form_state(&self) -> FormState {
        self.state.lock().form.clone()
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.state.lock().submission
    }

    fn evaluate(field_state: &mut FieldState) -> ValidationResult {
        let result = validation::validate_field(field_state.field, &field_state.value);
        field_state.apply(&result);
        debug!(
            field = %field_state.field,
            valid = result.valid,
            "Validated field"
        );
        result
    }

    fn evaluate_all(form: &mut FormState) -> Vec<(FieldName, ValidationResult)> {
        FieldName::ALL
            .into_iter()
            .map(|field| (field, Self::evaluate(form.get_mut(field))))
            .collect()
    }

    fn show_banner(&self, text: &str, kind: NotificationKind) {
        let state = self.state.clone();
        self.notifier.show(text, kind, move || {
            let mut state = state.lock();
            if matches!(
                state.submission,
                SubmissionState::Succeeded | SubmissionState::Failed
            ) {
                state.submission = SubmissionState::Idle;
                debug!("Submission lifecycle back to idle");
            }
        });
    }

    fn emit_all(&self, results: &[(FieldName, ValidationResult)]) -> bool {
        results.iter().fold(true, |all_valid, (field, result)| {
            self.emit_field(*field, result);
            all_valid && result.valid
        })
    }

    fn emit_field(&self, field: FieldName, result: &ValidationResult) {
        self.emit_field_state(field, FieldVisual::from(result.validity()), &result.message);
    }

    fn emit_field_state(&self, field: FieldName, visual: FieldVisual, message: &str) {
        let binding = self.bindings.get(field);
        self.ui.form_signal(UiSignal::FieldVisual {
            field,
            input_id: binding.input_id.clone(),
            visual,
        });
        self.ui.form_signal(UiSignal::FieldError {
            field,
            error_id: binding.error_id.clone(),
            message: message.to_string(),
        });
    }

    fn emit_reset(&self) {
        self.ui.form_signal(UiSignal::FormReset);
        for field in FieldName::ALL {
            self.emit_field_state(field, FieldVisual::Neutral, "");
        }
    }
}
