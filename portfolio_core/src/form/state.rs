use serde::{Deserialize, Serialize};

use crate::validation::{FieldName, ValidationResult, Validity};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldState {
    pub field: FieldName,
    /// Trimmed input.
    pub value: String,
    pub validity: Validity,
    pub error_message: String,
}

impl FieldState {
    pub fn new(field: FieldName) -> Self {
        Self {
            field,
            value: String::new(),
            validity: Validity::Unvalidated,
            error_message: String::new(),
        }
    }

    pub fn set_value(&mut self, raw_value: &str) {
        self.value = raw_value.trim().to_string();
    }

    pub fn apply(&mut self, result: &ValidationResult) {
        self.validity = result.validity();
        self.error_message = result.message.clone();
    }

    pub fn clear(&mut self) {
        *self = Self::new(self.field);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    fields: [FieldState; 4],
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            fields: FieldName::ALL.map(FieldState::new),
        }
    }
}

impl FormState {
    pub fn get(&self, field: FieldName) -> &FieldState {
        &self.fields[field.index()]
    }

    pub fn get_mut(&mut self, field: FieldName) -> &mut FieldState {
        &mut self.fields[field.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldState> {
        self.fields.iter()
    }

    pub fn is_valid(&self) -> bool {
        self.iter().all(|f| f.validity == Validity::Valid)
    }

    pub fn clear(&mut self) {
        self.fields.iter_mut().for_each(FieldState::clear);
    }

    pub fn to_message(&self) -> ContactMessage {
        ContactMessage {
            name: self.get(FieldName::Name).value.clone(),
            email: self.get(FieldName::Email).value.clone(),
            subject: self.get(FieldName::Subject).value.clone(),
            message: self.get(FieldName::Message).value.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionOutcome {
    /// Validation failed; nothing was sent.
    Invalid,
    /// Another submission had not finished its lifecycle yet.
    Ignored,
    Succeeded,
    Failed { reason: String },
}

/// What a successful form submission hands to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}
