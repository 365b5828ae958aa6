//! Validation rules for the contact form fields

use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use validator::ValidationError;

use super::{FieldName, ValidationResult};

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$"
    ).unwrap();
}

const NAME_MIN_LENGTH: usize = 2;
const SUBJECT_MIN_LENGTH: usize = 3;
const MESSAGE_MIN_LENGTH: usize = 10;

fn rule_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

pub fn validate_required(value: &str, label: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(rule_error("required", format!("{} is required", label)));
    }
    Ok(())
}

pub fn validate_min_length(value: &str, label: &str, min: usize) -> Result<(), ValidationError> {
    if value.chars().count() < min {
        return Err(rule_error(
            "min_length",
            format!("{} must be at least {} characters", label, min),
        ));
    }
    Ok(())
}

pub fn validate_email_format(value: &str) -> Result<(), ValidationError> {
    if !EMAIL_REGEX.is_match(value) {
        return Err(rule_error(
            "email",
            "Please enter a valid email address".to_string(),
        ));
    }
    Ok(())
}

fn label(field: FieldName) -> &'static str {
    match field {
        FieldName::Name => "Name",
        FieldName::Email => "Email",
        FieldName::Subject => "Subject",
        FieldName::Message => "Message",
    }
}

/// Runs the rule chain for `field` against an already trimmed value.
/// The required check always runs first.
pub fn check_field(field: FieldName, value: &str) -> Result<(), ValidationError> {
    let label = label(field);
    validate_required(value, label)?;

    match field {
        FieldName::Name => validate_min_length(value, label, NAME_MIN_LENGTH),
        FieldName::Email => validate_email_format(value),
        FieldName::Subject => validate_min_length(value, label, SUBJECT_MIN_LENGTH),
        FieldName::Message => validate_min_length(value, label, MESSAGE_MIN_LENGTH),
    }
}

/// Pure validation of a raw input value; depends only on the field and the
/// trimmed value.
pub fn validate_field(field: FieldName, raw_value: &str) -> ValidationResult {
    match check_field(field, raw_value.trim()) {
        Ok(()) => ValidationResult::success(),
        Err(error) => {
            let message = error
                .message
                .map(|m| m.into_owned())
                .unwrap_or_else(|| format!("{} is invalid", label(field)));
            ValidationResult::failure(message)
        }
    }
}
