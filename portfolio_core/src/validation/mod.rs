//! Contact form fields, validation results and the per-field rule table

pub mod rules;

pub use rules::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Name,
    Email,
    Subject,
    Message,
}

impl FieldName {
    pub const ALL: [FieldName; 4] = [
        FieldName::Name,
        FieldName::Email,
        FieldName::Subject,
        FieldName::Message,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Name => "name",
            FieldName::Email => "email",
            FieldName::Subject => "subject",
            FieldName::Message => "message",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            FieldName::Name => 0,
            FieldName::Email => 1,
            FieldName::Subject => 2,
            FieldName::Message => 3,
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| AppError::unknown_field(s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Validity {
    #[default]
    Unvalidated,
    Valid,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    /// Empty when `valid`.
    pub message: String,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }

    pub fn validity(&self) -> Validity {
        if self.valid {
            Validity::Valid
        } else {
            Validity::Invalid
        }
    }
}
