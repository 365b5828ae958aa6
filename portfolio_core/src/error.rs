//! Application error types and handling

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Submission error: {0}")]
    Submission(#[from] SubmissionError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failure raised by a submission transport.
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("Failed to send message: {0}")]
    Send(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn unknown_field(name: &str) -> Self {
        AppError::InvalidArgument(format!("unknown form field '{}'", name))
    }
}
