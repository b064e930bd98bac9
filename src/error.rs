//! Error handling for the resume lens application

use crate::llm::client::ServiceError;
use crate::processing::validator::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeLensError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("An analysis is already in progress")]
    Busy,

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Document produced no usable text")]
    EmptyDocument,

    #[error("Completion service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Response validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeLensError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ResumeLensError {
    fn from(err: anyhow::Error) -> Self {
        ResumeLensError::InvalidInput(err.to_string())
    }
}
