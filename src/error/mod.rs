//! Error handling module for Video Diary

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for application-level operations
#[derive(Error, Debug)]
pub enum DiaryError {
    /// Failure reported by the domain or one of its ports
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Time value on the command line could not be parsed
    #[error("Invalid time: {value}. Expected seconds (e.g. 12.5) or M:SS(.ms)")]
    InvalidTime { value: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for application-level operations
pub type DiaryResult<T> = std::result::Result<T, DiaryError>;
