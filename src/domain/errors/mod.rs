// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Domain-specific error types
///
/// A missing clip is not represented here: lookups return `Option` and the
/// caller branches on `None`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// The persisted store could not be read or holds malformed data
    #[error("Failed to read '{key}' from storage: {message}")]
    StorageRead { key: String, message: String },

    /// The persisted store rejected a write
    #[error("Failed to write '{key}' to storage: {message}")]
    StorageWrite { key: String, message: String },

    /// A trim, probe or media-library call failed
    #[error("{service} failed: {message}")]
    ExternalService { service: String, message: String },

    /// User input rejected by a business rule
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid arguments provided
    #[error("Bad arguments: {0}")]
    BadArgs(String),

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DomainError {
    pub fn storage_read(key: &str, message: impl ToString) -> Self {
        DomainError::StorageRead {
            key: key.to_string(),
            message: message.to_string(),
        }
    }

    pub fn storage_write(key: &str, message: impl ToString) -> Self {
        DomainError::StorageWrite {
            key: key.to_string(),
            message: message.to_string(),
        }
    }

    pub fn external(service: &str, message: impl ToString) -> Self {
        DomainError::ExternalService {
            service: service.to_string(),
            message: message.to_string(),
        }
    }

    /// Whether the failure came from the persisted store
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            DomainError::StorageRead { .. } | DomainError::StorageWrite { .. }
        )
    }
}
