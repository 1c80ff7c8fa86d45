//! Error types for the rules service.

use thiserror::Error;

/// Parameter validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    #[error("no {field} specified")]
    MissingMandatoryField { field: &'static str },
}

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to open rules store at {}", .path.display())]
    Open {
        path: std::path::PathBuf,
        #[source]
        source: sled::Error,
    },

    #[error("Failed to flush rules store")]
    Flush(#[source] sled::Error),
}

/// Service-level errors
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Parameters(#[from] ParameterError),

    #[error(transparent)]
    StorageError(#[from] StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),
}

impl From<config::ConfigError> for ServiceError {
    fn from(err: config::ConfigError) -> Self {
        ServiceError::ConfigError(err.to_string())
    }
}
