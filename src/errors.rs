//! Error types for herdcycle
//!
//! Each error type has a corresponding error code for programmatic handling.

use thiserror::Error;

/// Result type alias for herdcycle operations
pub type Result<T> = std::result::Result<T, HerdError>;

/// Main error type for all herdcycle operations
#[derive(Debug, Error)]
pub enum HerdError {
    /// Malformed or out-of-range input (e.g. body temperature)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested action violates the reproductive state machine
    #[error("State error: {0}")]
    State(String),

    /// Animal id does not exist in the collection
    #[error("Not found: {0}")]
    NotFound(String),

    /// External store or scorer unreachable, or returned an unexpected shape
    #[error("Collaborator error: {0}")]
    Collaborator(String),

    /// No .herdcycle directory found
    #[error("Herd not found: {0}")]
    HerdNotFound(String),

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error with context
    #[error("{context}: {message}")]
    Wrapped { context: String, message: String },
}

impl HerdError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            HerdError::Validation(_) => "VALIDATION_ERROR",
            HerdError::State(_) => "STATE_ERROR",
            HerdError::NotFound(_) => "NOT_FOUND",
            HerdError::Collaborator(_) => "COLLABORATOR_ERROR",
            HerdError::HerdNotFound(_) => "HERD_NOT_FOUND",
            HerdError::InvalidJson(_) => "INVALID_JSON",
            HerdError::FileNotFound(_) => "FILE_NOT_FOUND",
            HerdError::ConfigError(_) => "CONFIG_ERROR",
            HerdError::Io(_) => "IO_ERROR",
            HerdError::Wrapped { .. } => "WRAPPED_ERROR",
        }
    }

    /// Whether the failure may succeed if the user repeats the action.
    ///
    /// Only collaborator failures qualify; validation and state rejections
    /// will fail again until the inputs or the record change.
    pub fn is_retryable(&self) -> bool {
        matches!(self, HerdError::Collaborator(_))
    }

    /// Wrap an error with additional context
    pub fn wrap<E: std::fmt::Display>(error: E, context: impl Into<String>) -> Self {
        HerdError::Wrapped {
            context: context.into(),
            message: error.to_string(),
        }
    }
}

/// Convert an error to an appropriate exit code
pub fn to_exit_code(error: &HerdError) -> i32 {
    match error {
        HerdError::Validation(_) | HerdError::State(_) => 2,
        HerdError::NotFound(_) => 3,
        HerdError::Collaborator(_) => 4,
        _ => 1,
    }
}
