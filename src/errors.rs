//! Error types for the workflow designer
//!
//! Each error type has a corresponding error code for programmatic handling.

use thiserror::Error;

use crate::domain::ValidationError;

/// Result type alias for designer operations
pub type Result<T> = std::result::Result<T, DesignerError>;

/// Main error type for all designer operations
#[derive(Debug, Error)]
pub enum DesignerError {
    /// Local validation failed; never contacts the store
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Capability check failed before any request was issued
    #[error("Access Denied: {0}")]
    AccessDenied(String),

    /// Transport-level failure talking to the store
    #[error("Network error: {0}")]
    Network(String),

    /// The store answered with an error payload
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// A stage or action index does not point at an editable entry
    #[error("Invalid index {index} (have {len})")]
    InvalidIndex { index: usize, len: usize },

    /// An action edit was attempted while no stage is being composed
    #[error("No stage is being edited")]
    NotComposing,

    /// Resource not found in the store
    #[error("Not found: {0}")]
    NotFound(String),

    /// No .wfdesigner directory between the working directory and the filesystem root
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// No session file; `wfd login` has not been run
    #[error("Not logged in")]
    NotLoggedIn,

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error with context
    #[error("{context}: {message}")]
    Wrapped { context: String, message: String },
}

impl DesignerError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            DesignerError::Validation(_) => "VALIDATION",
            DesignerError::AccessDenied(_) => "ACCESS_DENIED",
            DesignerError::Network(_) => "NETWORK_ERROR",
            DesignerError::Backend { .. } => "BACKEND_ERROR",
            DesignerError::InvalidIndex { .. } => "INVALID_INDEX",
            DesignerError::NotComposing => "NOT_COMPOSING",
            DesignerError::NotFound(_) => "NOT_FOUND",
            DesignerError::ProjectNotFound(_) => "PROJECT_NOT_FOUND",
            DesignerError::InvalidJson(_) => "INVALID_JSON",
            DesignerError::FileNotFound(_) => "FILE_NOT_FOUND",
            DesignerError::ConfigError(_) => "CONFIG_ERROR",
            DesignerError::NotLoggedIn => "NOT_LOGGED_IN",
            DesignerError::Io(_) => "IO_ERROR",
            DesignerError::Wrapped { .. } => "WRAPPED_ERROR",
        }
    }

    /// Wrap an error with additional context
    pub fn wrap<E: std::fmt::Display>(error: E, context: impl Into<String>) -> Self {
        DesignerError::Wrapped {
            context: context.into(),
            message: error.to_string(),
        }
    }

    /// Whether retrying the same request may succeed without user changes
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DesignerError::Network(_) | DesignerError::Backend { .. }
        )
    }

    /// Prefix a store failure with the operation that triggered it.
    ///
    /// Local errors pass through untouched so the user sees the rule that failed.
    pub fn during(self, operation: &str) -> Self {
        match self {
            DesignerError::Network(message) => {
                DesignerError::Network(format!("Failed to {}: {}", operation, message))
            }
            DesignerError::Backend { status, message } => DesignerError::Backend {
                status,
                message: format!("Failed to {}: {}", operation, message),
            },
            DesignerError::NotFound(message) => {
                DesignerError::NotFound(format!("Failed to {}: {}", operation, message))
            }
            other => other,
        }
    }
}

/// Convert an error to an appropriate exit code
pub fn to_exit_code(error: &DesignerError) -> i32 {
    match error {
        DesignerError::Validation(_) => 2,
        DesignerError::AccessDenied(_) | DesignerError::NotLoggedIn => 3,
        _ => 1,
    }
}
