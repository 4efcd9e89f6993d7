//! Error types for eventdesk.

use thiserror::Error;

/// Errors that can occur in eventdesk operations.
///
/// Domain errors (everything except `Io`, `Serialization` and `Config`) are
/// meant to be shown to the user as-is. None of them leave the state
/// half-applied: a failed transition returns the error and the caller keeps
/// the previous state.
#[derive(Error, Debug)]
pub enum EventDeskError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Event '{event}' has reached its maximum capacity ({capacity})")]
    CapacityExceeded { event: String, capacity: u64 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("You must be logged in to do that")]
    NotAuthenticated,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for EventDeskError {
    fn from(err: serde_json::Error) -> Self {
        EventDeskError::Serialization(err.to_string())
    }
}

/// Result type alias for eventdesk operations.
pub type EventDeskResult<T> = Result<T, EventDeskError>;
