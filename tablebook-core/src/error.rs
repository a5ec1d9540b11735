//! Structured error types for tablebook-core.
//!
//! Field validation keeps its own [`ValidationError`]; everything a booking
//! operation can fail with is collected in [`BookingError`]. Store failures
//! pass through unchanged.

use thiserror::Error;

use crate::models::{BookingId, ValidationError};

/// Attempt to change a write-once field to a different value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot change {field} from {current} to {attempted}")]
pub struct ImmutableFieldError {
    pub field: &'static str,
    pub current: String,
    pub attempted: String,
}

/// Failure reported by a booking store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Connectivity, constraint and decoding failures from the driver
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Error type for booking operations
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("invalid booking: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    ImmutableField(#[from] ImmutableFieldError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Update matched no row for a booking believed to be persisted
    #[error("booking {id} not found")]
    NotFound { id: BookingId },
}

/// Result type alias for booking operations
pub type Result<T> = std::result::Result<T, BookingError>;

/// Configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required setting {var} (set it in the environment or a .env file)")]
    Missing { var: &'static str },

    #[error("invalid value for {var}: '{value}' ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid(var: &'static str, value: impl Into<String>, reason: impl ToString) -> Self {
        Self::Invalid {
            var,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}
