//! Validation error types

use std::fmt;

/// Validation error for booking fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required value was not supplied
    Missing { field: &'static str },

    /// Numeric value is below the allowed minimum
    TooSmall {
        field: &'static str,
        min: i64,
        value: i64,
    },

    /// Text could not be parsed into the field's type
    Unparseable { field: &'static str, value: String },

    /// Value cannot be represented as an instant
    OutOfRange { field: &'static str, value: i64 },
}

impl ValidationError {
    /// Name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::TooSmall { field, .. }
            | Self::Unparseable { field, .. }
            | Self::OutOfRange { field, .. } => field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{} is required", field),
            Self::TooSmall { field, min, value } => {
                write!(f, "{} must be at least {} (got {})", field, min, value)
            }
            Self::Unparseable { field, value } => {
                write!(f, "{} must be a valid date: '{}'", field, value)
            }
            Self::OutOfRange { field, value } => {
                write!(f, "{} is not a representable instant: {}", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooSmall {
            field: "party size",
            min: 1,
            value: 0,
        };
        assert_eq!(err.to_string(), "party size must be at least 1 (got 0)");
    }

    #[test]
    fn field_name_is_exposed() {
        let err = ValidationError::Missing { field: "start time" };
        assert_eq!(err.field(), "start time");
    }
}
