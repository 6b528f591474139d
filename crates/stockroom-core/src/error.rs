//! # Error Types
//!
//! Domain-level validation errors for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  stockroom-store errors (separate crate)                               │
//! │  └── StoreError       - Validation | NotFound | Transient | Config     │
//! │                                                                         │
//! │  Flow: ValidationError → StoreError → caller re-prompts / retries      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Input validation errors.
///
/// Raised before any state is touched, so a failed mutation leaves the
/// store exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Numeric value is above its upper bound.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., SKU with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate SKU).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    /// Creates a `Required` error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates a `MustBeNonNegative` error for the given field.
    pub fn negative(field: impl Into<String>) -> Self {
        ValidationError::MustBeNonNegative {
            field: field.into(),
        }
    }

    /// Creates an `OutOfRange` error for a non-negative field capped at `max`.
    pub fn out_of_range(field: impl Into<String>, max: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min: 0,
            max,
        }
    }

    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::MustBeNonNegative { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::Duplicate { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("sku").to_string(), "sku is required");
        assert_eq!(
            ValidationError::negative("price").to_string(),
            "price must not be negative"
        );

        let err = ValidationError::Duplicate {
            field: "sku".to_string(),
            value: "BOOK-1".to_string(),
        };
        assert_eq!(err.to_string(), "sku 'BOOK-1' already exists");

        assert_eq!(
            ValidationError::out_of_range("quantity", 1_000_000).to_string(),
            "quantity must be between 0 and 1000000"
        );
    }

    #[test]
    fn test_field_accessor() {
        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        };
        assert_eq!(err.field(), "name");
    }
}
