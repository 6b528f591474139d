//! # Store Error Types
//!
//! Error types for store operations.
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store Error Categories                               │
//! │                                                                         │
//! │  Validation  → malformed input; state untouched; caller re-prompts     │
//! │  NotFound    → unknown id; state untouched; caller refreshes           │
//! │  Transient   → simulated network failure during load; recorded in      │
//! │                request_error; caller re-invokes load()                  │
//! │  Config      → bad config file or env override (startup only)          │
//! │                                                                         │
//! │  Nothing here is fatal: every variant is caller-recoverable.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use stockroom_core::ValidationError;
use thiserror::Error;

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Input failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Entity not found in the store.
    ///
    /// ## When This Occurs
    /// - `update` / `update_quantity` with an unknown id
    /// - The product was removed by an earlier mutation
    /// - A bulk load replaced the collection
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Simulated network failure. Retry by calling `load` again.
    #[error("Transient failure: {0}")]
    Transient(String),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a NotFound error for a product id.
    pub fn product_not_found(id: impl Into<String>) -> Self {
        StoreError::not_found("Product", id)
    }

    /// True only for failures a retry can fix.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Transient(_))
    }

    /// True for configuration problems.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            StoreError::InvalidConfig(_) | StoreError::ConfigLoadFailed(_)
        )
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            StoreError::product_not_found("abc").to_string(),
            "Product not found: abc"
        );
        assert_eq!(
            StoreError::Transient("simulated network failure".into()).to_string(),
            "Transient failure: simulated network failure"
        );
    }

    #[test]
    fn test_validation_converts_to_store_error() {
        let err: StoreError = ValidationError::required("sku").into();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(err.to_string(), "Validation error: sku is required");
    }

    #[test]
    fn test_categorization() {
        assert!(StoreError::Transient("x".into()).is_retryable());
        assert!(!StoreError::product_not_found("x").is_retryable());
        assert!(!StoreError::Validation(ValidationError::negative("price")).is_retryable());
        assert!(StoreError::InvalidConfig("x".into()).is_config_error());
    }
}
