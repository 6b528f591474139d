//! # Validation Module
//!
//! Input validation for store mutations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Flow                                    │
//! │                                                                         │
//! │  add(draft) / update(id, changes) / update_quantity(id, qty)           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  THIS MODULE: every field checked up front                             │
//! │           │                                                             │
//! │           ├── any failure? → ValidationError, state untouched          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Store applies the mutation atomically                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::validation::{validate_sku, validate_quantity};
//!
//! assert!(validate_sku("BOOK-0042").is_ok());
//! assert!(validate_quantity(0).is_ok());
//! assert!(validate_quantity(-1).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{ProductChanges, ProductDraft};
use crate::{MAX_CODE_LEN, MAX_NAME_LEN, MAX_PRICE_CENTS, MAX_QUANTITY, MAX_SEARCH_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::validate_sku;
///
/// assert!(validate_sku("S1").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("has space").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    validate_text("sku", sku, MAX_CODE_LEN)?;

    if !sku
        .trim()
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name: non-empty, at most 200 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name, MAX_NAME_LEN)
}

/// Validates a category label: non-empty, at most 50 characters.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    validate_text("category", category, MAX_CODE_LEN)
}

/// Validates a search term.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed term.
pub fn validate_search_term(term: &str) -> ValidationResult<String> {
    let term = term.trim();

    if term.chars().count() > MAX_SEARCH_LEN {
        return Err(ValidationError::TooLong {
            field: "search_term".to_string(),
            max: MAX_SEARCH_LEN,
        });
    }

    Ok(term.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents: `0..=MAX_PRICE_CENTS`. Zero is allowed
/// (free items).
///
/// ```rust
/// use stockroom_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    validate_bounded("price", cents, MAX_PRICE_CENTS)
}

/// Validates a stock quantity. Zero is allowed (out of stock).
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    validate_bounded("quantity", qty, MAX_QUANTITY)
}

/// Validates a minimum stock threshold.
pub fn validate_min_stock(min_stock: i64) -> ValidationResult<()> {
    validate_bounded("min_stock", min_stock, MAX_QUANTITY)
}

fn validate_bounded(field: &str, value: i64, max: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::negative(field));
    }
    if value > max {
        return Err(ValidationError::out_of_range(field, max));
    }
    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates every field of a draft, reporting the first failure.
pub fn validate_draft(draft: &ProductDraft) -> ValidationResult<()> {
    validate_product_name(&draft.name)?;
    validate_sku(&draft.sku)?;
    validate_category(&draft.category)?;
    validate_price_cents(draft.price_cents)?;
    validate_quantity(draft.quantity)?;
    validate_min_stock(draft.min_stock)?;
    Ok(())
}

/// Validates the fields present in a partial update.
pub fn validate_changes(changes: &ProductChanges) -> ValidationResult<()> {
    if let Some(name) = &changes.name {
        validate_product_name(name)?;
    }
    if let Some(sku) = &changes.sku {
        validate_sku(sku)?;
    }
    if let Some(category) = &changes.category {
        validate_category(category)?;
    }
    if let Some(price_cents) = changes.price_cents {
        validate_price_cents(price_cents)?;
    }
    if let Some(quantity) = changes.quantity {
        validate_quantity(quantity)?;
    }
    if let Some(min_stock) = changes.min_stock {
        validate_min_stock(min_stock)?;
    }
    Ok(())
}
