//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  ProductDraft   │   │ ProductChanges  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  name, sku      │   │  every field    │       │
//! │  │  sku (business) │   │  category       │   │  optional       │       │
//! │  │  quantity       │   │  price, qty     │   │                 │       │
//! │  │  min_stock      │   │  min_stock      │   │                 │       │
//! │  └────────┬────────┘   └─────────────────┘   └─────────────────┘       │
//! │           │ status() (derived, never stored)                            │
//! │           ▼                                                             │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  StockStatus    │   │ RequestStatus   │                             │
//! │  │  InStock        │   │ Idle / Loading  │                             │
//! │  │  LowStock       │   │ Succeeded       │                             │
//! │  │  OutOfStock     │   │ Failed          │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Derived Status
//! A product never stores its stock status. [`Product::status`] evaluates
//! [`StockStatus::from_levels`] on every read, so no write path can leave a
//! stale tag behind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Stock Status
// =============================================================================

/// Stock level bucket for a product.
///
/// Ordered by severity: `OutOfStock < LowStock < InStock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    /// No units on hand.
    OutOfStock,
    /// Some units, but fewer than the product's minimum.
    LowStock,
    /// At or above the minimum.
    InStock,
}

impl StockStatus {
    /// All statuses, most severe first.
    pub const ALL: [StockStatus; 3] = [
        StockStatus::OutOfStock,
        StockStatus::LowStock,
        StockStatus::InStock,
    ];

    /// Computes the status from the quantity on hand and the minimum level.
    ///
    /// ## Rules
    /// ```text
    /// quantity == 0               → OutOfStock
    /// 0 < quantity < min_stock    → LowStock
    /// otherwise                   → InStock
    /// ```
    pub const fn from_levels(quantity: i64, min_stock: i64) -> Self {
        if quantity <= 0 {
            StockStatus::OutOfStock
        } else if quantity < min_stock {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    /// Returns the kebab-case tag (`in-stock`, `low-stock`, `out-of-stock`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "out-of-stock",
            StockStatus::LowStock => "low-stock",
            StockStatus::InStock => "in-stock",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "in-stock" | "in_stock" => Ok(StockStatus::InStock),
            "low-stock" | "low_stock" => Ok(StockStatus::LowStock),
            "out-of-stock" | "out_of_stock" => Ok(StockStatus::OutOfStock),
            other => Err(ValidationError::InvalidFormat {
                field: "status".to_string(),
                reason: format!(
                    "unknown status '{}', expected in-stock, low-stock or out-of-stock",
                    other
                ),
            }),
        }
    }
}

// =============================================================================
// Request Status
// =============================================================================

/// Lifecycle of the bulk load request.
///
/// ```text
/// Idle ──► Loading ──┬──► Succeeded ──┐
///   ▲                └──► Failed ─────┤
///   │                        ▲        │ load() again
///   └── (initial)            └────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestStatus::Idle => write!(f, "idle"),
            RequestStatus::Loading => write!(f, "loading"),
            RequestStatus::Succeeded => write!(f, "succeeded"),
            RequestStatus::Failed => write!(f, "failed"),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// One inventory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Category label.
    pub category: String,

    /// Unit price in cents.
    pub price_cents: i64,

    /// Units on hand.
    pub quantity: i64,

    /// Reorder threshold; fewer units than this is "low stock".
    pub min_stock: i64,

    /// When the product was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Builds a product from an already validated draft.
    pub fn from_draft(id: impl Into<String>, draft: ProductDraft, now: DateTime<Utc>) -> Self {
        Product {
            id: id.into(),
            name: draft.name.trim().to_string(),
            sku: draft.sku.trim().to_string(),
            category: draft.category.trim().to_string(),
            price_cents: draft.price_cents,
            quantity: draft.quantity,
            min_stock: draft.min_stock,
            updated_at: now,
        }
    }

    /// Current stock status, derived from `quantity` and `min_stock`.
    #[inline]
    pub fn status(&self) -> StockStatus {
        StockStatus::from_levels(self.quantity, self.min_stock)
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Value of the stock on hand (price × quantity).
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.price().multiply_quantity(self.quantity)
    }

    /// Merges validated changes and refreshes the timestamp.
    pub fn apply_changes(&mut self, changes: &ProductChanges, now: DateTime<Utc>) {
        if let Some(name) = &changes.name {
            self.name = name.trim().to_string();
        }
        if let Some(sku) = &changes.sku {
            self.sku = sku.trim().to_string();
        }
        if let Some(category) = &changes.category {
            self.category = category.trim().to_string();
        }
        if let Some(price_cents) = changes.price_cents {
            self.price_cents = price_cents;
        }
        if let Some(quantity) = changes.quantity {
            self.quantity = quantity;
        }
        if let Some(min_stock) = changes.min_stock {
            self.min_stock = min_stock;
        }
        self.updated_at = now;
    }

    /// Sets the quantity on hand and refreshes the timestamp.
    pub fn set_quantity(&mut self, quantity: i64, now: DateTime<Utc>) {
        self.quantity = quantity;
        self.updated_at = now;
    }

    /// Case-insensitive substring match on name or SKU.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.sku.to_lowercase().contains(needle)
    }
}

// =============================================================================
// Product Draft
// =============================================================================

/// Input for adding a product. The store assigns the id and timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub sku: String,
    pub category: String,
    pub price_cents: i64,
    pub quantity: i64,
    pub min_stock: i64,
}

impl ProductDraft {
    /// Creates a draft with the identifying fields set and zeroed numbers.
    pub fn new(
        name: impl Into<String>,
        sku: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        ProductDraft {
            name: name.into(),
            sku: sku.into(),
            category: category.into(),
            ..Default::default()
        }
    }

    pub fn with_price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = price_cents;
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_min_stock(mut self, min_stock: i64) -> Self {
        self.min_stock = min_stock;
        self
    }
}

// =============================================================================
// Product Changes
// =============================================================================

/// Partial update for an existing product. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_cents: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<i64>,
}

impl ProductChanges {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self == &ProductChanges::default()
    }

    /// True when the change touches the collection's sort key (the name).
    pub fn renames(&self) -> bool {
        self.name.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn product(quantity: i64, min_stock: i64) -> Product {
        Product::from_draft(
            "p-1",
            ProductDraft::new("Desk Lamp", "LAMP-01", "Home & Garden")
                .with_price_cents(2499)
                .with_quantity(quantity)
                .with_min_stock(min_stock),
            Utc::now(),
        )
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(StockStatus::from_levels(0, 10), StockStatus::OutOfStock);
        assert_eq!(StockStatus::from_levels(0, 0), StockStatus::OutOfStock);
        assert_eq!(StockStatus::from_levels(1, 10), StockStatus::LowStock);
        assert_eq!(StockStatus::from_levels(9, 10), StockStatus::LowStock);
        assert_eq!(StockStatus::from_levels(10, 10), StockStatus::InStock);
        assert_eq!(StockStatus::from_levels(3, 0), StockStatus::InStock);
    }

    #[test]
    fn test_status_tags() {
        assert_eq!(StockStatus::LowStock.to_string(), "low-stock");
        assert_eq!("out-of-stock".parse::<StockStatus>().unwrap(), StockStatus::OutOfStock);
        assert_eq!("IN-STOCK".parse::<StockStatus>().unwrap(), StockStatus::InStock);
        assert!("sold-out".parse::<StockStatus>().is_err());

        let json = serde_json::to_string(&StockStatus::OutOfStock).unwrap();
        assert_eq!(json, "\"out-of-stock\"");
    }

    #[test]
    fn test_request_status_default() {
        assert_eq!(RequestStatus::default(), RequestStatus::Idle);
        assert_eq!(RequestStatus::Failed.to_string(), "failed");
    }

    #[test]
    fn test_draft_is_trimmed() {
        let p = Product::from_draft(
            "p-2",
            ProductDraft::new("  Novel ", " BK-1 ", " Books "),
            Utc::now(),
        );
        assert_eq!(p.name, "Novel");
        assert_eq!(p.sku, "BK-1");
        assert_eq!(p.category, "Books");
    }

    #[test]
    fn test_status_follows_quantity_changes() {
        let mut p = product(20, 10);
        assert_eq!(p.status(), StockStatus::InStock);

        p.set_quantity(0, Utc::now());
        assert_eq!(p.status(), StockStatus::OutOfStock);

        let changes = ProductChanges {
            quantity: Some(4),
            ..Default::default()
        };
        p.apply_changes(&changes, Utc::now());
        assert_eq!(p.status(), StockStatus::LowStock);

        let changes = ProductChanges {
            min_stock: Some(2),
            ..Default::default()
        };
        p.apply_changes(&changes, Utc::now());
        assert_eq!(p.status(), StockStatus::InStock);
    }

    #[test]
    fn test_apply_changes_refreshes_timestamp() {
        let mut p = product(5, 1);
        let before = p.updated_at;
        let later = before + chrono::Duration::seconds(5);

        p.apply_changes(&ProductChanges::default(), later);
        assert_eq!(p.updated_at, later);
        assert_eq!(p.name, "Desk Lamp");
    }

    #[test]
    fn test_stock_value_and_search() {
        let p = product(4, 1);
        assert_eq!(p.stock_value().cents(), 9996);
        assert!(p.matches_search("lamp"));
        assert!(p.matches_search("lamp-0"));
        assert!(p.matches_search(""));
        assert!(!p.matches_search("chair"));
    }

    #[test]
    fn test_changes_flags() {
        assert!(ProductChanges::default().is_empty());
        let rename = ProductChanges {
            name: Some("New".into()),
            ..Default::default()
        };
        assert!(!rename.is_empty());
        assert!(rename.renames());
    }

    proptest! {
        #[test]
        fn status_is_determined_by_levels(quantity in 0i64..10_000, min_stock in 0i64..10_000) {
            let status = StockStatus::from_levels(quantity, min_stock);
            let expected = if quantity == 0 {
                StockStatus::OutOfStock
            } else if quantity < min_stock {
                StockStatus::LowStock
            } else {
                StockStatus::InStock
            };
            prop_assert_eq!(status, expected);
            prop_assert_eq!(product(quantity, min_stock).status(), expected);
        }
    }
}
