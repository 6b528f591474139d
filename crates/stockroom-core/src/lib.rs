//! # stockroom-core: Pure Domain Logic for Stockroom
//!
//! This crate holds the inventory domain as pure functions with zero I/O
//! dependencies. The store crate builds its state machine on top of it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Presentation layer (out of tree)               │   │
//! │  │    Product table ──► Filters ──► Stats panel ──► Edit dialog    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ selectors / mutations                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    stockroom-store                              │   │
//! │  │    InventoryStore, memoized selectors, mock backend             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stockroom-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   money   │  │ validation│                  │   │
//! │  │   │  Product  │  │   Money   │  │   rules   │                  │   │
//! │  │   │StockStatus│  │           │  │  checks   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO RANDOMNESS • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, StockStatus, drafts and changes)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Validation error types
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::StockStatus;
//!
//! assert_eq!(StockStatus::from_levels(0, 10), StockStatus::OutOfStock);
//! assert_eq!(StockStatus::from_levels(5, 10), StockStatus::LowStock);
//! assert_eq!(StockStatus::from_levels(10, 10), StockStatus::InStock);
//! ```

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use error::ValidationError;
pub use money::Money;
pub use types::*;

/// Categories the mock backend draws from.
///
/// Products added by hand may use any non-empty label; this list only
/// seeds generated data.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Electronics",
    "Books",
    "Clothing",
    "Home & Garden",
    "Sports",
    "Toys",
    "Grocery",
];

/// Maximum length of a product name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of a SKU or category label.
pub const MAX_CODE_LEN: usize = 50;

/// Maximum length of a search term.
pub const MAX_SEARCH_LEN: usize = 100;

/// Highest accepted unit price: $1,000,000.00.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

/// Highest accepted quantity or minimum stock threshold.
///
/// With [`MAX_PRICE_CENTS`], one product is worth at most 10^14 cents, so a
/// valuation over tens of thousands of products stays well inside `i64`.
pub const MAX_QUANTITY: i64 = 1_000_000;
