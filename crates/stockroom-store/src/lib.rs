//! # stockroom-store: Normalized Inventory Store
//!
//! Holds a keyed product collection plus request status, filter, and sort,
//! and exposes CRUD mutations and memoized derived views.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Data Flow                              │
//! │                                                                         │
//! │  Presentation layer: reads selectors, dispatches mutations,            │
//! │  re-renders when the revision channel changes                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 stockroom-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌───────────────┐   ┌──────────────┐    │   │
//! │  │   │InventoryStore │──►│InventoryState │   │  Selectors   │    │   │
//! │  │   │  (store.rs)   │   │  (state.rs)   │◄──│ (memoized)   │    │   │
//! │  │   └───────┬───────┘   └───────────────┘   └──────────────┘    │   │
//! │  │           │ load()                                             │   │
//! │  │   ┌───────▼───────┐   ┌───────────────┐                        │   │
//! │  │   │  MockBackend  │──►│   generator   │                        │   │
//! │  │   │ latency/fault │   │  mock data    │                        │   │
//! │  │   └───────────────┘   └───────────────┘                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The `InventoryStore` facade
//! - [`state`] - Normalized state and its transitions
//! - [`selectors`] - Memo caches, `Statistics`
//! - [`filter`] - Filter predicates and sort comparators
//! - [`backend`] - Simulated remote API
//! - [`generator`] - Mock product data
//! - [`config`] - TOML + environment configuration
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use stockroom_store::{BackendSettings, InventoryStore, MockBackend};
//! use stockroom_core::{ProductDraft, StockStatus};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> stockroom_store::StoreResult<()> {
//! let mut store = InventoryStore::new(MockBackend::new(BackendSettings::reliable(7)));
//! store.load(100).await?;
//!
//! let product = store.add(
//!     ProductDraft::new("X", "S1", "Books")
//!         .with_price_cents(1000)
//!         .with_quantity(5)
//!         .with_min_stock(10),
//! )?;
//! assert_eq!(product.status(), StockStatus::LowStock);
//! assert_eq!(store.statistics().total, 101);
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod filter;
pub mod generator;
pub mod selectors;
pub mod state;
pub mod store;

pub use backend::MockBackend;
pub use config::{BackendSettings, LoadSettings, StockroomConfig};
pub use error::{StoreError, StoreResult};
pub use filter::{CategoryFilter, FilterUpdate, ProductFilter, SortKey, SortOrder, StatusFilter};
pub use selectors::{SelectorComputations, Statistics};
pub use state::InventoryState;
pub use store::{InventoryStore, LoadTicket};
