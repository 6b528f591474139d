//! # Inventory Store
//!
//! The single owned entry point: mutations, the bulk load, and selectors.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Inventory Store Operations                           │
//! │                                                                         │
//! │  Caller action            Store method            State change          │
//! │  ─────────────            ────────────            ────────────          │
//! │                                                                         │
//! │  Open page ──────────────► load(count) ─────────► replace all products │
//! │                                                                         │
//! │  Submit new product ─────► add(draft) ──────────► insert at sorted pos │
//! │                                                                         │
//! │  Edit product ───────────► update(id, changes) ─► merge fields         │
//! │                                                                         │
//! │  Adjust stock ───────────► update_quantity() ───► quantity, timestamp  │
//! │                                                                         │
//! │  Delete ─────────────────► remove(id) ──────────► drop (no-op if gone) │
//! │                                                                         │
//! │  Filter / sort ──────────► set_filter/set_sort ─► view inputs only     │
//! │                                                                         │
//! │  Render ─────────────────► filtered_products() ─► (read only, cached)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Overlapping Loads
//! [`load`](InventoryStore::load) is `begin_load` + backend fetch +
//! `finish_load`. Callers that fetch concurrently may use the split form;
//! whichever result is finished last replaces the collection, regardless of
//! which request was issued first. There is no cancellation.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

use stockroom_core::validation::{validate_changes, validate_draft, validate_quantity};
use stockroom_core::{Product, ProductChanges, ProductDraft, RequestStatus, ValidationError};

use crate::backend::MockBackend;
use crate::config::StockroomConfig;
use crate::error::{StoreError, StoreResult};
use crate::filter::{FilterUpdate, ProductFilter, SortKey, SortOrder};
use crate::selectors::{SelectorComputations, Selectors, Statistics};
use crate::state::InventoryState;

/// Identifies one bulk load request in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

/// Owned inventory store.
///
/// Create one per consumer; instances share nothing.
#[derive(Debug)]
pub struct InventoryStore {
    state: InventoryState,
    selectors: Selectors,
    backend: MockBackend,
    revision: watch::Sender<u64>,
    next_ticket: u64,
}

impl InventoryStore {
    /// Creates an empty, idle store backed by `backend`.
    pub fn new(backend: MockBackend) -> Self {
        let (revision, _) = watch::channel(0);
        InventoryStore {
            state: InventoryState::new(),
            selectors: Selectors::new(),
            backend,
            revision,
            next_ticket: 1,
        }
    }

    /// Creates a store whose backend follows `config`.
    pub fn from_config(config: &StockroomConfig) -> Self {
        Self::new(MockBackend::new(config.backend.clone()))
    }

    // =========================================================================
    // Bulk Load
    // =========================================================================

    /// Replaces the collection with `count` products from the backend.
    ///
    /// On failure the previous products stay in place, `request_status`
    /// becomes `Failed` and `request_error` holds the message. Retry by
    /// calling `load` again.
    pub async fn load(&mut self, count: usize) -> StoreResult<usize> {
        let ticket = self.begin_load();
        let result = self.backend.fetch_products(count).await;
        self.finish_load(ticket, result)
    }

    /// Marks a load as in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        let ticket = LoadTicket(self.next_ticket);
        self.next_ticket += 1;

        info!(ticket = ticket.0, previous = %self.state.request_status(), "Loading products");
        self.state.load_started();
        self.notify();
        ticket
    }

    /// Commits a fetch result. The last call wins.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: StoreResult<Vec<Product>>,
    ) -> StoreResult<usize> {
        let outcome = match result {
            Ok(products) => {
                self.state.load_succeeded(products);
                info!(ticket = ticket.0, count = self.state.len(), "Products loaded");
                Ok(self.state.len())
            }
            Err(err) => {
                warn!(
                    ticket = ticket.0,
                    error = %err,
                    kept = self.state.len(),
                    "Product load failed"
                );
                self.state.load_failed(err.to_string());
                Err(err)
            }
        };
        self.notify();
        outcome
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Validates and inserts a new product with a fresh id and timestamp.
    pub fn add(&mut self, draft: ProductDraft) -> StoreResult<Product> {
        validate_draft(&draft)?;
        self.ensure_sku_free(&draft.sku, None)?;

        let id = self.fresh_id();
        debug!(id = %id, sku = %draft.sku.trim(), "Adding product");

        let product = Product::from_draft(id, draft, Utc::now());
        self.state.insert(product.clone());
        self.notify();
        Ok(product)
    }

    /// Merges `changes` into an existing product.
    pub fn update(&mut self, id: &str, changes: ProductChanges) -> StoreResult<Product> {
        if !self.state.contains(id) {
            return Err(StoreError::product_not_found(id));
        }
        validate_changes(&changes)?;
        if let Some(sku) = &changes.sku {
            self.ensure_sku_free(sku, Some(id))?;
        }

        debug!(id = %id, "Updating product");
        self.state.apply_changes(id, &changes, Utc::now());
        self.notify();
        self.product(id)
    }

    /// Removes a product. Absent ids are a no-op and return `None`.
    pub fn remove(&mut self, id: &str) -> Option<Product> {
        let removed = self.state.remove(id);
        match &removed {
            Some(product) => {
                debug!(id = %id, sku = %product.sku, "Removed product");
                self.notify();
            }
            None => debug!(id = %id, "Remove ignored, product not present"),
        }
        removed
    }

    /// Sets the quantity on hand; the stock status follows.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> StoreResult<Product> {
        if !self.state.contains(id) {
            return Err(StoreError::product_not_found(id));
        }
        validate_quantity(quantity)?;

        debug!(id = %id, quantity, "Updating quantity");
        self.state.set_quantity(id, quantity, Utc::now());
        self.notify();
        self.product(id)
    }

    // =========================================================================
    // View Inputs
    // =========================================================================

    pub fn set_filter(&mut self, update: FilterUpdate) {
        debug!(?update, "Setting filter");
        self.state.set_filter(update);
        self.notify();
    }

    pub fn clear_filter(&mut self) {
        self.state.clear_filter();
        self.notify();
    }

    pub fn set_sort(&mut self, key: SortKey, order: SortOrder) {
        debug!(?key, ?order, "Setting sort");
        self.state.set_sort(key, order);
        self.notify();
    }

    // =========================================================================
    // Selectors
    // =========================================================================

    pub fn all_products(&self) -> Arc<Vec<Product>> {
        self.selectors.all_products(&self.state)
    }

    pub fn filtered_products(&self) -> Arc<Vec<Product>> {
        self.selectors.filtered_products(&self.state)
    }

    pub fn statistics(&self) -> Arc<Statistics> {
        self.selectors.statistics(&self.state)
    }

    pub fn selector_computations(&self) -> SelectorComputations {
        self.selectors.computations()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.state.get(id)
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn request_status(&self) -> RequestStatus {
        self.state.request_status()
    }

    pub fn request_error(&self) -> Option<&str> {
        self.state.request_error()
    }

    pub fn filter(&self) -> &ProductFilter {
        self.state.filter()
    }

    pub fn sort(&self) -> (SortKey, SortOrder) {
        (self.state.sort_by(), self.state.sort_order())
    }

    pub fn state(&self) -> &InventoryState {
        &self.state
    }

    pub fn backend(&self) -> &MockBackend {
        &self.backend
    }

    /// Current state revision; bumps on every change.
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Receiver that observes every revision bump.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn notify(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }

    fn product(&self, id: &str) -> StoreResult<Product> {
        self.state
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::product_not_found(id))
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.state.contains(&id) {
                return id;
            }
        }
    }

    fn ensure_sku_free(&self, sku: &str, except_id: Option<&str>) -> StoreResult<()> {
        if self.state.sku_in_use(sku, except_id) {
            return Err(ValidationError::Duplicate {
                field: "sku".to_string(),
                value: sku.trim().to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for InventoryStore {
    fn default() -> Self {
        InventoryStore::new(MockBackend::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendSettings;
    use stockroom_core::StockStatus;

    fn store() -> InventoryStore {
        InventoryStore::new(MockBackend::new(BackendSettings::reliable(11)))
    }

    fn draft(name: &str, sku: &str) -> ProductDraft {
        ProductDraft::new(name, sku, "Books")
            .with_price_cents(1000)
            .with_quantity(5)
            .with_min_stock(10)
    }

    #[test]
    fn test_add_computes_low_stock() {
        let mut store = store();
        let product = store.add(draft("X", "S1")).unwrap();
        assert_eq!(product.status(), StockStatus::LowStock);
        assert_eq!(store.get(&product.id), Some(&product));
        assert_eq!(store.request_status(), RequestStatus::Idle);
    }

    #[test]
    fn test_add_rejects_duplicate_sku() {
        let mut store = store();
        store.add(draft("X", "S1")).unwrap();
        let err = store.add(draft("Y", " S1 ")).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::Duplicate { .. })
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_unknown_is_not_found() {
        let mut store = store();
        let err = store.update("missing", ProductChanges::default()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        let err = store.update_quantity("missing", 3).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_invalid_update_leaves_product_untouched() {
        let mut store = store();
        let original = store.add(draft("X", "S1")).unwrap();
        let changes = ProductChanges {
            name: Some("Renamed".into()),
            price_cents: Some(-5),
            ..Default::default()
        };
        assert!(store.update(&original.id, changes).is_err());
        assert_eq!(store.get(&original.id), Some(&original));

        assert!(store.update_quantity(&original.id, -1).is_err());
        assert_eq!(store.get(&original.id), Some(&original));
    }

    #[test]
    fn test_update_allows_keeping_own_sku() {
        let mut store = store();
        let product = store.add(draft("X", "S1")).unwrap();
        let changes = ProductChanges {
            sku: Some("S1".into()),
            quantity: Some(50),
            ..Default::default()
        };
        let updated = store.update(&product.id, changes).unwrap();
        assert_eq!(updated.status(), StockStatus::InStock);
        assert!(updated.updated_at >= product.updated_at);
    }

    #[test]
    fn test_mutations_bump_revision_and_keep_request_status() {
        let mut store = store();
        let rx = store.subscribe();
        let start = store.revision();

        let product = store.add(draft("X", "S1")).unwrap();
        store.update_quantity(&product.id, 0).unwrap();
        store.set_sort(SortKey::Price, SortOrder::Desc);
        store.remove(&product.id);

        assert_eq!(store.revision(), start + 4);
        assert!(rx.has_changed().unwrap());
        assert_eq!(store.request_status(), RequestStatus::Idle);

        // No-op remove does not notify.
        store.remove(&product.id);
        assert_eq!(store.revision(), start + 4);
    }

    #[tokio::test]
    async fn test_load_with_reliable_backend() {
        let mut store = store();
        assert_eq!(store.load(40).await.unwrap(), 40);
        assert_eq!(store.request_status(), RequestStatus::Succeeded);
        assert!(store.request_error().is_none());
        assert!(store.state().check_invariants().is_ok());
    }
}
