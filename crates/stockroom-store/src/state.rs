//! # Inventory State
//!
//! The normalized collection and the transitions that change it.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  entities: { id → Product }        O(1) point lookup                   │
//! │  order:    [id, id, id, ...]       sorted by (name, id)                │
//! │                                                                         │
//! │  request_status / request_error    bulk load lifecycle                 │
//! │  filter / sort_by / sort_order     inputs of the derived views         │
//! │  entities_version                  bumped on every entity mutation     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `order` and the keys of `entities` are the same set (bijection)
//! - `order` is sorted by [`collection_order`]
//! - `request_error` is `Some` only while `request_status == Failed`
//!
//! Transitions here assume their input is already validated; the
//! [`InventoryStore`](crate::store::InventoryStore) facade does that.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

use stockroom_core::{Product, ProductChanges, RequestStatus};

use crate::filter::{collection_order, FilterUpdate, ProductFilter, SortKey, SortOrder};

#[derive(Debug, Clone, Default, Serialize)]
pub struct InventoryState {
    entities: HashMap<String, Product>,
    order: Vec<String>,
    request_status: RequestStatus,
    request_error: Option<String>,
    filter: ProductFilter,
    sort_by: SortKey,
    sort_order: SortOrder,
    entities_version: u64,
}

impl InventoryState {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.entities.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids in collection order.
    pub fn ids(&self) -> &[String] {
        &self.order
    }

    /// Products in collection order.
    pub fn products(&self) -> impl Iterator<Item = &Product> + '_ {
        self.order.iter().filter_map(|id| self.entities.get(id))
    }

    pub fn request_status(&self) -> RequestStatus {
        self.request_status
    }

    pub fn request_error(&self) -> Option<&str> {
        self.request_error.as_deref()
    }

    pub fn filter(&self) -> &ProductFilter {
        &self.filter
    }

    pub fn sort_by(&self) -> SortKey {
        self.sort_by
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn entities_version(&self) -> u64 {
        self.entities_version
    }

    /// True if another product (not `except_id`) already uses `sku`.
    pub fn sku_in_use(&self, sku: &str, except_id: Option<&str>) -> bool {
        let sku = sku.trim();
        self.entities
            .values()
            .any(|p| p.sku == sku && Some(p.id.as_str()) != except_id)
    }

    // =========================================================================
    // Bulk Load
    // =========================================================================

    pub fn load_started(&mut self) {
        self.request_status = RequestStatus::Loading;
        self.request_error = None;
    }

    /// Replaces the whole collection. Duplicate ids keep the last record.
    pub fn load_succeeded(&mut self, products: Vec<Product>) {
        let mut entities = HashMap::with_capacity(products.len());
        for product in products {
            entities.insert(product.id.clone(), product);
        }

        let mut sorted: Vec<&Product> = entities.values().collect();
        sorted.sort_by(|a, b| collection_order(a, b));
        self.order = sorted.into_iter().map(|p| p.id.clone()).collect();

        self.entities = entities;
        self.request_status = RequestStatus::Succeeded;
        self.request_error = None;
        self.entities_version += 1;
    }

    /// Records a failed load. The collection is left untouched.
    pub fn load_failed(&mut self, message: impl Into<String>) {
        self.request_status = RequestStatus::Failed;
        self.request_error = Some(message.into());
    }

    // =========================================================================
    // Entity Mutations
    // =========================================================================

    /// Inserts a product at its sorted position, replacing any product with
    /// the same id.
    pub fn insert(&mut self, product: Product) {
        if self.contains(&product.id) {
            self.detach(&product.id);
        }
        let position = self.insertion_point(&product);
        self.order.insert(position, product.id.clone());
        self.entities.insert(product.id.clone(), product);
        self.entities_version += 1;
    }

    /// Removes a product. Returns `None` (and changes nothing) if absent.
    pub fn remove(&mut self, id: &str) -> Option<Product> {
        let product = self.detach(id)?;
        self.entities_version += 1;
        Some(product)
    }

    /// Merges changes into a product. Returns `false` if the id is unknown.
    pub fn apply_changes(
        &mut self,
        id: &str,
        changes: &ProductChanges,
        now: DateTime<Utc>,
    ) -> bool {
        if changes.renames() {
            // The sort key moves, so take the product out and re-insert it.
            let Some(mut product) = self.detach(id) else {
                return false;
            };
            product.apply_changes(changes, now);
            let position = self.insertion_point(&product);
            self.order.insert(position, product.id.clone());
            self.entities.insert(product.id.clone(), product);
        } else {
            let Some(product) = self.entities.get_mut(id) else {
                return false;
            };
            product.apply_changes(changes, now);
        }
        self.entities_version += 1;
        true
    }

    /// Sets the quantity on hand. Returns `false` if the id is unknown.
    pub fn set_quantity(&mut self, id: &str, quantity: i64, now: DateTime<Utc>) -> bool {
        let Some(product) = self.entities.get_mut(id) else {
            return false;
        };
        product.set_quantity(quantity, now);
        self.entities_version += 1;
        true
    }

    // =========================================================================
    // View Inputs
    // =========================================================================

    pub fn set_filter(&mut self, update: FilterUpdate) {
        self.filter.apply(update);
    }

    pub fn clear_filter(&mut self) {
        self.filter = ProductFilter::default();
    }

    pub fn set_sort(&mut self, key: SortKey, order: SortOrder) {
        self.sort_by = key;
        self.sort_order = order;
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn insertion_point(&self, product: &Product) -> usize {
        match self.order.binary_search_by(|probe| self.probe_order(probe, product)) {
            Ok(position) | Err(position) => position,
        }
    }

    fn position_of(&self, product: &Product) -> Option<usize> {
        self.order
            .binary_search_by(|probe| self.probe_order(probe, product))
            .ok()
    }

    fn probe_order(&self, probe: &str, target: &Product) -> Ordering {
        match self.entities.get(probe) {
            Some(existing) => collection_order(existing, target),
            None => Ordering::Less,
        }
    }

    /// Removes a product from both `entities` and `order` without bumping the
    /// version.
    fn detach(&mut self, id: &str) -> Option<Product> {
        let position = self
            .entities
            .get(id)
            .and_then(|product| self.position_of(product));
        if let Some(position) = position {
            self.order.remove(position);
        } else if let Some(position) = self.order.iter().position(|existing| existing == id) {
            self.order.remove(position);
        }
        self.entities.remove(id)
    }

    /// Checks every structural invariant. Used by tests.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.order.len() != self.entities.len() {
            return Err(format!(
                "order has {} ids but entities has {}",
                self.order.len(),
                self.entities.len()
            ));
        }

        for id in &self.order {
            match self.entities.get(id) {
                Some(product) if product.id == *id => {}
                Some(product) => {
                    return Err(format!("key {} maps to product {}", id, product.id));
                }
                None => return Err(format!("id {} in order but not in entities", id)),
            }
        }

        for pair in self.order.windows(2) {
            let (a, b) = (&self.entities[&pair[0]], &self.entities[&pair[1]]);
            if collection_order(a, b) != Ordering::Less {
                return Err(format!("order not sorted at {} / {}", a.id, b.id));
            }
        }

        let failed = self.request_status == RequestStatus::Failed;
        if failed != self.request_error.is_some() {
            return Err(format!(
                "request_error {:?} inconsistent with status {}",
                self.request_error, self.request_status
            ));
        }

        Ok(())
    }
}
