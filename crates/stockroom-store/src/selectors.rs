//! # Derived Views
//!
//! Memoized read-only projections of [`InventoryState`].
//!
//! ## Cache Keys
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Selector            Declared inputs (cache key)                        │
//! │  ─────────────────   ─────────────────────────────────────────────────  │
//! │  all_products        entities_version                                   │
//! │  filtered_products   entities_version, filter, sort_by, sort_order      │
//! │  statistics          entities_version                                   │
//! │                                                                         │
//! │  Same key → cached Arc returned, nothing recomputed                     │
//! │  Key changed → recompute once, replace the cache                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Statistics always cover the whole collection, not the filtered view.

use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::sync::Arc;

use stockroom_core::{Money, Product, StockStatus};

use crate::filter::{compare_directed, ProductFilter, SortKey, SortOrder};
use crate::state::InventoryState;

// =============================================================================
// Memo
// =============================================================================

/// Caches one value together with the key it was computed from.
#[derive(Debug)]
pub struct Memo<K, V> {
    entry: Option<(K, V)>,
    computations: u64,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Memo {
            entry: None,
            computations: 0,
        }
    }
}

impl<K: PartialEq, V: Clone> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value if `key` matches, otherwise runs `compute`
    /// and caches its result under `key`.
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> V {
        if let Some((cached_key, value)) = &self.entry {
            if *cached_key == key {
                return value.clone();
            }
        }

        let value = compute();
        self.computations += 1;
        self.entry = Some((key, value.clone()));
        value
    }

    /// Number of times `compute` has run.
    pub fn computations(&self) -> u64 {
        self.computations
    }
}

// =============================================================================
// Statistics
// =============================================================================

/// Aggregates over the whole collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
    /// Sum of price × quantity.
    pub total_value: Money,
    /// Distinct category labels, sorted.
    pub categories: BTreeSet<String>,
}

impl Statistics {
    pub fn from_products<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        let mut stats = Statistics::default();
        for product in products {
            stats.total += 1;
            match product.status() {
                StockStatus::InStock => stats.in_stock += 1,
                StockStatus::LowStock => stats.low_stock += 1,
                StockStatus::OutOfStock => stats.out_of_stock += 1,
            }
            stats.total_value += product.stock_value();
            if !stats.categories.contains(&product.category) {
                stats.categories.insert(product.category.clone());
            }
        }
        stats
    }

    /// Count for one status bucket.
    pub fn count(&self, status: StockStatus) -> usize {
        match status {
            StockStatus::InStock => self.in_stock,
            StockStatus::LowStock => self.low_stock,
            StockStatus::OutOfStock => self.out_of_stock,
        }
    }
}

// =============================================================================
// Selectors
// =============================================================================

type FilteredKey = (u64, ProductFilter, SortKey, SortOrder);

/// How many times each selector has recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectorComputations {
    pub all_products: u64,
    pub filtered_products: u64,
    pub statistics: u64,
}

/// Memo caches for one [`InventoryState`].
///
/// Interior mutability lets reads stay `&self`; the store is single-owner,
/// so a `RefCell` is enough.
#[derive(Debug, Default)]
pub struct Selectors {
    all: RefCell<Memo<u64, Arc<Vec<Product>>>>,
    filtered: RefCell<Memo<FilteredKey, Arc<Vec<Product>>>>,
    statistics: RefCell<Memo<u64, Arc<Statistics>>>,
}

impl Selectors {
    pub fn new() -> Self {
        Self::default()
    }

    /// All products in collection order.
    pub fn all_products(&self, state: &InventoryState) -> Arc<Vec<Product>> {
        self.all
            .borrow_mut()
            .get_or_compute(state.entities_version(), || {
                Arc::new(state.products().cloned().collect())
            })
    }

    /// Products passing the active filter, sorted by the active sort.
    pub fn filtered_products(&self, state: &InventoryState) -> Arc<Vec<Product>> {
        let all = self.all_products(state);
        let key = (
            state.entities_version(),
            state.filter().clone(),
            state.sort_by(),
            state.sort_order(),
        );

        self.filtered.borrow_mut().get_or_compute(key, || {
            let filter = state.filter();
            let (sort_by, sort_order) = (state.sort_by(), state.sort_order());

            // The collection is already in (name asc, id) order.
            if filter.is_identity() && sort_by == SortKey::Name && sort_order == SortOrder::Asc {
                return Arc::clone(&all);
            }

            let needle = filter.search_term.trim().to_lowercase();
            let mut products: Vec<Product> = all
                .iter()
                .filter(|p| filter.matches_with_needle(p, &needle))
                .cloned()
                .collect();
            products.sort_by(|a, b| compare_directed(a, b, sort_by, sort_order));
            Arc::new(products)
        })
    }

    /// Aggregates over all products (ignores the filter).
    pub fn statistics(&self, state: &InventoryState) -> Arc<Statistics> {
        self.statistics
            .borrow_mut()
            .get_or_compute(state.entities_version(), || {
                Arc::new(Statistics::from_products(state.products()))
            })
    }

    pub fn computations(&self) -> SelectorComputations {
        SelectorComputations {
            all_products: self.all.borrow().computations(),
            filtered_products: self.filtered.borrow().computations(),
            statistics: self.statistics.borrow().computations(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{CategoryFilter, FilterUpdate, StatusFilter};
    use chrono::Utc;
    use stockroom_core::ProductDraft;

    fn product(id: &str, name: &str, category: &str, qty: i64) -> Product {
        Product::from_draft(
            id,
            ProductDraft::new(name, format!("SKU-{}", id), category)
                .with_price_cents(250)
                .with_quantity(qty)
                .with_min_stock(10),
            Utc::now(),
        )
    }

    fn seeded_state() -> InventoryState {
        let mut state = InventoryState::new();
        state.insert(product("1", "Atlas", "Books", 0));
        state.insert(product("2", "Blender", "Home & Garden", 4));
        state.insert(product("3", "Cookbook", "Books", 40));
        state
    }

    #[test]
    fn test_memo_recomputes_only_on_key_change() {
        let mut memo: Memo<u64, u64> = Memo::new();
        assert_eq!(memo.get_or_compute(1, || 10), 10);
        assert_eq!(memo.get_or_compute(1, || 99), 10);
        assert_eq!(memo.computations(), 1);

        assert_eq!(memo.get_or_compute(2, || 20), 20);
        assert_eq!(memo.computations(), 2);
    }

    #[test]
    fn test_selectors_are_cached_until_inputs_change() {
        let mut state = seeded_state();
        let selectors = Selectors::new();

        let first = selectors.all_products(&state);
        let second = selectors.all_products(&state);
        assert!(Arc::ptr_eq(&first, &second));
        selectors.statistics(&state);
        selectors.statistics(&state);
        assert_eq!(
            selectors.computations(),
            SelectorComputations {
                all_products: 1,
                filtered_products: 0,
                statistics: 1,
            }
        );

        // Filter change: only the filtered view recomputes.
        state.set_filter(FilterUpdate::Category(CategoryFilter::Only("Books".into())));
        selectors.filtered_products(&state);
        selectors.filtered_products(&state);
        selectors.statistics(&state);
        let counts = selectors.computations();
        assert_eq!(counts.filtered_products, 1);
        assert_eq!(counts.statistics, 1);
        assert_eq!(counts.all_products, 1);

        // Entity change: everything recomputes once.
        state.set_quantity("1", 5, Utc::now());
        selectors.filtered_products(&state);
        selectors.statistics(&state);
        let counts = selectors.computations();
        assert_eq!(counts.all_products, 2);
        assert_eq!(counts.filtered_products, 2);
        assert_eq!(counts.statistics, 2);
    }

    #[test]
    fn test_identity_filter_equals_all_products() {
        let state = seeded_state();
        let selectors = Selectors::new();
        assert_eq!(
            *selectors.filtered_products(&state),
            *selectors.all_products(&state)
        );
    }

    #[test]
    fn test_filtered_view_is_sorted_by_active_sort() {
        let mut state = seeded_state();
        let selectors = Selectors::new();

        state.set_sort(SortKey::Quantity, SortOrder::Desc);
        let ids: Vec<String> = selectors
            .filtered_products(&state)
            .iter()
            .map(|p| p.id.clone())
            .collect();
        assert_eq!(ids, vec!["3", "2", "1"]);

        state.set_filter(FilterUpdate::Status(StatusFilter::Only(StockStatus::LowStock)));
        let filtered = selectors.filtered_products(&state);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "2");
    }

    #[test]
    fn test_statistics_ignore_filter() {
        let mut state = seeded_state();
        let selectors = Selectors::new();
        state.set_filter(FilterUpdate::SearchTerm("atlas".into()));

        assert_eq!(selectors.filtered_products(&state).len(), 1);
        let stats = selectors.statistics(&state);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.out_of_stock, 1);
        assert_eq!(stats.low_stock, 1);
        assert_eq!(stats.in_stock, 1);
        assert_eq!(stats.count(StockStatus::InStock), 1);
        assert_eq!(stats.total_value.cents(), 250 * 44);
        let categories: Vec<&str> = stats.categories.iter().map(String::as_str).collect();
        assert_eq!(categories, vec!["Books", "Home & Garden"]);
    }
}
