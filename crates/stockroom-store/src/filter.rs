//! # Filtering and Sorting
//!
//! Typed replacements for "filter by key/value" and "sort by field name".
//!
//! ## Filter Predicates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  product passes ⇔  category matches                                    │
//! │                 ∧  status matches                                      │
//! │                 ∧  (search_term empty ∨ name/sku contains it,          │
//! │                     case-insensitive)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use stockroom_core::validation::validate_search_term;
use stockroom_core::{Product, StockStatus, ValidationError};

// =============================================================================
// Category / Status Filters
// =============================================================================

/// Category predicate. Parses `"all"` as [`CategoryFilter::All`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => product.category == *category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(s.to_string()))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

/// Stock status predicate. Parses `"all"` as [`StatusFilter::All`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Only(StockStatus),
}

impl StatusFilter {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => product.status() == *status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            Ok(StatusFilter::Only(s.parse()?))
        }
    }
}

// =============================================================================
// Product Filter
// =============================================================================

/// The active filter. The default passes every product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ProductFilter {
    pub category: CategoryFilter,
    pub status: StatusFilter,
    pub search_term: String,
}

impl ProductFilter {
    /// True when the filter passes every product.
    pub fn is_identity(&self) -> bool {
        self.category == CategoryFilter::All
            && self.status == StatusFilter::All
            && self.search_term.trim().is_empty()
    }

    /// Applies all three predicates (AND).
    pub fn matches(&self, product: &Product) -> bool {
        let needle = self.search_term.trim().to_lowercase();
        self.matches_with_needle(product, &needle)
    }

    /// Same as [`matches`](Self::matches) with a pre-lowercased search term,
    /// so filtering a whole collection lowercases the term once.
    pub(crate) fn matches_with_needle(&self, product: &Product, needle: &str) -> bool {
        self.category.matches(product)
            && self.status.matches(product)
            && product.matches_search(needle)
    }

    /// Applies one field update.
    pub fn apply(&mut self, update: FilterUpdate) {
        match update {
            FilterUpdate::Category(category) => self.category = category,
            FilterUpdate::Status(status) => self.status = status,
            FilterUpdate::SearchTerm(term) => self.search_term = term,
        }
    }
}

/// A single-field filter change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "key", content = "value")]
pub enum FilterUpdate {
    Category(CategoryFilter),
    Status(StatusFilter),
    SearchTerm(String),
}

impl FilterUpdate {
    /// Parses the untyped `(key, value)` form the presentation layer sends.
    ///
    /// ```rust
    /// use stockroom_store::filter::{CategoryFilter, FilterUpdate};
    ///
    /// let update = FilterUpdate::parse("category", "Books").unwrap();
    /// assert_eq!(update, FilterUpdate::Category(CategoryFilter::Only("Books".into())));
    /// ```
    pub fn parse(key: &str, value: &str) -> Result<Self, ValidationError> {
        match key.trim().to_lowercase().as_str() {
            "category" => Ok(FilterUpdate::Category(value.parse()?)),
            "status" => Ok(FilterUpdate::Status(value.parse()?)),
            "search" | "search_term" | "searchterm" => {
                Ok(FilterUpdate::SearchTerm(validate_search_term(value)?))
            }
            other => Err(ValidationError::InvalidFormat {
                field: "filter".to_string(),
                reason: format!("unknown filter key '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Sorting
// =============================================================================

/// Fields the derived view can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Name,
    Sku,
    Category,
    Price,
    Quantity,
    MinStock,
    Status,
    UpdatedAt,
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "sku" => Ok(SortKey::Sku),
            "category" => Ok(SortKey::Category),
            "price" => Ok(SortKey::Price),
            "quantity" => Ok(SortKey::Quantity),
            "min_stock" | "minstock" => Ok(SortKey::MinStock),
            "status" => Ok(SortKey::Status),
            "updated_at" | "updatedat" | "last_updated" => Ok(SortKey::UpdatedAt),
            other => Err(ValidationError::InvalidFormat {
                field: "sort_by".to_string(),
                reason: format!("unknown sort key '{}'", other),
            }),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            other => Err(ValidationError::InvalidFormat {
                field: "sort_order".to_string(),
                reason: format!("unknown sort order '{}'", other),
            }),
        }
    }
}

/// Compares two products by `key`, ascending. Ties fall back to the id so
/// the result is a total order.
pub fn compare(a: &Product, b: &Product, key: SortKey) -> Ordering {
    let primary = match key {
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Sku => a.sku.cmp(&b.sku),
        SortKey::Category => a.category.cmp(&b.category),
        SortKey::Price => a.price_cents.cmp(&b.price_cents),
        SortKey::Quantity => a.quantity.cmp(&b.quantity),
        SortKey::MinStock => a.min_stock.cmp(&b.min_stock),
        SortKey::Status => a.status().cmp(&b.status()),
        SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

/// Compares by `key` in the given direction.
pub fn compare_directed(a: &Product, b: &Product, key: SortKey, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => compare(a, b, key),
        SortOrder::Desc => compare(b, a, key),
    }
}

/// The collection's own ordering: name ascending, then id.
#[inline]
pub fn collection_order(a: &Product, b: &Product) -> Ordering {
    compare(a, b, SortKey::Name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stockroom_core::ProductDraft;

    fn product(id: &str, name: &str, sku: &str, category: &str, qty: i64) -> Product {
        Product::from_draft(
            id,
            ProductDraft::new(name, sku, category)
                .with_price_cents(100)
                .with_quantity(qty)
                .with_min_stock(10),
            Utc::now(),
        )
    }

    #[test]
    fn test_parse_filters() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("ALL".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "low-stock".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(StockStatus::LowStock)
        );
        assert!("nope".parse::<StatusFilter>().is_err());
        assert!(FilterUpdate::parse("colour", "red").is_err());
        assert_eq!(
            FilterUpdate::parse("searchTerm", " Lamp ").unwrap(),
            FilterUpdate::SearchTerm("Lamp".into())
        );
        assert!(FilterUpdate::parse("search", &"x".repeat(200)).is_err());
    }

    #[test]
    fn test_predicates_are_and_combined() {
        let lamp = product("1", "Desk Lamp", "LAMP-1", "Home & Garden", 5);
        let mut filter = ProductFilter::default();
        assert!(filter.is_identity());
        assert!(filter.matches(&lamp));

        filter.apply(FilterUpdate::SearchTerm("lamp".into()));
        assert!(filter.matches(&lamp));

        filter.apply(FilterUpdate::Status(StatusFilter::Only(StockStatus::LowStock)));
        assert!(filter.matches(&lamp));

        filter.apply(FilterUpdate::Category(CategoryFilter::Only("Books".into())));
        assert!(!filter.matches(&lamp));
        assert!(!filter.is_identity());
    }

    #[test]
    fn test_search_is_case_insensitive_on_name_or_sku() {
        let lamp = product("1", "Desk Lamp", "LAMP-1", "Home & Garden", 5);
        let mut filter = ProductFilter::default();

        filter.apply(FilterUpdate::SearchTerm("DESK".into()));
        assert!(filter.matches(&lamp));

        filter.apply(FilterUpdate::SearchTerm("lamp-1".into()));
        assert!(filter.matches(&lamp));

        filter.apply(FilterUpdate::SearchTerm("chair".into()));
        assert!(!filter.matches(&lamp));
    }

    #[test]
    fn test_compare_ties_break_on_id() {
        let a = product("a", "Same", "S-1", "Books", 1);
        let b = product("b", "Same", "S-2", "Books", 1);
        assert_eq!(compare(&a, &b, SortKey::Name), Ordering::Less);
        assert_eq!(compare(&a, &b, SortKey::Quantity), Ordering::Less);
        assert_eq!(compare(&a, &b, SortKey::Sku), Ordering::Less);
        assert_eq!(compare_directed(&a, &b, SortKey::Name, SortOrder::Desc), Ordering::Greater);
    }

    #[test]
    fn test_compare_by_status_uses_severity() {
        let empty = product("1", "Z", "Z-1", "Books", 0);
        let low = product("2", "Y", "Y-1", "Books", 3);
        let full = product("3", "X", "X-1", "Books", 50);
        let mut items = vec![full.clone(), empty.clone(), low.clone()];
        items.sort_by(|a, b| compare(a, b, SortKey::Status));
        let ids: Vec<_> = items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!("price".parse::<SortKey>().unwrap(), SortKey::Price);
        assert_eq!("updatedAt".parse::<SortKey>().unwrap(), SortKey::UpdatedAt);
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("sideways".parse::<SortOrder>().is_err());
    }
}
