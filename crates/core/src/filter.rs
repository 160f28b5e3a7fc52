//! Search and category filtering.
//!
//! Filtering is a pure, order-preserving projection of the catalog. Both
//! constraints are conjunctive; an empty search term or no selected category
//! imposes nothing.

use serde::{Deserialize, Serialize};

use crate::product::Product;

/// Transient filter state from the listing controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search_term: String,
    pub selected_category: Option<String>,
}

impl FilterCriteria {
    /// Build criteria from raw control values.
    ///
    /// An empty category string means "all categories", the same as `None`.
    #[must_use]
    pub fn new(search_term: impl Into<String>, selected_category: Option<String>) -> Self {
        Self {
            search_term: search_term.into(),
            selected_category: selected_category.filter(|category| !category.is_empty()),
        }
    }

    /// Whether the criteria constrain nothing.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.search_term.is_empty() && self.selected_category.is_none()
    }

    /// Keep the products matching these criteria, preserving catalog order.
    #[must_use]
    pub fn apply<'a>(&self, catalog: &'a [Product]) -> Vec<&'a Product> {
        let needle = self.search_term.to_lowercase();
        catalog
            .iter()
            .filter(|product| self.matches_folded(product, &needle))
            .collect()
    }

    /// Whether a single product passes the filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_folded(product, &self.search_term.to_lowercase())
    }

    fn matches_folded(&self, product: &Product, needle: &str) -> bool {
        let category_ok = self
            .selected_category
            .as_deref()
            .is_none_or(|category| product.category == category);
        category_ok && (needle.is_empty() || product.title_contains_folded(needle))
    }
}
