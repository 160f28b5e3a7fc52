//! Catalog products.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// One catalog row.
///
/// Products are immutable once loaded. A catalog reload replaces the whole set
/// instead of editing individual fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: Price,
    /// URL or path of the display image.
    pub image: String,
    /// Free-text grouping label, compared case-sensitively.
    pub category: String,
}

impl Product {
    /// Whether the title contains `needle`, ignoring case.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn title_contains_folded(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
    }
}
