//! Immutable catalog snapshots.
//!
//! A [`Catalog`] is built once per load and shared behind an `Arc`. Derived
//! views (the category list, the content version) are computed at construction
//! so every reader of the same snapshot sees the same values.

use std::collections::HashSet;
use std::hash::{DefaultHasher, Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::types::ProductId;

/// Content fingerprint of a catalog.
///
/// Two loads with identical rows share a version, which lets a shopper's
/// category visibility survive a revalidation that changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogVersion(u64);

impl CatalogVersion {
    fn of(products: &[Product]) -> Self {
        let mut hasher = DefaultHasher::new();
        products.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// The full set of products available at a point in time.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<String>,
    version: CatalogVersion,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    /// Build a snapshot from loaded products, stamped with the current time.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self::with_load_time(products, Utc::now())
    }

    /// Build a snapshot with an explicit load time.
    #[must_use]
    pub fn with_load_time(products: Vec<Product>, loaded_at: DateTime<Utc>) -> Self {
        let categories = derive_categories(&products);
        let version = CatalogVersion::of(&products);
        Self {
            products,
            categories,
            version,
            loaded_at,
        }
    }

    /// An empty catalog, used when nothing could be loaded.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub const fn version(&self) -> CatalogVersion {
        self.version
    }

    #[must_use]
    pub const fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Distinct category labels of `products`, in the order they first appear.
#[must_use]
pub fn derive_categories(products: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    products
        .iter()
        .filter(|product| seen.insert(product.category.as_str()))
        .map(|product| product.category.clone())
        .collect()
}
