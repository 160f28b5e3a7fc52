//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::{CatalogClient, CatalogStore};
use crate::config::StorefrontConfig;
use crate::order_link::OrderLink;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the catalog store, the order link builder, and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogStore,
    order_link: OrderLink,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let catalog = CatalogStore::new(
            CatalogClient::new(&config.catalog),
            config.catalog.revalidate,
        );
        let order_link = OrderLink::new(&config.order);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                order_link,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog store.
    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.inner.catalog
    }

    /// Get a reference to the order link builder.
    #[must_use]
    pub fn order_link(&self) -> &OrderLink {
        &self.inner.order_link
    }
}
