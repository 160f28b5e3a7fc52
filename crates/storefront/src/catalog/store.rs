//! Cached catalog snapshots with stale fallback.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use quimica_core::Catalog;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::{CatalogClient, CatalogError};

/// Cache key for catalog snapshots.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
enum CacheKey {
    Catalog,
}

/// Shared holder of the current catalog snapshot.
///
/// Snapshots are immutable and swapped as a whole, so a request that took a
/// snapshot keeps reading it even if a reload lands mid-request.
#[derive(Clone)]
pub struct CatalogStore {
    inner: Arc<CatalogStoreInner>,
}

struct CatalogStoreInner {
    client: CatalogClient,
    cache: Cache<CacheKey, Arc<Catalog>>,
    last_good: RwLock<Option<Arc<Catalog>>>,
}

impl CatalogStore {
    /// Create a store whose snapshots expire after `revalidate`.
    #[must_use]
    pub fn new(client: CatalogClient, revalidate: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(revalidate)
            .build();

        Self {
            inner: Arc::new(CatalogStoreInner {
                client,
                cache,
                last_good: RwLock::new(None),
            }),
        }
    }

    /// The current catalog, reloading it if the cached copy has expired.
    ///
    /// Concurrent callers share one in-flight load. If the reload fails the
    /// last good snapshot is served instead.
    ///
    /// # Errors
    ///
    /// Returns the load error only when no snapshot has ever loaded.
    pub async fn current(&self) -> Result<Arc<Catalog>, Arc<CatalogError>> {
        let client = self.inner.client.clone();
        let loaded = self
            .inner
            .cache
            .try_get_with(CacheKey::Catalog, async move { client.load().await.map(Arc::new) })
            .await;

        match loaded {
            Ok(catalog) => {
                self.remember(&catalog).await;
                Ok(catalog)
            }
            Err(err) => {
                let stale = self.inner.last_good.read().await.clone();
                if let Some(catalog) = stale {
                    warn!(error = %err, "catalog reload failed, serving last good snapshot");
                    Ok(catalog)
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Install a snapshot directly, bypassing the feed.
    pub async fn seed(&self, catalog: Catalog) -> Arc<Catalog> {
        let catalog = Arc::new(catalog);
        self.inner
            .cache
            .insert(CacheKey::Catalog, Arc::clone(&catalog))
            .await;
        self.remember(&catalog).await;
        catalog
    }

    /// The last snapshot that loaded successfully, without triggering a load.
    pub async fn snapshot(&self) -> Option<Arc<Catalog>> {
        self.inner.last_good.read().await.clone()
    }

    /// Record `catalog` as the last good snapshot. Returns whether it replaced
    /// a different one.
    async fn remember(&self, catalog: &Arc<Catalog>) -> bool {
        let is_current = |last_good: &Option<Arc<Catalog>>| {
            last_good
                .as_ref()
                .is_some_and(|current| Arc::ptr_eq(current, catalog))
        };

        if is_current(&*self.inner.last_good.read().await) {
            return false;
        }

        let mut last_good = self.inner.last_good.write().await;
        if is_current(&last_good) {
            return false;
        }
        debug!(
            version = ?catalog.version(),
            products = catalog.len(),
            "catalog snapshot replaced"
        );
        *last_good = Some(Arc::clone(catalog));
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use quimica_core::{Price, Product, ProductId};
    use rust_decimal::Decimal;
    use url::Url;

    use super::*;
    use crate::config::CatalogConfig;

    /// A client pointed at a port nothing listens on.
    fn unreachable_client() -> CatalogClient {
        CatalogClient::new(&CatalogConfig {
            url: Url::parse("http://127.0.0.1:9/catalog.csv").unwrap(),
            revalidate: Duration::from_secs(60),
        })
    }

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Producto {id}"),
            description: String::new(),
            price: Price::new(Decimal::from_str("10").unwrap()).unwrap(),
            image: String::new(),
            category: "Limpieza".to_string(),
        }
    }

    #[tokio::test]
    async fn test_unreachable_feed_without_snapshot_errors() {
        let store = CatalogStore::new(unreachable_client(), Duration::from_secs(60));
        let err = store.current().await.unwrap_err();
        assert!(err.is_fetch());
        assert!(store.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn test_seeded_snapshot_is_served() {
        let store = CatalogStore::new(unreachable_client(), Duration::from_secs(60));
        let seeded = store.seed(Catalog::new(vec![product("1")])).await;

        let current = store.current().await.unwrap();
        assert!(Arc::ptr_eq(&seeded, &current));
    }

    #[tokio::test]
    async fn test_failed_reload_falls_back_to_last_good() {
        let store = CatalogStore::new(unreachable_client(), Duration::from_secs(60));
        store.seed(Catalog::new(vec![product("1")])).await;
        store.inner.cache.invalidate(&CacheKey::Catalog).await;

        let current = store.current().await.unwrap();
        assert_eq!(current.len(), 1);
    }

    #[tokio::test]
    async fn test_remember_only_swaps_on_new_snapshot() {
        let store = CatalogStore::new(unreachable_client(), Duration::from_secs(60));
        let seeded = store.seed(Catalog::new(vec![product("1")])).await;

        assert!(!store.remember(&seeded).await);
        store.current().await.unwrap();
        assert!(Arc::ptr_eq(&store.snapshot().await.unwrap(), &seeded));

        let replacement = Arc::new(Catalog::new(vec![product("2")]));
        assert!(store.remember(&replacement).await);
        assert!(Arc::ptr_eq(&store.snapshot().await.unwrap(), &replacement));
    }
}
