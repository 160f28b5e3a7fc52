//! Product catalog feed.
//!
//! # Architecture
//!
//! - The catalog lives in a spreadsheet published as CSV; the sheet is the
//!   source of truth and nothing is stored locally
//! - [`CatalogClient`] fetches and parses one copy per call, with no retry
//! - [`CatalogStore`] caches the parsed snapshot in `moka` for the
//!   revalidation interval and falls back to the last good copy on failure
//!
//! # Example
//!
//! ```rust,ignore
//! use quimica_storefront::catalog::{CatalogClient, CatalogStore};
//!
//! let store = CatalogStore::new(CatalogClient::new(&config.catalog), config.catalog.revalidate);
//! let catalog = store.current().await?;
//! ```

mod parse;
mod store;

pub use parse::parse_catalog;
pub use store::CatalogStore;

use std::time::Instant;

use quimica_core::Catalog;
use thiserror::Error;
use tracing::{info, instrument};
use url::Url;

use crate::config::CatalogConfig;

/// Errors loading the catalog.
///
/// `Fetch` and `Status` mean the source was unreachable; every other variant
/// means the payload could not be turned into products.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The feed answered with a non-success status.
    #[error("catalog feed returned HTTP {0}")]
    Status(u16),

    /// The payload is not valid CSV.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// The header row lacks a required column.
    #[error("catalog is missing the '{0}' column")]
    MissingColumn(&'static str),

    /// A data row ends before one of the required columns.
    #[error("row {row}: missing '{column}' value")]
    MissingField { row: u64, column: &'static str },

    /// A row's price is not a non-negative decimal number.
    #[error("row {row}: invalid price '{value}'")]
    InvalidPrice { row: u64, value: String },
}

impl CatalogError {
    /// Whether the source could not be reached, as opposed to a bad payload.
    #[must_use]
    pub const fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_) | Self::Status(_))
    }
}

/// Client for the published catalog feed.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    url: Url,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: config.url.clone(),
        }
    }

    /// Fetch and parse the catalog once.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the feed is unreachable, answers with a
    /// non-success status, or the payload fails to parse.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn load(&self) -> Result<Catalog, CatalogError> {
        let started = Instant::now();

        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = %status, "catalog feed returned non-success status");
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let products = parse_catalog(&body).inspect_err(|e| {
            tracing::error!(error = %e, "failed to parse catalog feed");
        })?;

        info!(
            products = products.len(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "catalog loaded"
        );
        Ok(Catalog::new(products))
    }
}
