//! JSON catalog API.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{DateTime, Utc};
use quimica_core::{FilterCriteria, Product};
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::routes::home::ListingQuery;
use crate::state::AppState;

/// Filtered catalog response.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub loaded_at: DateTime<Utc>,
    pub categories: Vec<String>,
    pub products: Vec<Product>,
}

/// Return the catalog filtered by `q` and `category`.
#[instrument(skip(state))]
pub async fn catalog(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<CatalogResponse>> {
    let catalog = state.catalog().current().await?;
    let criteria = FilterCriteria::new(query.q, query.category);

    Ok(Json(CatalogResponse {
        loaded_at: catalog.loaded_at(),
        categories: catalog.categories().to_vec(),
        products: criteria
            .apply(catalog.products())
            .into_iter()
            .cloned()
            .collect(),
    }))
}
