//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Listing: filters, category sections, cart button
//! POST /categories/toggle      - Expand or collapse a category
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (catalog loaded)
//!
//! # Drawer
//! GET  /products/{id}          - Open the drawer on a product
//! GET  /drawer                 - Show the open drawer
//! POST /drawer/quantity        - Set (`quantity`) or step (`step`) the pending quantity
//! POST /drawer/confirm         - Add the drawer selection to the cart
//! POST /drawer/close           - Close the drawer
//!
//! # Cart
//! POST /cart/add               - Add a product directly (quantity defaults to 1)
//! GET  /cart/count             - Cart badge counts (JSON)
//! GET  /checkout               - Redirect to the pre-filled order chat
//!
//! # API
//! GET  /api/catalog            - Filtered catalog (JSON)
//! ```

pub mod api;
pub mod cart;
pub mod home;
pub mod products;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use tower_sessions::Session;

use crate::error::Result;
use crate::models::Shopper;
use crate::state::AppState;

/// Resume the shopper against the current catalog.
async fn load_shopper(state: &AppState, session: Session) -> Result<Shopper> {
    let catalog = state.catalog().current().await?;
    Ok(Shopper::load(session, catalog).await)
}

/// Listing URL preserving the filter controls.
pub(crate) fn listing_url(search_term: &str, category: Option<&str>) -> String {
    let mut params = Vec::new();
    if !search_term.is_empty() {
        params.push(format!("q={}", urlencoding::encode(search_term)));
    }
    if let Some(category) = category.filter(|c| !c.is_empty()) {
        params.push(format!("category={}", urlencoding::encode(category)));
    }

    if params.is_empty() {
        "/".to_string()
    } else {
        format!("/?{}", params.join("&"))
    }
}

/// Create the drawer routes router.
pub fn drawer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::show_drawer))
        .route("/quantity", post(products::quantity))
        .route("/confirm", post(products::confirm))
        .route("/close", post(products::close))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/categories/toggle", post(home::toggle_category))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route("/products/{id}", get(products::open))
        .nest("/drawer", drawer_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", get(cart::checkout))
        .route("/api/catalog", get(api::catalog))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable until a catalog has loaded at least once.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.catalog().snapshot().await.is_some() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
