//! Cart route handlers.
//!
//! The cart lives in the shopper session. Checkout is a redirect to the
//! messaging service with the order text pre-filled.

use axum::{
    Form, Json,
    extract::State,
    response::Redirect,
};
use quimica_core::{ProductId, Quantity, format_ars};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::routes::load_shopper;
use crate::state::AppState;

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub quantity: Option<u32>,
}

/// Cart counts for badges.
#[derive(Debug, Serialize, Deserialize)]
pub struct CartSummary {
    /// Number of add actions.
    pub entries: usize,
    /// Total units.
    pub quantity: u64,
    /// Grand total as a decimal string.
    pub total: String,
    pub formatted_total: String,
}

/// Add a product straight to the cart, bypassing the drawer.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let quantity = Quantity::new(form.quantity.unwrap_or(1))
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let id = ProductId::new(form.product_id);

    let mut shopper = load_shopper(&state, session).await?;
    if shopper.add_by_id(&id, quantity).is_none() {
        return Err(AppError::NotFound(format!("product {id}")));
    }
    shopper.save().await?;

    let units = quantity.to_string();
    add_breadcrumb(
        "cart",
        "Added product",
        Some(&[("product_id", id.as_str()), ("quantity", units.as_str())]),
    );
    tracing::info!(product_id = %id, quantity = quantity.get(), "added to cart");

    Ok(Redirect::to("/"))
}

/// Cart badge counts.
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> Result<Json<CartSummary>> {
    let shopper = load_shopper(&state, session).await?;
    let cart = shopper.cart();

    Ok(Json(CartSummary {
        entries: cart.entry_count(),
        quantity: cart.total_quantity(),
        total: cart.total().to_string(),
        formatted_total: format_ars(cart.total()),
    }))
}

/// Redirect to the messaging service with the order pre-filled.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let shopper = load_shopper(&state, session).await?;
    if shopper.cart().is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    let url = state.order_link().for_order(&shopper.order_text());
    tracing::info!(
        entries = shopper.cart().entry_count(),
        quantity = shopper.cart().total_quantity(),
        "checkout handed off to messaging service"
    );

    Ok(Redirect::to(&url))
}
