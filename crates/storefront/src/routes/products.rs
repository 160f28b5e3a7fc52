//! Product drawer route handlers.
//!
//! The drawer is a focused product page with a quantity stepper. Its state
//! lives in the shopper session, so the stepper buttons are plain form posts
//! that redirect back to `/drawer`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use quimica_core::{DrawerError, ProductId, format_ars};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::Shopper;
use crate::routes::home::{CartBadgeView, ProductCardView, StoreView};
use crate::routes::load_shopper;
use crate::state::AppState;

/// Drawer page template.
#[derive(Template, WebTemplate)]
#[template(path = "drawer.html")]
pub struct DrawerTemplate {
    pub store: StoreView,
    pub product: ProductCardView,
    pub quantity: u32,
    pub can_decrement: bool,
    /// Unit price times pending quantity.
    pub line_total: String,
    pub cart: Option<CartBadgeView>,
}

impl DrawerTemplate {
    /// Render the open drawer, or `None` when it is closed.
    fn for_shopper(state: &AppState, shopper: &Shopper) -> Option<Self> {
        let (product, quantity) = shopper.drawer().viewing()?;
        Some(Self {
            store: StoreView::new(state),
            product: ProductCardView::from(product),
            quantity: quantity.get(),
            can_decrement: quantity.get() > 1,
            line_total: format_ars(product.price.times(quantity)),
            cart: CartBadgeView::for_session(shopper),
        })
    }
}

/// Drawer quantity form data. `quantity` sets an absolute value, `step`
/// moves by one in its direction.
#[derive(Debug, Deserialize)]
pub struct QuantityForm {
    pub quantity: Option<u32>,
    pub step: Option<i32>,
}

/// Open the drawer on a product.
#[instrument(skip(state, session))]
pub async fn open(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response> {
    let mut shopper = load_shopper(&state, session).await?;
    let id = ProductId::new(id);
    if shopper.open_product(&id).is_none() {
        return Err(AppError::NotFound(format!("product {id}")));
    }
    shopper.save().await?;

    add_breadcrumb("drawer", "Opened product", Some(&[("product_id", id.as_str())]));
    Ok(render(&state, &shopper))
}

/// Show the drawer as it currently stands.
#[instrument(skip(state, session))]
pub async fn show_drawer(State(state): State<AppState>, session: Session) -> Result<Response> {
    let shopper = load_shopper(&state, session).await?;
    Ok(render(&state, &shopper))
}

/// Change the pending quantity.
///
/// A value below one is rejected and leaves the quantity as it was.
#[instrument(skip(state, session))]
pub async fn quantity(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<QuantityForm>,
) -> Result<Redirect> {
    let mut shopper = load_shopper(&state, session).await?;

    let result = match (form.quantity, form.step) {
        (Some(value), _) => shopper.set_drawer_quantity(value),
        (None, Some(step)) => shopper.step_drawer_quantity(step),
        (None, None) => {
            return Err(AppError::BadRequest(
                "expected a quantity or a step".to_string(),
            ));
        }
    };

    match result {
        Ok(quantity) => tracing::debug!(%quantity, "drawer quantity changed"),
        Err(DrawerError::NotViewing) => return Ok(Redirect::to("/")),
        Err(DrawerError::InvalidQuantity(e)) => tracing::debug!("quantity rejected: {e}"),
    }
    shopper.save().await?;

    Ok(Redirect::to("/drawer"))
}

/// Add the drawer selection to the cart and close the drawer.
#[instrument(skip(state, session))]
pub async fn confirm(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let mut shopper = load_shopper(&state, session).await?;

    if let Some(entry) = shopper.confirm_drawer() {
        let quantity = entry.quantity.to_string();
        add_breadcrumb(
            "cart",
            "Added product",
            Some(&[
                ("product_id", entry.product.id.as_str()),
                ("quantity", quantity.as_str()),
            ]),
        );
        tracing::info!(
            product_id = %entry.product.id,
            quantity = entry.quantity.get(),
            "added to cart from drawer"
        );
    }
    shopper.save().await?;

    Ok(Redirect::to("/"))
}

/// Close the drawer.
#[instrument(skip(state, session))]
pub async fn close(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let mut shopper = load_shopper(&state, session).await?;
    shopper.close_drawer();
    shopper.save().await?;

    Ok(Redirect::to("/"))
}

fn render(state: &AppState, shopper: &Shopper) -> Response {
    DrawerTemplate::for_shopper(state, shopper).map_or_else(
        || Redirect::to("/").into_response(),
        IntoResponse::into_response,
    )
}
