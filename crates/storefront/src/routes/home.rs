//! Listing page route handlers.

use std::sync::Arc;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::Redirect,
};
use quimica_core::{Catalog, CategorySection, FilterCriteria, Product, ShopperSession};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::models::Shopper;
use crate::routes::{listing_url, load_shopper};
use crate::state::AppState;

/// Message shown when no catalog could be loaded.
const CATALOG_UNAVAILABLE: &str =
    "No pudimos cargar los productos. Intentá de nuevo en unos minutos.";

/// Store header data for templates.
#[derive(Clone)]
pub struct StoreView {
    pub name: String,
    pub tagline: String,
    /// Chat link for the header; the order phone unless a contact phone is set.
    pub contact_url: String,
    pub instagram_url: Option<String>,
}

impl StoreView {
    #[must_use]
    pub fn new(state: &AppState) -> Self {
        let config = state.config();
        let service = config.order.service_url.as_str().trim_end_matches('/');
        Self {
            name: config.store.name.clone(),
            tagline: config.store.tagline.clone(),
            contact_url: config.store.contact_phone.as_ref().map_or_else(
                || state.order_link().contact_url().to_string(),
                |phone| format!("{service}/{phone}"),
            ),
            instagram_url: config.store.instagram_url.clone(),
        }
    }
}

/// Product tile data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub image: String,
    /// Drawer URL with the ID percent-encoded.
    pub url: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            image: product.image.clone(),
            url: format!("/products/{}", urlencoding::encode(product.id.as_str())),
        }
    }
}

/// Category block data for templates.
#[derive(Clone)]
pub struct CategorySectionView {
    pub name: String,
    pub count: usize,
    pub is_open: bool,
    pub products: Vec<ProductCardView>,
}

impl From<&CategorySection<'_>> for CategorySectionView {
    fn from(section: &CategorySection<'_>) -> Self {
        Self {
            name: section.category.to_string(),
            count: section.count,
            is_open: section.is_open,
            products: section
                .products
                .iter()
                .map(|&product| ProductCardView::from(product))
                .collect(),
        }
    }
}

/// Category dropdown option for templates.
#[derive(Clone)]
pub struct CategoryOptionView {
    pub name: String,
    pub selected: bool,
}

/// Sticky cart button data for templates.
#[derive(Clone)]
pub struct CartBadgeView {
    /// Total units across all entries.
    pub quantity: u64,
    pub total: String,
}

impl CartBadgeView {
    /// Badge for a non-empty cart.
    #[must_use]
    pub fn for_session(shopper: &ShopperSession) -> Option<Self> {
        let cart = shopper.cart();
        (!cart.is_empty()).then(|| Self {
            quantity: cart.total_quantity(),
            total: quimica_core::format_ars(cart.total()),
        })
    }
}

/// Listing filter query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    #[serde(default)]
    pub q: String,
    pub category: Option<String>,
}

/// Category toggle form data.
#[derive(Debug, Deserialize)]
pub struct ToggleCategoryForm {
    pub category: String,
    /// Filter controls to restore after the redirect.
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub selected: String,
}

/// Listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub store: StoreView,
    pub search_term: String,
    pub selected_category: String,
    pub categories: Vec<CategoryOptionView>,
    pub sections: Vec<CategorySectionView>,
    pub cart: Option<CartBadgeView>,
    pub error: Option<String>,
}

/// Display the listing.
///
/// A catalog that cannot be loaded renders as an empty listing with a notice.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListingQuery>,
) -> Result<IndexTemplate> {
    let (catalog, error) = match state.catalog().current().await {
        Ok(catalog) => (catalog, None),
        Err(e) => {
            tracing::warn!("Catalog unavailable: {e}");
            (Arc::new(Catalog::empty()), Some(CATALOG_UNAVAILABLE.to_string()))
        }
    };

    let mut shopper = Shopper::load(session, catalog).await;
    shopper.set_filter(FilterCriteria::new(query.q, query.category));
    shopper.save().await?;

    let selected_category = shopper
        .filter()
        .selected_category
        .clone()
        .unwrap_or_default();
    let categories = shopper
        .catalog()
        .categories()
        .iter()
        .map(|name| CategoryOptionView {
            name: name.clone(),
            selected: *name == selected_category,
        })
        .collect();

    Ok(IndexTemplate {
        store: StoreView::new(&state),
        search_term: shopper.filter().search_term.clone(),
        selected_category,
        categories,
        sections: shopper
            .sections()
            .iter()
            .map(CategorySectionView::from)
            .collect(),
        cart: CartBadgeView::for_session(&shopper),
        error,
    })
}

/// Expand or collapse one category, then return to the listing.
#[instrument(skip(state, session))]
pub async fn toggle_category(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ToggleCategoryForm>,
) -> Result<Redirect> {
    let mut shopper = load_shopper(&state, session).await?;
    match shopper.toggle_category(&form.category) {
        Some(is_open) => tracing::debug!(category = %form.category, is_open, "category toggled"),
        None => tracing::debug!(category = %form.category, "toggle for unknown category ignored"),
    }
    shopper.save().await?;

    Ok(Redirect::to(&listing_url(&form.q, Some(&form.selected))))
}
