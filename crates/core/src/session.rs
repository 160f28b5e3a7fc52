//! Observable shopper session.
//!
//! [`ShopperSession`] owns one catalog snapshot plus everything the shopper has
//! done against it, exposes each state transition as a method, and notifies
//! subscribed listeners after every transition that changed something.
//!
//! The persisted part lives in [`ShopperState`] so the hosting layer can store
//! it between requests; filter criteria and listeners are per-request.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartEntry};
use crate::catalog::{Catalog, CatalogVersion};
use crate::categories::{CategorySection, CategoryVisibility, sections};
use crate::drawer::Drawer;
use crate::error::DrawerError;
use crate::filter::FilterCriteria;
use crate::order;
use crate::product::Product;
use crate::types::{ProductId, Quantity};

/// What changed in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// A different catalog snapshot was installed and visibility re-derived.
    CatalogReplaced(CatalogVersion),
    FilterChanged,
    CategoryToggled { category: String, is_open: bool },
    DrawerChanged,
    /// An entry was appended; carries the new entry count.
    CartChanged { entries: usize },
}

/// Session state that outlives a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopperState {
    pub categories: CategoryVisibility,
    pub cart: Cart,
    pub drawer: Drawer,
    /// Catalog version `categories` was derived from.
    pub catalog_version: Option<CatalogVersion>,
}

type Listener = Box<dyn Fn(&Change) + Send + Sync>;

/// A shopper's view of the storefront.
pub struct ShopperSession {
    catalog: Arc<Catalog>,
    filter: FilterCriteria,
    state: ShopperState,
    listeners: Vec<Listener>,
}

impl fmt::Debug for ShopperSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShopperSession")
            .field("catalog_version", &self.catalog.version())
            .field("filter", &self.filter)
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ShopperSession {
    /// Resume a session against `catalog`.
    ///
    /// If `state` was derived from another catalog version its category
    /// visibility is re-initialized; no listener is registered yet, so nothing
    /// is notified.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, state: ShopperState) -> Self {
        let mut session = Self {
            catalog,
            filter: FilterCriteria::default(),
            state,
            listeners: Vec::new(),
        };
        session.sync_categories();
        session
    }

    /// Register a listener called after every change.
    pub fn subscribe(&mut self, listener: impl Fn(&Change) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&self, change: &Change) {
        for listener in &self.listeners {
            listener(change);
        }
    }

    fn sync_categories(&mut self) -> bool {
        let version = self.catalog.version();
        if self.state.catalog_version == Some(version) {
            return false;
        }
        self.state
            .categories
            .initialize(self.catalog.categories().iter().cloned());
        self.state.catalog_version = Some(version);
        true
    }

    /// Install a new catalog snapshot.
    ///
    /// The swap is a single pointer replacement. Category visibility is reset
    /// only when the content version differs.
    pub fn replace_catalog(&mut self, catalog: Arc<Catalog>) {
        self.catalog = catalog;
        if self.sync_categories() {
            self.notify(&Change::CatalogReplaced(self.catalog.version()));
        }
    }

    pub fn set_filter(&mut self, filter: FilterCriteria) {
        if self.filter != filter {
            self.filter = filter;
            self.notify(&Change::FilterChanged);
        }
    }

    pub fn set_search_term(&mut self, search_term: impl Into<String>) {
        let filter = FilterCriteria::new(search_term, self.filter.selected_category.clone());
        self.set_filter(filter);
    }

    pub fn select_category(&mut self, category: Option<String>) {
        let filter = FilterCriteria::new(self.filter.search_term.clone(), category);
        self.set_filter(filter);
    }

    /// Flip a category's visibility. `None` for an unknown category.
    pub fn toggle_category(&mut self, category: &str) -> Option<bool> {
        let is_open = self.state.categories.toggle(category)?;
        self.notify(&Change::CategoryToggled {
            category: category.to_string(),
            is_open,
        });
        Some(is_open)
    }

    /// Open the drawer on a catalog product. `None` if the ID is unknown.
    pub fn open_product(&mut self, id: &ProductId) -> Option<&Product> {
        let product = self.catalog.find(id)?.clone();
        self.state.drawer.open(product);
        self.notify(&Change::DrawerChanged);
        self.state.drawer.viewing().map(|(product, _)| product)
    }

    pub fn close_drawer(&mut self) {
        if self.state.drawer.is_open() {
            self.state.drawer.close();
            self.notify(&Change::DrawerChanged);
        }
    }

    /// # Errors
    ///
    /// See [`Drawer::set_quantity`].
    pub fn set_drawer_quantity(&mut self, value: u32) -> Result<Quantity, DrawerError> {
        let quantity = self.state.drawer.set_quantity(value)?;
        self.notify(&Change::DrawerChanged);
        Ok(quantity)
    }

    /// Step the drawer quantity up (`step > 0`) or down (`step < 0`) by one.
    ///
    /// # Errors
    ///
    /// See [`Drawer::increment`] and [`Drawer::decrement`].
    pub fn step_drawer_quantity(&mut self, step: i32) -> Result<Quantity, DrawerError> {
        let quantity = match step.signum() {
            1 => self.state.drawer.increment()?,
            -1 => self.state.drawer.decrement()?,
            _ => {
                return self
                    .state
                    .drawer
                    .viewing()
                    .map(|(_, quantity)| quantity)
                    .ok_or(DrawerError::NotViewing);
            }
        };
        self.notify(&Change::DrawerChanged);
        Ok(quantity)
    }

    /// Add the drawer selection to the cart and close the drawer.
    pub fn confirm_drawer(&mut self) -> Option<CartEntry> {
        let entry = self.state.drawer.confirm(&mut self.state.cart)?;
        self.notify(&Change::DrawerChanged);
        self.notify(&Change::CartChanged {
            entries: self.state.cart.entry_count(),
        });
        Some(entry)
    }

    /// Append `product` to the cart.
    pub fn add_to_cart(&mut self, product: Product, quantity: Quantity) {
        self.state.cart.add(product, quantity);
        self.notify(&Change::CartChanged {
            entries: self.state.cart.entry_count(),
        });
    }

    /// Append a catalog product by ID. `None` if the ID is unknown.
    pub fn add_by_id(&mut self, id: &ProductId, quantity: Quantity) -> Option<&CartEntry> {
        let product = self.catalog.find(id)?.clone();
        self.add_to_cart(product, quantity);
        self.state.cart.entries().last()
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    #[must_use]
    pub const fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    #[must_use]
    pub const fn state(&self) -> &ShopperState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> ShopperState {
        self.state
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.state.cart
    }

    #[must_use]
    pub const fn drawer(&self) -> &Drawer {
        &self.state.drawer
    }

    /// Products passing the current filter.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        self.filter.apply(self.catalog.products())
    }

    /// The categorized listing for the current filter and visibility.
    #[must_use]
    pub fn sections(&self) -> Vec<CategorySection<'_>> {
        sections(
            self.catalog.products(),
            self.catalog.categories(),
            &self.filter,
            &self.state.categories,
        )
    }

    /// Order text for the current cart.
    #[must_use]
    pub fn order_text(&self) -> String {
        order::compose(self.state.cart.entries())
    }
}
