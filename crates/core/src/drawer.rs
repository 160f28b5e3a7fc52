//! The product drawer: one focused product and the quantity about to be added.
//!
//! ```text
//! Closed ──open(p)──▶ Viewing(p, 1) ──set_quantity(n ≥ 1)──▶ Viewing(p, n)
//!   ▲                      │
//!   └──close() / confirm()─┘
//! ```

use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartEntry};
use crate::error::DrawerError;
use crate::product::Product;
use crate::types::{ProductId, Quantity};

/// Current drawer state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DrawerState {
    #[default]
    Closed,
    Viewing {
        product: Product,
        quantity: Quantity,
    },
}

/// Selection controller for the product drawer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drawer {
    state: DrawerState,
    last_viewed: Option<ProductId>,
}

impl Drawer {
    /// Focus `product` with quantity 1, replacing any product already open.
    pub fn open(&mut self, product: Product) {
        self.last_viewed = Some(product.id.clone());
        self.state = DrawerState::Viewing {
            product,
            quantity: Quantity::ONE,
        };
    }

    /// Close from any state. The last viewed product ID is kept.
    pub fn close(&mut self) {
        self.state = DrawerState::Closed;
    }

    /// Set the pending quantity.
    ///
    /// # Errors
    ///
    /// `DrawerError::NotViewing` while closed, `DrawerError::InvalidQuantity`
    /// for zero. A rejected value leaves the current quantity unchanged.
    pub fn set_quantity(&mut self, value: u32) -> Result<Quantity, DrawerError> {
        let DrawerState::Viewing { quantity, .. } = &mut self.state else {
            return Err(DrawerError::NotViewing);
        };
        *quantity = Quantity::new(value)?;
        Ok(*quantity)
    }

    /// Add one unit to the pending quantity.
    ///
    /// # Errors
    ///
    /// `DrawerError::NotViewing` while closed.
    pub fn increment(&mut self) -> Result<Quantity, DrawerError> {
        let DrawerState::Viewing { quantity, .. } = &mut self.state else {
            return Err(DrawerError::NotViewing);
        };
        *quantity = quantity.increment();
        Ok(*quantity)
    }

    /// Remove one unit from the pending quantity.
    ///
    /// # Errors
    ///
    /// `DrawerError::NotViewing` while closed, `DrawerError::InvalidQuantity`
    /// when already at one.
    pub fn decrement(&mut self) -> Result<Quantity, DrawerError> {
        let DrawerState::Viewing { quantity, .. } = &mut self.state else {
            return Err(DrawerError::NotViewing);
        };
        *quantity = quantity.decrement()?;
        Ok(*quantity)
    }

    /// Add the viewed product to `cart` and close.
    ///
    /// Returns the appended entry, or `None` when nothing was open.
    pub fn confirm(&mut self, cart: &mut Cart) -> Option<CartEntry> {
        let DrawerState::Viewing { product, quantity } = std::mem::take(&mut self.state) else {
            return None;
        };
        cart.add(product.clone(), quantity);
        Some(CartEntry { product, quantity })
    }

    /// The product and pending quantity, if open.
    #[must_use]
    pub fn viewing(&self) -> Option<(&Product, Quantity)> {
        match &self.state {
            DrawerState::Viewing { product, quantity } => Some((product, *quantity)),
            DrawerState::Closed => None,
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.state, DrawerState::Viewing { .. })
    }

    #[must_use]
    pub const fn state(&self) -> &DrawerState {
        &self.state
    }

    #[must_use]
    pub const fn last_viewed(&self) -> Option<&ProductId> {
        self.last_viewed.as_ref()
    }
}
