//! Domain errors.
//!
//! Cart and filter operations have no error path. The only local failures are
//! constructing an out-of-range value or driving the drawer from the wrong state.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors constructing a [`Quantity`](crate::Quantity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuantityError {
    /// Quantities start at one; zero is rejected rather than wrapped.
    #[error("quantity must be at least 1 (got {0})")]
    BelowMinimum(u32),
}

/// Errors constructing a [`Price`](crate::Price).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// Errors driving the product drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DrawerError {
    /// Quantity can only be changed while a product is being viewed.
    #[error("no product is open in the drawer")]
    NotViewing,

    #[error(transparent)]
    InvalidQuantity(#[from] QuantityError),
}
