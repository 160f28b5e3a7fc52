//! Core types for the storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod quantity;

pub use id::ProductId;
pub use price::{Price, format_ars};
pub use quantity::Quantity;
