//! Quimica Gr Core - Storefront domain library.
//!
//! This crate holds everything a shopper session needs that does not touch the
//! network: the product catalog, filtering, category visibility, the cart, the
//! product drawer, and the order text handed to the messaging link.
//!
//! # Architecture
//!
//! The core crate contains only types and state transitions - no I/O, no HTTP
//! clients, no templates. The `storefront` crate fetches the catalog feed and
//! drives a [`ShopperSession`] from HTTP requests.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, and quantities
//! - [`product`] - The catalog row
//! - [`catalog`] - Immutable catalog snapshot and category derivation
//! - [`filter`] - Search term and category filtering
//! - [`categories`] - Per-category open/closed state and listing sections
//! - [`cart`] - Append-only cart
//! - [`order`] - Order text composition
//! - [`drawer`] - Focused product and quantity selection
//! - [`session`] - Observable state holder tying it all together

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod categories;
pub mod drawer;
pub mod error;
pub mod filter;
pub mod order;
pub mod product;
pub mod session;
pub mod types;

pub use cart::{Cart, CartEntry};
pub use catalog::{Catalog, CatalogVersion, derive_categories};
pub use categories::{CategorySection, CategoryState, CategoryVisibility, sections};
pub use drawer::{Drawer, DrawerState};
pub use error::{DrawerError, PriceError, QuantityError};
pub use filter::FilterCriteria;
pub use order::compose;
pub use product::Product;
pub use session::{Change, ShopperSession, ShopperState};
pub use types::*;
