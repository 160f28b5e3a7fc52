//! Session-backed models.

pub mod session;

pub use session::{Shopper, keys as session_keys};
