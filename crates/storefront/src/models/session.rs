//! Shopper state stored in the session.
//!
//! Each request resumes a [`ShopperSession`] from the cookie-bound session,
//! applies at most a few transitions, and writes the state back only if a
//! transition fired.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use quimica_core::{Catalog, Change, ShopperSession, ShopperState};
use tower_sessions::Session;

use crate::error::Result;

/// Session keys for shopper data.
pub mod keys {
    /// Key for the shopper's cart, drawer, and category visibility.
    pub const SHOPPER_STATE: &str = "shopper_state";
}

/// A shopper session bound to its tower session.
pub struct Shopper {
    session: Session,
    shopper: ShopperSession,
    dirty: Arc<AtomicBool>,
}

impl Shopper {
    /// Resume the shopper against `catalog`.
    ///
    /// A missing or unreadable stored state starts a fresh session.
    pub async fn load(session: Session, catalog: Arc<Catalog>) -> Self {
        let stored = match session.get::<ShopperState>(keys::SHOPPER_STATE).await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Failed to read shopper state, starting fresh: {e}");
                None
            }
        };
        let mut shopper = ShopperSession::new(catalog, stored.unwrap_or_default());

        let dirty = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&dirty);
        shopper.subscribe(move |change| {
            tracing::debug!(?change, "shopper state changed");
            if !matches!(change, Change::FilterChanged) {
                flag.store(true, Ordering::Relaxed);
            }
        });

        Self {
            session,
            shopper,
            dirty,
        }
    }

    /// Persist the state if anything but the filter changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be written.
    pub async fn save(&self) -> Result<()> {
        if self.dirty.swap(false, Ordering::Relaxed) {
            self.session
                .insert(keys::SHOPPER_STATE, self.shopper.state())
                .await?;
        }
        Ok(())
    }
}

impl std::ops::Deref for Shopper {
    type Target = ShopperSession;

    fn deref(&self) -> &Self::Target {
        &self.shopper
    }
}

impl std::ops::DerefMut for Shopper {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.shopper
    }
}
