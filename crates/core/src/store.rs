//! Cart persistence on top of a [`KeyValueStore`].

use tracing::{debug, warn};

use crate::cart::Cart;
use crate::storage::{KeyValueStore, StorageError};

/// Storage slot holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "carritoProductos";

/// Reads and writes the cart under [`CART_STORAGE_KEY`].
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
}

impl<S: KeyValueStore> CartStore<S> {
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Restore the persisted cart.
    ///
    /// A missing slot, unreadable storage or a document that doesn't decode
    /// into a valid cart all yield an empty cart. A cart whose subtotal
    /// doesn't fit in a money amount counts as invalid.
    #[must_use]
    pub fn restore(&self) -> Cart {
        let raw = match self.storage.get(CART_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No persisted cart, starting empty");
                return Cart::new();
            }
            Err(e) => {
                warn!(error = %e, "Failed to read persisted cart, starting empty");
                return Cart::new();
            }
        };

        match serde_json::from_str::<Cart>(&raw) {
            Ok(cart) => {
                debug!(lines = cart.len(), "Restored persisted cart");
                cart
            }
            Err(e) => {
                warn!(error = %e, "Persisted cart is corrupt, starting empty");
                Cart::new()
            }
        }
    }

    /// Overwrite the persisted cart with `cart`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend write fails.
    pub fn persist(&self, cart: &Cart) -> Result<(), StorageError> {
        let json = serde_json::to_string(cart).map_err(std::io::Error::other)?;
        self.storage.set(CART_STORAGE_KEY, &json)?;
        debug!(lines = cart.len(), "Persisted cart");
        Ok(())
    }

    /// Remove the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend write fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(CART_STORAGE_KEY)
    }
}
