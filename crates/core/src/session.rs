//! Session coordinator.
//!
//! A [`Session`] owns the loaded catalog, the cart, the cart store, the
//! shipping inputs and the totals currently on display. It can only be built
//! from a successfully loaded [`Catalog`], so no cart operation can run after
//! a catalog load failure.
//!
//! Every mutation persists the cart and re-prices the order. Destructive
//! operations are unconditional here; asking the user first is the caller's
//! job.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cart::{AddOutcome, Cart, CartError};
use crate::catalog::Catalog;
use crate::notice::Notice;
use crate::pricing::{self, PricingError, PricingResult, ShippingRequest};
use crate::storage::{KeyValueStore, StorageError};
use crate::store::CartStore;
use crate::types::ProductId;

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Cart rule violation (e.g. unknown product id).
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The cart changed in memory but could not be persisted.
    #[error("failed to persist cart: {0}")]
    Storage(#[from] StorageError),
}

/// Result of the last "calculate" run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalculationState {
    /// Nothing calculated yet.
    #[default]
    Idle,
    /// Totals were computed from the current inputs.
    Computed,
    /// Validation failed; the previous totals are still displayed.
    ValidationFailed,
}

/// Single-user cart session.
#[derive(Debug)]
pub struct Session<S> {
    catalog: Catalog,
    cart: Cart,
    store: CartStore<S>,
    shipping: ShippingRequest,
    totals: PricingResult,
    state: CalculationState,
}

impl<S: KeyValueStore> Session<S> {
    /// Restore the persisted cart and compute the initial totals.
    pub fn start(catalog: Catalog, store: CartStore<S>) -> Self {
        let cart = store.restore();
        info!(
            products = catalog.len(),
            cart_lines = cart.len(),
            "Session started"
        );
        let mut session = Self {
            catalog,
            cart,
            store,
            shipping: ShippingRequest::none(),
            totals: PricingResult::ZERO,
            state: CalculationState::Idle,
        };
        // Shipping starts disabled, so only an oversized total can fail here.
        if let Err(e) = session.calculate() {
            warn!(error = %e, "Initial totals unavailable");
        }
        session
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Totals currently on display.
    #[must_use]
    pub const fn totals(&self) -> &PricingResult {
        &self.totals
    }

    #[must_use]
    pub const fn shipping(&self) -> &ShippingRequest {
        &self.shipping
    }

    #[must_use]
    pub const fn state(&self) -> CalculationState {
        self.state
    }

    /// Add one unit of `product_id`, persist and re-price.
    ///
    /// The returned notices start with the add outcome; a
    /// [`Notice::MissingPostalCode`] or [`Notice::TotalsUnavailable`] follows
    /// if re-pricing failed.
    ///
    /// # Errors
    ///
    /// [`SessionError::Cart`] for an id not in the catalog or a line at its
    /// limit (cart unchanged), [`SessionError::Storage`] if persisting fails.
    pub fn add(&mut self, product_id: ProductId) -> Result<Vec<Notice>, SessionError> {
        let outcome = self.cart.add(product_id, &self.catalog)?;
        let name = self
            .cart
            .get(product_id)
            .map(|line| line.name.clone())
            .unwrap_or_default();
        debug!(%product_id, ?outcome, "Added to cart");

        let notice = match outcome {
            AddOutcome::AddedNew => Notice::AddedNew {
                id: product_id,
                name,
            },
            AddOutcome::Incremented { quantity } => Notice::Incremented {
                id: product_id,
                name,
                quantity,
            },
        };
        self.after_mutation(notice)
    }

    /// Remove the line for `product_id`, persist and re-price.
    ///
    /// Removing a product that isn't in the cart changes nothing and yields
    /// [`Notice::NotInCart`].
    ///
    /// # Errors
    ///
    /// [`SessionError::Storage`] if persisting fails.
    pub fn remove(&mut self, product_id: ProductId) -> Result<Vec<Notice>, SessionError> {
        let Some(line) = self.cart.remove(product_id) else {
            debug!(%product_id, "Remove requested for product not in cart");
            return Ok(vec![Notice::NotInCart { id: product_id }]);
        };
        debug!(%product_id, quantity = line.quantity, "Removed from cart");
        self.after_mutation(Notice::Removed {
            id: line.id,
            name: line.name,
        })
    }

    /// Empty the cart, delete its persisted copy and zero the totals.
    ///
    /// # Errors
    ///
    /// [`SessionError::Storage`] if the persisted copy can't be removed.
    pub fn clear(&mut self) -> Result<Vec<Notice>, SessionError> {
        self.cart.clear();
        self.totals = PricingResult::ZERO;
        self.state = CalculationState::Computed;
        self.store.clear()?;
        info!("Cart cleared");
        Ok(vec![Notice::Cleared])
    }

    /// Replace the shipping inputs. Turning shipping off also drops the
    /// postal code.
    pub fn set_shipping(&mut self, mut request: ShippingRequest) {
        if !request.requested {
            request.postal_code.clear();
        }
        self.shipping = request;
    }

    /// Re-price the order with the current cart and shipping inputs.
    ///
    /// # Errors
    ///
    /// [`PricingError::MissingPostalCode`] if shipping is requested without a
    /// postal code, [`PricingError::AmountOverflow`] if the totals don't fit.
    /// Either way the displayed totals are left as they were.
    pub fn calculate(&mut self) -> Result<PricingResult, PricingError> {
        match pricing::compute_order(&self.cart, &self.shipping) {
            Ok(totals) => {
                self.totals = totals;
                self.state = CalculationState::Computed;
                debug!(total = %totals.total, "Order priced");
                Ok(totals)
            }
            Err(e) => {
                self.state = CalculationState::ValidationFailed;
                debug!(error = %e, "Pricing validation failed");
                Err(e)
            }
        }
    }

    fn after_mutation(&mut self, notice: Notice) -> Result<Vec<Notice>, SessionError> {
        let mut notices = vec![notice];
        match self.calculate() {
            Ok(_) => {}
            Err(PricingError::MissingPostalCode) => notices.push(Notice::MissingPostalCode),
            Err(PricingError::AmountOverflow) => notices.push(Notice::TotalsUnavailable),
        }
        self.store.persist(&self.cart)?;
        Ok(notices)
    }
}
