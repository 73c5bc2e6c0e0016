//! Cart line items and mutation rules.
//!
//! A [`Cart`] holds at most one [`CartLine`] per product and every line has a
//! quantity of at least one. Prices are copied from the catalog when a line is
//! created; later catalog changes don't touch existing lines.
//!
//! The cart subtotal always fits in a [`Money`]: adds that would overflow it
//! are rejected, and so are persisted carts that break the limit.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::types::{Money, ProductId};

/// Errors produced by cart operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The product id is not in the loaded catalog.
    #[error("unknown product id {0}")]
    UnknownProduct(ProductId),

    /// A serialized cart holds two lines for one product.
    #[error("duplicate cart line for product id {0}")]
    DuplicateLine(ProductId),

    /// A serialized cart holds a line with quantity zero.
    #[error("cart line for product id {0} has zero quantity")]
    ZeroQuantity(ProductId),

    /// The line already holds the largest representable quantity.
    #[error("quantity limit reached for product id {0}")]
    QuantityOverflow(ProductId),

    /// The cart subtotal would exceed the largest representable amount.
    #[error("cart total too large after adding product id {0}")]
    AmountOverflow(ProductId),
}

/// One product in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    #[serde(alias = "nombre")]
    pub name: String,
    /// Price at the moment the product was first added.
    #[serde(alias = "precio")]
    pub price: Money,
    #[serde(alias = "cantidad")]
    pub quantity: u32,
}

impl CartLine {
    /// `price * quantity`, or `None` if it doesn't fit.
    #[must_use]
    pub fn line_total(&self) -> Option<Money> {
        self.price.checked_mul(self.quantity)
    }
}

/// Which branch [`Cart::add`] took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended with quantity 1.
    AddedNew,
    /// An existing line's quantity was bumped.
    Incremented {
        /// Quantity after the bump.
        quantity: u32,
    },
}

/// Ordered collection of cart lines, unique by product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of `product_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownProduct`] if the id is not in `catalog`,
    /// [`CartError::QuantityOverflow`] if the line can't hold another unit and
    /// [`CartError::AmountOverflow`] if the subtotal would overflow. The cart
    /// is left unchanged on error.
    pub fn add(
        &mut self,
        product_id: ProductId,
        catalog: &Catalog,
    ) -> Result<AddOutcome, CartError> {
        let product = catalog
            .find(product_id)
            .ok_or(CartError::UnknownProduct(product_id))?;

        let existing = self.lines.iter().position(|l| l.id == product_id);
        let unit_price = existing
            .and_then(|idx| self.lines.get(idx))
            .map_or(product.price, |line| line.price);
        let subtotal = checked_subtotal(&self.lines)?;
        subtotal
            .checked_add(unit_price)
            .ok_or(CartError::AmountOverflow(product_id))?;

        if let Some(line) = existing.and_then(|idx| self.lines.get_mut(idx)) {
            line.quantity = line
                .quantity
                .checked_add(1)
                .ok_or(CartError::QuantityOverflow(product_id))?;
            return Ok(AddOutcome::Incremented {
                quantity: line.quantity,
            });
        }

        self.lines.push(CartLine {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            quantity: 1,
        });
        Ok(AddOutcome::AddedNew)
    }

    /// Remove the line for `product_id`, returning it if it was present.
    pub fn remove(&mut self, product_id: ProductId) -> Option<CartLine> {
        let idx = self.lines.iter().position(|l| l.id == product_id)?;
        Some(self.lines.remove(idx))
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of every line total.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::AmountOverflow`] naming the first line that
    /// overflows. Carts built through [`Cart::add`] or deserialization never
    /// do.
    pub fn subtotal(&self) -> Result<Money, CartError> {
        checked_subtotal(&self.lines)
    }

    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == product_id)
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}

fn checked_subtotal(lines: &[CartLine]) -> Result<Money, CartError> {
    lines.iter().try_fold(Money::ZERO, |acc, line| {
        line.line_total()
            .and_then(|total| acc.checked_add(total))
            .ok_or(CartError::AmountOverflow(line.id))
    })
}

impl TryFrom<Vec<CartLine>> for Cart {
    type Error = CartError;

    fn try_from(lines: Vec<CartLine>) -> Result<Self, Self::Error> {
        for (i, line) in lines.iter().enumerate() {
            if line.quantity == 0 {
                return Err(CartError::ZeroQuantity(line.id));
            }
            if lines.iter().take(i).any(|prev| prev.id == line.id) {
                return Err(CartError::DuplicateLine(line.id));
            }
        }
        checked_subtotal(&lines)?;
        Ok(Self { lines })
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}
