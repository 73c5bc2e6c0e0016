//! Pricing engine: subtotal, shipping, tax and total.
//!
//! Every function here is pure. Results are recomputed from the cart on each
//! request; nothing is cached.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::Cart;
use crate::types::{Money, PostalCode};

/// Subtotal at or above which shipping is free.
pub const FREE_SHIPPING_THRESHOLD: Money = Money::whole(10_000);

/// Shipping cost outside the premium zones.
pub const BASE_SHIPPING_COST: Money = Money::whole(500);

/// Added to the base cost for premium-zone postal codes.
pub const PREMIUM_ZONE_SURCHARGE: Money = Money::whole(750);

/// Postal codes that pay the premium surcharge.
pub const PREMIUM_ZONES: &[&str] = &["1400", "2000", "5000"];

/// Tax rate applied to subtotal plus shipping (21%).
pub const TAX_RATE: Decimal = Decimal::from_parts(21, 0, 0, false, 2);

/// Validation failures that stop a pricing update.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Shipping was requested without a postal code.
    #[error("a postal code is required to calculate shipping")]
    MissingPostalCode,

    /// A figure doesn't fit in a [`Money`] amount.
    #[error("order total is too large to calculate")]
    AmountOverflow,
}

/// Shipping inputs collected by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingRequest {
    pub requested: bool,
    pub postal_code: String,
}

impl ShippingRequest {
    /// No shipping.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Ship to `postal_code`.
    #[must_use]
    pub fn to(postal_code: impl Into<String>) -> Self {
        Self {
            requested: true,
            postal_code: postal_code.into(),
        }
    }
}

/// Computed totals for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    pub subtotal: Money,
    pub shipping: Money,
    pub tax_amount: Money,
    pub total: Money,
}

impl PricingResult {
    /// All four figures at zero.
    pub const ZERO: Self = Self {
        subtotal: Money::ZERO,
        shipping: Money::ZERO,
        tax_amount: Money::ZERO,
        total: Money::ZERO,
    };
}

/// Sum of `price * quantity` over every line.
///
/// # Errors
///
/// Returns [`PricingError::AmountOverflow`] if the sum doesn't fit.
pub fn subtotal(cart: &Cart) -> Result<Money, PricingError> {
    cart.subtotal().map_err(|_| PricingError::AmountOverflow)
}

/// Whether `postal_code` is in a premium zone (exact match).
#[must_use]
pub fn is_premium_zone(postal_code: &PostalCode) -> bool {
    PREMIUM_ZONES.contains(&postal_code.as_str())
}

/// Shipping cost for a subtotal and destination.
///
/// # Errors
///
/// Returns [`PricingError::MissingPostalCode`] when shipping is requested but
/// `postal_code` is empty after trimming. Nothing is validated when shipping
/// is not requested.
pub fn shipping_cost(
    subtotal: Money,
    postal_code: &str,
    shipping_requested: bool,
) -> Result<Money, PricingError> {
    if !shipping_requested {
        return Ok(Money::ZERO);
    }

    let postal_code =
        PostalCode::parse(postal_code).map_err(|_| PricingError::MissingPostalCode)?;

    if subtotal >= FREE_SHIPPING_THRESHOLD {
        return Ok(Money::ZERO);
    }

    if is_premium_zone(&postal_code) {
        BASE_SHIPPING_COST
            .checked_add(PREMIUM_ZONE_SURCHARGE)
            .ok_or(PricingError::AmountOverflow)
    } else {
        Ok(BASE_SHIPPING_COST)
    }
}

/// Apply tax to `subtotal + shipping`.
///
/// # Errors
///
/// Returns [`PricingError::AmountOverflow`] if the taxed total doesn't fit.
pub fn total_for_order(subtotal: Money, shipping: Money) -> Result<PricingResult, PricingError> {
    let taxable_base = subtotal
        .checked_add(shipping)
        .ok_or(PricingError::AmountOverflow)?;
    let tax_amount = taxable_base
        .checked_apply_rate(TAX_RATE)
        .ok_or(PricingError::AmountOverflow)?;
    let total = taxable_base
        .checked_add(tax_amount)
        .ok_or(PricingError::AmountOverflow)?;
    Ok(PricingResult {
        subtotal,
        shipping,
        tax_amount,
        total,
    })
}

/// Price the whole order.
///
/// An empty cart yields [`PricingResult::ZERO`] without looking at the
/// shipping inputs.
///
/// # Errors
///
/// Returns [`PricingError::MissingPostalCode`] as described on
/// [`shipping_cost`], and [`PricingError::AmountOverflow`] if any figure
/// doesn't fit.
pub fn compute_order(
    cart: &Cart,
    shipping: &ShippingRequest,
) -> Result<PricingResult, PricingError> {
    let subtotal = subtotal(cart)?;
    if subtotal.is_zero() {
        return Ok(PricingResult::ZERO);
    }

    let shipping = shipping_cost(subtotal, &shipping.postal_code, shipping.requested)?;
    total_for_order(subtotal, shipping)
}
