//! Non-negative monetary amounts using decimal arithmetic.
//!
//! The simulator works in a single implicit currency, so a [`Money`] is just
//! an exact decimal amount that can never go below zero.
//!
//! All arithmetic is checked: anything that would leave the `Decimal` range
//! returns `None` instead of panicking.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Money`] amount.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The amount is below zero.
    #[error("amount cannot be negative: {0}")]
    Negative(Decimal),
}

/// A non-negative amount of money.
///
/// Serialized as a decimal string (`"19.99"`). Deserialization accepts either
/// a string or a JSON number, so catalogs written by hand with plain numbers
/// load without conversion.
///
/// ## Examples
///
/// ```
/// use cartsim_core::Money;
///
/// let price = Money::from_cents(1999);
/// assert_eq!(price.to_string(), "$19.99");
/// assert_eq!(price.checked_mul(2).unwrap().to_string(), "$39.98");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create an amount from a decimal, rejecting negatives.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create an amount from whole currency units.
    #[must_use]
    pub const fn whole(units: u32) -> Self {
        Self(Decimal::from_parts(units, 0, 0, false, 0))
    }

    /// Create an amount from hundredths of a currency unit.
    #[must_use]
    pub const fn from_cents(cents: u32) -> Self {
        Self(Decimal::from_parts(cents, 0, 0, false, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// `self + rhs`, or `None` on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// `self * quantity`, or `None` on overflow.
    #[must_use]
    pub fn checked_mul(self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity)).map(Self)
    }

    /// Multiply by a rate (e.g. a tax rate), or `None` on overflow.
    ///
    /// A negative rate is clamped to zero.
    #[must_use]
    pub fn checked_apply_rate(self, rate: Decimal) -> Option<Self> {
        self.0
            .checked_mul(rate)
            .map(|amount| Self(amount.max(Decimal::ZERO)))
    }

    /// Sum of `amounts`, or `None` on overflow.
    #[must_use]
    pub fn checked_sum<I: IntoIterator<Item = Self>>(amounts: I) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, Self::checked_add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl From<u32> for Money {
    fn from(units: u32) -> Self {
        Self::whole(units)
    }
}
