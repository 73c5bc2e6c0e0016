//! Signals returned to the presentation layer.
//!
//! The core never talks to the user. Operations hand back [`Notice`] values
//! and a presentation adapter decides how to show them.

use serde::Serialize;

use crate::types::ProductId;

/// Something the user should be told about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// A product was added as a new cart line.
    AddedNew { id: ProductId, name: String },
    /// An existing line got one more unit.
    Incremented {
        id: ProductId,
        name: String,
        quantity: u32,
    },
    /// A line was removed.
    Removed { id: ProductId, name: String },
    /// Remove was asked for a product that isn't in the cart.
    NotInCart { id: ProductId },
    /// The cart and its persisted copy were cleared.
    Cleared,
    /// Shipping was requested without a postal code; totals were not updated.
    MissingPostalCode,
    /// The order total is too large to calculate; totals were not updated.
    TotalsUnavailable,
    /// The catalog could not be loaded; the session cannot start.
    CatalogLoadFailed { reason: String },
}

impl Notice {
    /// Whether this notice reports a problem rather than a completed action.
    #[must_use]
    pub const fn is_problem(&self) -> bool {
        matches!(
            self,
            Self::NotInCart { .. }
                | Self::MissingPostalCode
                | Self::TotalsUnavailable
                | Self::CatalogLoadFailed { .. }
        )
    }
}
