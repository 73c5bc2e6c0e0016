//! Unified error handling for the command-line front end.

use cartsim_core::{Notice, PricingError, SessionError};
use thiserror::Error;

use crate::config::ConfigError;
use crate::loader::CatalogLoadError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog could not be loaded.
    #[error("Catalog error: {0}")]
    CatalogLoad(#[from] CatalogLoadError),

    /// A cart operation failed.
    #[error("Cart error: {0}")]
    Session(#[from] SessionError),

    /// Pricing inputs failed validation.
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// User input could not be understood.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// The notice to show the user for this error, when one exists.
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::Pricing(PricingError::MissingPostalCode) => Some(Notice::MissingPostalCode),
            Self::Pricing(PricingError::AmountOverflow) => Some(Notice::TotalsUnavailable),
            Self::CatalogLoad(e) => Some(Notice::CatalogLoadFailed {
                reason: e.to_string(),
            }),
            _ => None,
        }
    }
}

/// Result type alias for `CliError`.
pub type Result<T> = std::result::Result<T, CliError>;
