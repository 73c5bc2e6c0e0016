//! Core value types for the simulator.
//!
//! This module provides type-safe wrappers for IDs, money and postal codes.

pub mod id;
pub mod money;
pub mod postal_code;

pub use id::*;
pub use money::{Money, MoneyError};
pub use postal_code::{PostalCode, PostalCodeError};
