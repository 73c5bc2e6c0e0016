//! Cartsim Core - Catalog, cart and pricing rules.
//!
//! This crate holds everything the cart simulator decides, and nothing it
//! shows. The `cartsim-cli` crate loads the catalog, provides file-backed
//! storage and renders results.
//!
//! # Architecture
//!
//! The core crate does no I/O of its own. Persistence goes through the
//! [`storage::KeyValueStore`] trait so any local key-value backend can hold
//! the cart.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, money and postal codes
//! - [`catalog`] - Products and catalog parsing
//! - [`cart`] - Cart lines and mutation rules
//! - [`pricing`] - Subtotal, shipping, tax and total
//! - [`storage`] / [`store`] - Key-value storage and cart persistence
//! - [`session`] - Coordinator owning catalog, cart and displayed totals
//! - [`notice`] - Signals for the presentation layer

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod notice;
pub mod pricing;
pub mod session;
pub mod storage;
pub mod store;
pub mod types;

pub use cart::{AddOutcome, Cart, CartError, CartLine};
pub use catalog::{Catalog, CatalogError, Product};
pub use notice::Notice;
pub use pricing::{PricingError, PricingResult, ShippingRequest};
pub use session::{CalculationState, Session, SessionError};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
pub use store::{CART_STORAGE_KEY, CartStore};
pub use types::*;
