//! Subcommand implementations.
//!
//! - [`cart`] - One-shot catalog, cart and pricing commands
//! - [`shell`] - Interactive loop over a single session

pub mod cart;
pub mod shell;
