//! Cartsim CLI - Command-line front end for the cart simulator.
//!
//! This crate is the presentation layer around `cartsim-core`: it loads the
//! catalog, stores the cart on disk, asks before destructive actions and turns
//! core notices into messages.
//!
//! # Modules
//!
//! - [`config`] - Environment and command-line configuration
//! - [`loader`] - Async catalog loading from a file or URL
//! - [`storage`] - File-backed key-value storage for the cart
//! - [`app`] - Session startup
//! - [`commands`] - Subcommands and the interactive shell
//! - [`render`] / [`notify`] - Text output
//! - [`confirm`] - Yes/no prompts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod commands;
pub mod config;
pub mod confirm;
pub mod error;
pub mod loader;
pub mod notify;
pub mod render;
pub mod storage;

pub use config::{CatalogSource, ConfigError, SimulatorConfig};
pub use error::{CliError, Result};
pub use loader::{CatalogLoadError, load_catalog, load_catalog_with};
pub use storage::FileStore;
