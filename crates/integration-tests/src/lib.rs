//! Integration tests for the cart simulator.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cartsim-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Startup, mutation and persistence across sessions
//! - `pricing_rules` - Shipping, tax and total properties
//! - `shell_session` - Scripted interactive sessions
//!
//! Every test runs in its own temporary directory holding a catalog file and
//! the cart state directory.

use std::fs;
use std::path::PathBuf;

use cartsim_cli::{CatalogSource, FileStore, SimulatorConfig};
use cartsim_core::Session;
use tempfile::TempDir;

/// Catalog used by most tests.
pub const SAMPLE_CATALOG: &str = r#"[
    {"id": 1, "name": "Widget", "price": 100},
    {"id": 2, "name": "Desk Chair", "price": 9500},
    {"id": 3, "name": "Notebook", "price": 12.5},
    {"id": 4, "name": "Monitor", "price": 15000}
]"#;

/// A temporary catalog file plus state directory.
pub struct TestContext {
    dir: TempDir,
    pub config: SimulatorConfig,
}

impl TestContext {
    /// Context using [`SAMPLE_CATALOG`].
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory can't be created.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(SAMPLE_CATALOG)
    }

    /// Context with a custom catalog document.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory can't be created.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn with_catalog(json: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = dir.path().join("productos.json");
        fs::write(&catalog_path, json).unwrap();
        let config = SimulatorConfig {
            catalog: CatalogSource::File(catalog_path),
            state_dir: dir.path().join("state"),
        };
        Self { dir, config }
    }

    /// Start a session, discarding startup output.
    ///
    /// # Panics
    ///
    /// Panics if the catalog fails to load.
    #[allow(clippy::unwrap_used)]
    pub async fn session(&self) -> Session<FileStore> {
        let mut sink = Vec::new();
        cartsim_cli::app::start(&self.config, &mut sink).await.unwrap()
    }

    /// Path of the persisted cart file.
    #[must_use]
    pub fn cart_file(&self) -> PathBuf {
        self.config
            .state_dir
            .join(format!("{}.json", cartsim_core::CART_STORAGE_KEY))
    }

    #[must_use]
    pub fn root(&self) -> &std::path::Path {
        self.dir.path()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
