//! Session startup.
//!
//! Loads the catalog once, then restores the cart from the state directory.
//! A catalog failure is reported once and no session is created.

use std::io::Write;

use cartsim_core::{CartStore, Session};
use tracing::info;

use crate::config::SimulatorConfig;
use crate::error::Result;
use crate::loader::load_catalog;
use crate::notify::notify_all;
use crate::storage::FileStore;

/// Load the catalog and start a session backed by [`FileStore`].
///
/// On a catalog failure the [`cartsim_core::Notice::CatalogLoadFailed`]
/// message is written to `out` before the error is returned.
///
/// # Errors
///
/// Returns [`crate::CliError::CatalogLoad`] if the catalog can't be loaded.
pub async fn start<W: Write>(
    config: &SimulatorConfig,
    out: &mut W,
) -> Result<Session<FileStore>> {
    let catalog = match load_catalog(&config.catalog).await {
        Ok(catalog) => catalog,
        Err(e) => {
            let err = crate::CliError::from(e);
            if let Some(notice) = err.notice() {
                notify_all(out, &[notice])?;
            }
            return Err(err);
        }
    };

    let storage = FileStore::new(&config.state_dir);
    info!(state_dir = %storage.dir().display(), "Restoring cart");
    Ok(Session::start(catalog, CartStore::new(storage)))
}
