//! Catalog loading from disk or HTTP.

use cartsim_core::{Catalog, CatalogError};
use thiserror::Error;
use tracing::{error, info};

use crate::config::CatalogSource;

/// Failure to fetch or parse the catalog. Fatal for the session.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// Reading the catalog file failed.
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP request failed or returned an error status.
    #[error("failed to fetch catalog: {0}")]
    Http(#[from] reqwest::Error),

    /// The document is not a valid catalog.
    #[error("invalid catalog: {0}")]
    Invalid(#[from] CatalogError),
}

/// Fetch and parse the catalog.
///
/// # Errors
///
/// Returns `CatalogLoadError` if the source can't be read or doesn't hold a
/// valid catalog.
pub async fn load_catalog(source: &CatalogSource) -> Result<Catalog, CatalogLoadError> {
    load_catalog_with(&reqwest::Client::new(), source).await
}

/// Like [`load_catalog`], fetching URLs through `client`.
///
/// # Errors
///
/// Returns `CatalogLoadError` if the source can't be read or doesn't hold a
/// valid catalog.
pub async fn load_catalog_with(
    client: &reqwest::Client,
    source: &CatalogSource,
) -> Result<Catalog, CatalogLoadError> {
    let result = fetch(client, source)
        .await
        .and_then(|body| Catalog::from_json(&body).map_err(CatalogLoadError::from));

    match &result {
        Ok(catalog) => info!(source = %source, products = catalog.len(), "Catalog loaded"),
        Err(e) => error!(source = %source, error = %e, "Failed to load catalog"),
    }
    result
}

async fn fetch(
    client: &reqwest::Client,
    source: &CatalogSource,
) -> Result<String, CatalogLoadError> {
    match source {
        CatalogSource::File(path) => Ok(tokio::fs::read_to_string(path).await?),
        CatalogSource::Url(url) => {
            let body = client
                .get(url.clone())
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?;
            Ok(body)
        }
    }
}
