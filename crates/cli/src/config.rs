//! Simulator configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CARTSIM_CATALOG` - Catalog file path or `http(s)` URL (default: `./productos.json`)
//! - `CARTSIM_STATE_DIR` - Directory holding the persisted cart (default: `.cartsim`)
//!
//! Command-line flags take precedence over both.

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_CATALOG: &str = "./productos.json";
const DEFAULT_STATE_DIR: &str = ".cartsim";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid catalog location {0}: {1}")]
    InvalidCatalog(String, String),
}

/// Where the catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// A JSON file on disk.
    File(PathBuf),
    /// A JSON document served over HTTP(S).
    Url(Url),
}

impl CatalogSource {
    /// Parse a catalog location. Anything starting with `http://` or
    /// `https://` is a URL; everything else is a file path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidCatalog` for an empty location or an
    /// unparseable URL.
    pub fn parse(location: &str) -> Result<Self, ConfigError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(ConfigError::InvalidCatalog(
                location.to_string(),
                "location is empty".to_string(),
            ));
        }

        if location.starts_with("http://") || location.starts_with("https://") {
            let url = Url::parse(location)
                .map_err(|e| ConfigError::InvalidCatalog(location.to_string(), e.to_string()))?;
            return Ok(Self::Url(url));
        }

        Ok(Self::File(PathBuf::from(location)))
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Simulator configuration.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Catalog location
    pub catalog: CatalogSource,
    /// Directory for persisted state
    pub state_dir: PathBuf,
}

impl SimulatorConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let catalog = match lookup("CARTSIM_CATALOG") {
            Some(value) => CatalogSource::parse(&value).map_err(|e| {
                ConfigError::InvalidEnvVar("CARTSIM_CATALOG".to_string(), e.to_string())
            })?,
            None => CatalogSource::File(PathBuf::from(DEFAULT_CATALOG)),
        };

        let state_dir = match lookup("CARTSIM_STATE_DIR") {
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::InvalidEnvVar(
                    "CARTSIM_STATE_DIR".to_string(),
                    "must not be empty".to_string(),
                ));
            }
            Some(value) => PathBuf::from(value),
            None => PathBuf::from(DEFAULT_STATE_DIR),
        };

        Ok(Self { catalog, state_dir })
    }

    /// Apply command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidCatalog` if `catalog` is not a valid
    /// location.
    pub fn with_overrides(
        mut self,
        catalog: Option<&str>,
        state_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if let Some(location) = catalog {
            self.catalog = CatalogSource::parse(location)?;
        }
        if let Some(dir) = state_dir {
            self.state_dir = dir;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SimulatorConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(
            config.catalog,
            CatalogSource::File(PathBuf::from("./productos.json"))
        );
        assert_eq!(config.state_dir, PathBuf::from(".cartsim"));
    }

    #[test]
    fn test_catalog_url_from_env() {
        let config = SimulatorConfig::from_lookup(lookup(&[(
            "CARTSIM_CATALOG",
            "https://shop.example.com/products.json",
        )]))
        .unwrap();
        assert!(matches!(
            config.catalog,
            CatalogSource::Url(ref u) if u.host_str() == Some("shop.example.com")
        ));
    }

    #[test]
    fn test_invalid_env_values() {
        let err = SimulatorConfig::from_lookup(lookup(&[("CARTSIM_CATALOG", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "CARTSIM_CATALOG"));

        let err = SimulatorConfig::from_lookup(lookup(&[("CARTSIM_STATE_DIR", "")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "CARTSIM_STATE_DIR"));
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            CatalogSource::parse("http://"),
            Err(ConfigError::InvalidCatalog(_, _))
        ));
    }

    #[test]
    fn test_overrides_win() {
        let config = SimulatorConfig::from_lookup(lookup(&[("CARTSIM_CATALOG", "a.json")]))
            .unwrap()
            .with_overrides(Some("b.json"), Some(PathBuf::from("/tmp/state")))
            .unwrap();
        assert_eq!(config.catalog, CatalogSource::File(PathBuf::from("b.json")));
        assert_eq!(config.state_dir, PathBuf::from("/tmp/state"));
    }
}
