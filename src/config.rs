use config::{Config, Environment, File};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::providers::{CatalogError, CatalogResult};

pub const DEFAULT_BASE_URL: &str = "https://pocket.limitlesstcg.com/cards";
pub const DEFAULT_SHINY_QUERY: &str = "is:shiny,sfa";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("pocket-catalog/", env!("CARGO_PKG_VERSION"));

/// Settings for a catalog run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Sets-listing page; its scheme and host are the origin for every relative link
    pub base_url: String,
    /// Search query selecting shiny variants
    pub shiny_query: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            shiny_query: DEFAULT_SHINY_QUERY.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl CatalogConfig {
    /// Load from `pocket_catalog.toml` (optional) and `POCKET_CATALOG_*` environment variables
    pub fn load() -> CatalogResult<Self> {
        let config = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("shiny_query", DEFAULT_SHINY_QUERY)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
            .set_default("user_agent", DEFAULT_USER_AGENT)?
            .add_source(File::with_name("pocket_catalog").required(false))
            .add_source(Environment::with_prefix("POCKET_CATALOG"))
            .build()?;

        let loaded: CatalogConfig = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Same as [`CatalogConfig::load`], but falls back to defaults on failure
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load configuration ({}). Using defaults", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> CatalogResult<()> {
        let parsed = url::Url::parse(&self.base_url).map_err(|e| {
            CatalogError::ConfigurationError(format!("Invalid base_url {}: {}", self.base_url, e))
        })?;
        if parsed.host_str().is_none() {
            return Err(CatalogError::ConfigurationError(format!(
                "base_url {} has no host",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(CatalogError::ConfigurationError(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
