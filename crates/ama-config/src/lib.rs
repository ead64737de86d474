//! # ama-config
//!
//! Layered configuration loading for ama using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`AMA_*` prefix, `__` as separator)
//! 2. Project-level `.ama/config.toml`
//! 3. User-level `~/.config/ama/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `AMA_DATABASE__PATH` -> `database.path`,
//! `AMA_ROUTER__BASE_URL` -> `router.base_url`, and so on.
//!
//! # Usage
//!
//! ```no_run
//! use ama_config::AmaConfig;
//!
//! let config = AmaConfig::load_with_dotenv().expect("config");
//!
//! if config.router.is_configured() {
//!     println!("Routing via {}", config.router.base_url);
//! }
//! ```

mod database;
mod error;
mod feed;
mod general;
mod router;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use feed::FeedConfig;
pub use general::GeneralConfig;
pub use router::RouterConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Env var prefix for every setting.
pub const ENV_PREFIX: &str = "AMA_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AmaConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub router: RouterConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl AmaConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and the CLI can layer extra providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".ama/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject values that would make paging or previews meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feed.posts_per_page == 0 {
            return Err(ConfigError::InvalidValue {
                field: "feed.posts_per_page".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.feed.preview_length == 0 {
            return Err(ConfigError::InvalidValue {
                field: "feed.preview_length".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// The router section, or [`ConfigError::NotConfigured`] when it lacks a base URL.
    pub fn require_router(&self) -> Result<&RouterConfig, ConfigError> {
        if self.router.is_configured() {
            Ok(&self.router)
        } else {
            Err(ConfigError::NotConfigured {
                section: "router".into(),
            })
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ama").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AmaConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.router.is_configured());
        assert_eq!(config.database.path, ".ama/ama.db");
    }

    #[test]
    fn figment_builds_without_files() {
        let config: AmaConfig = AmaConfig::figment()
            .extract()
            .expect("should extract defaults");
        assert_eq!(config.general.default_limit, 20);
        assert_eq!(config.feed.posts_per_page, 20);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let mut config = AmaConfig::default();
        config.feed.posts_per_page = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "feed.posts_per_page"));
    }

    #[test]
    fn missing_router_is_reported() {
        let err = AmaConfig::default().require_router().unwrap_err();
        assert!(matches!(err, ConfigError::NotConfigured { ref section } if section == "router"));
    }
}
