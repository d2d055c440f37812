//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `ISTORE_DATA_DIR` - Directory holding the persisted cart and theme (default: `.istore`)
//! - `ISTORE_PRICE_CEILING` - Default price ceiling for catalog listings (default: 1400)
//! - `ISTORE_PREFERRED_THEME` - Theme used when none has been saved (default: light)

use std::path::PathBuf;

use istore_core::{Price, Theme};
use thiserror::Error;

use crate::listing::DEFAULT_PRICE_CEILING;

const DEFAULT_DATA_DIR: &str = ".istore";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory for the file-backed key-value store
    pub data_dir: PathBuf,
    /// Price ceiling applied by a fresh listing query
    pub price_ceiling: Price,
    /// Theme used when no valid preference has been persisted
    pub preferred_theme: Theme,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            price_ceiling: DEFAULT_PRICE_CEILING,
            preferred_theme: Theme::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparsable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_dir = lookup("ISTORE_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or(defaults.data_dir, PathBuf::from);

        let price_ceiling = match lookup("ISTORE_PRICE_CEILING") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Price::new)
                .map_err(|e| {
                    ConfigError::InvalidEnvVar("ISTORE_PRICE_CEILING".to_string(), e.to_string())
                })?,
            None => defaults.price_ceiling,
        };

        let preferred_theme = match lookup("ISTORE_PREFERRED_THEME") {
            Some(raw) => raw.trim().parse::<Theme>().map_err(|e| {
                ConfigError::InvalidEnvVar("ISTORE_PREFERRED_THEME".to_string(), e.to_string())
            })?,
            None => defaults.preferred_theme,
        };

        Ok(Self {
            data_dir,
            price_ceiling,
            preferred_theme,
        })
    }
}
