//! Configuration
//!
//! Hierarchical configuration with an optional TOML file source and
//! `SITEVIEWS__`-prefixed environment variable overrides.

use crate::error::ViewError;
use crate::logging::LoggingConfig;
use crate::types::Locale;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewsConfig {
    /// System default locale tag (the designated primary translation)
    #[serde(default = "default_locale_tag")]
    pub default_locale: String,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the sled database holding views and retrievers
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_locale_tag() -> String {
    "en-US".to_string()
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(".siteviews/views.db")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale_tag(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ViewsConfig {
    /// Load configuration from an optional file plus environment overrides
    /// (e.g. `SITEVIEWS__DEFAULT_LOCALE=de-DE`, `SITEVIEWS__STORAGE__PATH=...`).
    pub fn load(file: Option<&Path>) -> Result<Self, ViewError> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }
        builder = builder.add_source(Environment::with_prefix("SITEVIEWS").separator("__"));
        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Parse the configured default locale tag.
    pub fn default_locale(&self) -> Result<Locale, ViewError> {
        self.default_locale
            .parse()
            .map_err(|err| ViewError::InvalidLocale {
                tag: self.default_locale.clone(),
                message: format!("{:?}", err),
            })
    }
}
