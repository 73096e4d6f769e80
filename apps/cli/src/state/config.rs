//! # Configuration State
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--api-url`, `--data-dir`)
//! 2. Environment variables (`STOREFRONT_*`)
//! 3. Config file (`storefront.toml`)
//! 4. Defaults (this file)
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! api_url = "https://api.escuelajs.co/api/v1"
//! data_dir = "/home/me/.local/share/storefront"
//! page_size = 12
//! http_timeout_secs = 10
//! ```
//!
//! Configuration is read-only after loading.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use storefront_catalog::{CatalogConfig, DEFAULT_API_URL};
use storefront_core::validation::validate_limit;
use storefront_core::DEFAULT_PAGE_SIZE;
use storefront_store::FileStorage;

/// Name of the config file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "storefront.toml";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root of the catalog API.
    pub api_url: String,

    /// Where the cart is stored. `None` means the platform data directory.
    pub data_dir: Option<PathBuf>,

    /// Products per page when `--limit` is not given.
    pub page_size: u32,

    /// Timeout for each catalog request, in seconds.
    pub http_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: None,
            page_size: DEFAULT_PAGE_SIZE,
            http_timeout_secs: 10,
        }
    }
}

/// Values given on the command line. They win over everything else.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub api_url: Option<String>,
    pub data_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Loads configuration from file, environment and flags.
    ///
    /// An explicit `--config` path must exist; the default path is optional.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        Self::load_with_env(overrides, |name| std::env::var(name).ok())
    }

    /// Same as [`AppConfig::load`] with a custom environment lookup.
    pub fn load_with_env<F>(overrides: &ConfigOverrides, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match &overrides.config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides(env);
        config.apply_overrides(overrides);
        config.validate()?;

        Ok(config)
    }

    /// Reads a TOML config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading config from file");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `storefront.toml` in the platform config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "api_url must start with http:// or https://, got: {}",
                self.api_url
            )));
        }

        validate_limit(self.page_size)
            .map_err(|e| ConfigError::Invalid(format!("page_size: {e}")))?;

        if self.http_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "http_timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Directory the cart file lives in.
    pub fn storage_dir(&self) -> Option<PathBuf> {
        self.data_dir.clone().or_else(FileStorage::default_dir)
    }

    /// Catalog client settings derived from this config.
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig::new(self.api_url.clone())
            .with_timeout(Duration::from_secs(self.http_timeout_secs))
    }

    /// Applies environment variable overrides.
    ///
    /// Unparseable numbers are ignored with a warning.
    fn apply_env_overrides<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = env("STOREFRONT_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api_url = url;
        }

        if let Some(dir) = env("STOREFRONT_DATA_DIR") {
            debug!(dir = %dir, "Overriding data directory from environment");
            self.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(size) = env("STOREFRONT_PAGE_SIZE") {
            match size.parse() {
                Ok(size) => self.page_size = size,
                Err(_) => warn!(value = %size, "Ignoring invalid STOREFRONT_PAGE_SIZE"),
            }
        }

        if let Some(secs) = env("STOREFRONT_HTTP_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(secs) => self.http_timeout_secs = secs,
                Err(_) => warn!(value = %secs, "Ignoring invalid STOREFRONT_HTTP_TIMEOUT_SECS"),
            }
        }
    }

    fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(url) = &overrides.api_url {
            self.api_url = url.clone();
        }
        if let Some(dir) = &overrides.data_dir {
            self.data_dir = Some(dir.clone());
        }
    }
}
