//! Configuration management for the review fetcher
//!
//! Configuration is layered: built-in defaults, then a TOML file (explicit
//! `--config`, or the first file found in the standard locations), then
//! command-line overrides applied by the CLI layer.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::{AppDescriptor, ClientConfig, CountryCatalog, CountryCode, DispatcherConfig};
use crate::constants::{config as config_paths, output};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Fetch pool and HTTP client settings
    pub fetch: FetchConfig,
    /// Applications to process, in order
    pub apps: Vec<AppDescriptor>,
    /// Market list override
    pub catalog: CatalogConfig,
    /// Output locations
    pub output: OutputConfig,
}

/// Fetch settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct FetchConfig {
    #[serde(flatten)]
    pub dispatcher: DispatcherConfig,
    #[serde(flatten)]
    pub client: ClientConfig,
}

/// Market list override; `None` keeps the built-in catalog
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    pub countries: Option<Vec<CountryCode>>,
}

/// Where exports and the run log go
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for spreadsheets and the run log
    pub directory: PathBuf,
    /// Run log file name inside `directory`
    pub log_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            log_file: output::DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl OutputConfig {
    pub fn log_path(&self) -> PathBuf {
        self.directory.join(&self.log_file)
    }
}

impl AppConfig {
    /// Load configuration from an explicit file or the standard locations
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an explicitly requested file is missing, or
    /// any file found cannot be read or parsed
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let config_path = match config_file_override {
            Some(path) if path.exists() => Some(path),
            Some(path) => return Err(ConfigError::NotFound { path }),
            None => Self::find_config_file(),
        };

        match config_path {
            Some(path) => Self::load_from_file(&path).await,
            None => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a TOML file
    pub async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config: AppConfig = toml::from_str(&content)?;
        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(config_paths::LOCAL_FILE)];
        if let Ok(user_path) = Self::default_config_path() {
            search_paths.push(user_path);
        }

        search_paths.into_iter().find(|path| {
            let exists = path.exists();
            if exists {
                debug!("Found config file: {}", path.display());
            }
            exists
        })
    }

    /// Default config file path for the current user
    pub fn default_config_path() -> ConfigResult<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir
            .join(config_paths::APP_DIR)
            .join(config_paths::FILE_NAME))
    }

    /// Markets to query: the override if present, else the built-in list
    pub fn catalog(&self) -> CountryCatalog {
        match &self.catalog.countries {
            Some(codes) => CountryCatalog::new(codes.iter().cloned()),
            None => CountryCatalog::default(),
        }
    }

    /// Check values that deserialize fine but cannot be run
    pub fn validate(&self) -> ConfigResult<()> {
        self.fetch
            .dispatcher
            .validate()
            .map_err(|reason| ConfigError::InvalidValue {
                field: "fetch.worker_count".to_string(),
                value: self.fetch.dispatcher.worker_count.to_string(),
                reason,
            })?;

        if self.fetch.client.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "fetch.request_timeout".to_string(),
                value: "0s".to_string(),
                reason: "Timeout cannot be zero".to_string(),
            });
        }

        if self.apps.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "apps".to_string(),
                value: "[]".to_string(),
                reason: "Configure at least one app in the config file or with --app NAME=ID"
                    .to_string(),
            });
        }

        for app in &self.apps {
            if app.name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "apps.name".to_string(),
                    value: app.name.clone(),
                    reason: "Application name cannot be empty".to_string(),
                });
            }
        }

        if self.output.log_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "output.log_file".to_string(),
                value: self.output.log_file.clone(),
                reason: "Log file name cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
