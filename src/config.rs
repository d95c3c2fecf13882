//! Application configuration
//!
//! Settings are layered: built-in defaults, then an optional
//! `config.toml` in the user's config directory, then `MOVIE_SEARCH_*`
//! environment variables. `OMDB_API_KEY` is accepted as the API key.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::model::{DEFAULT_OMDB_URL, ModelSettings, PaginationMode};

const APP_DIR: &str = "movie-search-rs";
const ENV_PREFIX: &str = "MOVIE_SEARCH";
const API_KEY_ENV: &str = "OMDB_API_KEY";
const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// OMDb API key attached to every request
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Upper bound for a single provider request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Quiet period before a typed query is searched
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,

    /// Search while typing instead of only on Enter
    #[serde(default = "default_live_search")]
    pub live_search: bool,

    #[serde(default)]
    pub pagination: PaginationMode,

    /// Where preferences are stored; defaults to the user's data directory
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_api_url() -> String {
    DEFAULT_OMDB_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_min_query_len() -> usize {
    2
}

fn default_live_search() -> bool {
    true
}

impl AppConfig {
    /// Path of the optional config file
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// Load from the config file and environment, then validate
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = Self::config_path() {
            tracing::debug!(path = %path.display(), "Reading config file");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }
        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let mut config: AppConfig = settings.try_deserialize()?;
        if config.api_key.trim().is_empty() {
            if let Ok(key) = std::env::var(API_KEY_ENV) {
                config.api_key = key;
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document on top of the defaults
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            bail!(
                "no OMDb API key configured: set {API_KEY_ENV} or api_key in {}",
                Self::config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "config.toml".to_string())
            );
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be positive");
        }
        if self.min_query_len == 0 {
            bail!("min_query_len must be at least 1");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn preferences_path(&self) -> PathBuf {
        let dir = self
            .data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR)))
            .unwrap_or_else(|| PathBuf::from(".cache"));
        dir.join(PREFERENCES_FILE)
    }

    pub fn model_settings(&self) -> ModelSettings {
        ModelSettings {
            pagination_mode: self.pagination,
            min_query_len: self.min_query_len,
        }
    }
}
