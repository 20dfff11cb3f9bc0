//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::catalog::{ClientConfig, PagePlan};
use crate::dashboard::GenreAggregator;
use crate::genres::ChartOrder;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub genres: GenresConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Catalog API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Bearer token for backends behind auth
    #[serde(default)]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            token: None,
        }
    }
}

impl ApiConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            request_timeout_ms: self.request_timeout_secs.saturating_mul(1000),
            token: self.token.clone().filter(|t| !t.is_empty()),
        }
    }
}

/// Genre chart configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GenresConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default = "default_page_cap")]
    pub page_cap: u32,

    #[serde(default = "default_top_n")]
    pub top_n: usize,

    #[serde(default)]
    pub order: ChartOrder,
}

fn default_page_size() -> u32 {
    50
}

fn default_page_cap() -> u32 {
    10 // sample of at most 500 movies
}

fn default_top_n() -> usize {
    12
}

impl Default for GenresConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_cap: default_page_cap(),
            top_n: default_top_n(),
            order: ChartOrder::default(),
        }
    }
}

impl GenresConfig {
    pub fn page_plan(&self) -> PagePlan {
        PagePlan::new(self.page_size, self.page_cap)
    }

    pub fn aggregator(&self) -> GenreAggregator {
        GenreAggregator::new(self.page_plan())
            .top_n(self.top_n)
            .order(self.order)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// Files that exist but fail to load are skipped and reported in
    /// [`LoadedConfig::errors`], so the caller can log them once logging
    /// is set up.
    pub fn load_default() -> LoadedConfig {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("marquee").join("config.toml")),
            Some(PathBuf::from("/etc/marquee/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// Load the first candidate that exists and parses
    fn load_first(paths: &[PathBuf]) -> LoadedConfig {
        let mut errors = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    return LoadedConfig {
                        config,
                        path: Some(path.clone()),
                        errors,
                    }
                }
                Err(e) => errors.push(e),
            }
        }

        LoadedConfig {
            config: Self::from_env(),
            path: None,
            errors,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(url) = var("MARQUEE_API_URL") {
            self.api.base_url = url;
        }
        if let Some(token) = var("MARQUEE_API_TOKEN") {
            self.api.token = Some(token);
        }

        // Genre chart overrides
        if let Some(size) = var("MARQUEE_PAGE_SIZE").and_then(|v| v.parse().ok()) {
            self.genres.page_size = size;
        }
        if let Some(cap) = var("MARQUEE_PAGE_CAP").and_then(|v| v.parse().ok()) {
            self.genres.page_cap = cap;
        }
        if let Some(top_n) = var("MARQUEE_TOP_N").and_then(|v| v.parse().ok()) {
            self.genres.top_n = top_n;
        }

        // Logging overrides
        if let Some(level) = var("MARQUEE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("MARQUEE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Outcome of [`Config::load_default`]
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the config came from; `None` means defaults plus environment
    pub path: Option<PathBuf>,
    /// Files that exist but could not be read or parsed
    pub errors: Vec<ConfigError>,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Marquee Configuration
#
# Environment variables override these settings:
# - MARQUEE_API_URL
# - MARQUEE_API_TOKEN
# - MARQUEE_PAGE_SIZE
# - MARQUEE_PAGE_CAP
# - MARQUEE_TOP_N
# - MARQUEE_LOG_LEVEL
# - MARQUEE_LOG_FORMAT

[api]
# Catalog backend URL
base_url = "http://localhost:8000"

# Request timeout in seconds
request_timeout_secs = 30

# Optional bearer token
# token = ""

[genres]
# Movies requested per page
page_size = 50

# Maximum pages scanned for the genre chart
page_cap = 10

# Number of genres shown in the chart
top_n = 12

# Bar order: first_seen or by_count
order = "first_seen"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
