//! Production configuration system
//!
//! Provides centralized configuration management with:
//! - Environment variable support
//! - Config file loading (optional)
//! - Runtime defaults
//! - Validation and type safety

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Data file locations
    pub paths: PathsConfig,

    /// Report output configuration
    pub output: OutputConfig,

    /// Analytics tuning
    pub analytics: AnalyticsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub locations_file: PathBuf,
    pub movements_file: PathBuf,
    pub log_directory: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub json_pretty: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Default top-N cut for ranked charts (dwell, events, vendors)
    pub top_limit: usize,
    /// Width of terminal bar charts, in characters
    pub chart_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "ERROR".to_string(),
                format: "pretty".to_string(),
                output: "console".to_string(),
            },
            paths: PathsConfig {
                locations_file: PathBuf::from("data/locations.csv"),
                movements_file: PathBuf::from("data/movements.csv"),
                log_directory: PathBuf::from("logs"),
            },
            output: OutputConfig { json_pretty: true },
            analytics: AnalyticsConfig {
                top_limit: 10,
                chart_width: 40,
            },
        }
    }
}

impl Config {
    /// Load configuration from environment, file, and defaults
    pub fn load() -> Result<Self> {
        let mut config = Config::default();

        // Try to load from config file if it exists
        let config_paths = [
            PathBuf::from("cowtrack.toml"),
            PathBuf::from(".cowtrack.toml"),
            dirs::config_dir()
                .map(|d| d.join("cowtrack").join("config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.exists() {
                info!(config_file = %path.display(), "Loading configuration from file");
                config = Self::load_from_file(path)?;
                break;
            }
        }

        // Override with environment variables
        config.apply_env_overrides()?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        // Logging overrides
        if let Ok(val) = env::var("LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = env::var("LOG_FORMAT") {
            self.logging.format = val;
        }
        if let Ok(val) = env::var("LOG_OUTPUT") {
            self.logging.output = val;
        }

        // Path overrides
        if let Ok(val) = env::var("COWTRACK_LOCATIONS_FILE") {
            self.paths.locations_file = PathBuf::from(val);
        }
        if let Ok(val) = env::var("COWTRACK_MOVEMENTS_FILE") {
            self.paths.movements_file = PathBuf::from(val);
        }
        if let Ok(val) = env::var("COWTRACK_LOG_DIR") {
            self.paths.log_directory = PathBuf::from(val);
        }

        // Analytics overrides
        if let Ok(val) = env::var("COWTRACK_TOP_LIMIT") {
            self.analytics.top_limit = val.parse().context("Invalid COWTRACK_TOP_LIMIT")?;
        }
        if let Ok(val) = env::var("COWTRACK_CHART_WIDTH") {
            self.analytics.chart_width = val.parse().context("Invalid COWTRACK_CHART_WIDTH")?;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.analytics.top_limit == 0 {
            return Err(anyhow::anyhow!("Top limit must be greater than 0"));
        }

        if self.analytics.chart_width < 10 || self.analytics.chart_width > 120 {
            return Err(anyhow::anyhow!(
                "Chart width must be between 10 and 120 characters, got {}",
                self.analytics.chart_width
            ));
        }

        if self.analytics.top_limit > 100 {
            warn!(
                top_limit = self.analytics.top_limit,
                "Very large top limit, reports may be unwieldy"
            );
        }

        // File logging needs a directory to write into
        if self.logging.output != "console" && !self.paths.log_directory.exists() {
            fs::create_dir_all(&self.paths.log_directory)
                .context("Failed to create log directory")?;
        }

        Ok(())
    }
}

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration instance
pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(|| Config::load().expect("Failed to load configuration"))
}
