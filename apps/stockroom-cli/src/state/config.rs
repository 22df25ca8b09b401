//! # Application Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOCKROOM_DB_PATH=/tmp/stockroom.db                                │
//! │     STOCKROOM_CURRENCY_SYMBOL=€                                        │
//! │     STOCKROOM_CURRENCY_DECIMALS=2                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/stockroom/config.toml (Linux)                            │
//! │     ~/Library/Application Support/com.stockroom.stockroom/ (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # config.toml
//! database_path = "/var/lib/stockroom/stockroom.db"
//! currency_symbol = "$"
//! currency_decimals = 2
//! max_connections = 4
//! ```
//!
//! Configuration is read-only after loading, so no lock is needed.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Largest supported number of currency decimals.
const MAX_CURRENCY_DECIMALS: u8 = 6;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read or parsed.
    #[error("Failed to load config: {0}")]
    LoadFailed(String),

    /// A value is out of range.
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// No platform data directory and no explicit database path.
    #[error("Could not determine app data directory")]
    NoDataDirectory,
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Database file. `None` uses the platform data directory.
    pub database_path: Option<PathBuf>,

    /// Currency symbol for price display
    pub currency_symbol: String,

    /// Number of decimal places prices are stored with.
    /// e.g. 2 means a stored 1234 is shown as 12.34
    pub currency_decimals: u8,

    /// Connection pool size.
    pub max_connections: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: None,
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            max_connections: 4,
        }
    }
}

impl AppConfig {
    /// Loads configuration from file and environment.
    ///
    /// ## Arguments
    /// * `config_path` - Explicit config file; `None` uses the platform config dir
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Loads configuration, reading overrides through `lookup` instead of
    /// the process environment.
    fn load_with(
        config_path: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Checks that every value is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.currency_decimals > MAX_CURRENCY_DECIMALS {
            return Err(ConfigError::Invalid(format!(
                "currency_decimals must be at most {}, got {}",
                MAX_CURRENCY_DECIMALS, self.currency_decimals
            )));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Applies `STOCKROOM_*` overrides from a variable lookup.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("STOCKROOM_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = Some(PathBuf::from(path));
        }

        if let Some(symbol) = lookup("STOCKROOM_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(decimals) = lookup("STOCKROOM_CURRENCY_DECIMALS") {
            match decimals.parse::<u8>() {
                Ok(d) => self.currency_decimals = d,
                Err(_) => warn!(value = %decimals, "Ignoring invalid STOCKROOM_CURRENCY_DECIMALS"),
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "stockroom", "stockroom")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Returns the database file path, creating its directory if needed.
    ///
    /// ## Platform-Specific Defaults
    /// - **macOS**: `~/Library/Application Support/com.stockroom.stockroom/stockroom.db`
    /// - **Windows**: `%APPDATA%\stockroom\stockroom\data\stockroom.db`
    /// - **Linux**: `~/.local/share/stockroom/stockroom.db`
    pub fn resolve_database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let dirs = directories::ProjectDirs::from("com", "stockroom", "stockroom")
            .ok_or(ConfigError::NoDataDirectory)?;
        let data_dir: &Path = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join("stockroom.db"))
    }

    /// Formats an amount in the smallest currency unit for display.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(1234), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = amount / divisor;
        let frac = (amount % divisor).abs();

        format!(
            "{}{}{}",
            if amount < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}
