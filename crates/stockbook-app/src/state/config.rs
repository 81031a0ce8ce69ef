//! # Configuration
//!
//! Settings loaded once at startup and read-only afterwards.
//!
//! ## Configuration Sources (Priority Order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Environment variables (STOCKBOOK_*)              highest priority  │
//! │  2. stockbook.toml                                                     │
//! │     • $STOCKBOOK_CONFIG if set                                         │
//! │     • else the platform config dir:                                    │
//! │       Linux:  ~/.config/stockbook/stockbook.toml                       │
//! │       macOS:  ~/Library/Application Support/com.stockbook.stockbook/   │
//! │  3. Defaults (this file)                             lowest priority   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## File Format
//! ```toml
//! store_name = "Corner Shop"
//! currency_symbol = "R$"
//! decimal_separator = ","
//! low_stock_threshold = 5
//! seed_demo_data = true
//! log_filter = "info,stockbook_core=debug"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use stockbook_core::{Money, DEFAULT_LOW_STOCK_THRESHOLD};
use thiserror::Error;
use tracing::debug;

/// Name of the config file looked up in the platform config dir.
pub const CONFIG_FILE_NAME: &str = "stockbook.toml";

/// Environment variable pointing at an explicit config file.
pub const CONFIG_PATH_ENV: &str = "STOCKBOOK_CONFIG";

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// AppConfig
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Shop name shown in the dashboard header.
    pub store_name: String,

    /// Currency symbol prefixed to amounts.
    pub currency_symbol: String,

    /// Separator between major and minor units ('.' or ',').
    pub decimal_separator: char,

    /// Products below this many units raise a stock alert.
    pub low_stock_threshold: i64,

    /// Load a handful of demo products and sales at startup.
    pub seed_demo_data: bool,

    /// `tracing` filter directive used when RUST_LOG is unset.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            store_name: "Stockbook".to_string(),
            currency_symbol: "$".to_string(),
            decimal_separator: '.',
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            seed_demo_data: false,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads defaults, then the config file (if any), then env overrides.
    pub fn load() -> ConfigResult<Self> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .ok()
            .map(PathBuf::from)
            .or_else(default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Reads a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        debug!(path = %path.display(), "Reading config file");
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Parses TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(raw: &str) -> ConfigResult<Self> {
        let config: AppConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `STOCKBOOK_*` overrides looked up through `lookup`.
    ///
    /// ## Environment Variables
    /// - `STOCKBOOK_STORE_NAME`
    /// - `STOCKBOOK_CURRENCY_SYMBOL`
    /// - `STOCKBOOK_DECIMAL_SEPARATOR`
    /// - `STOCKBOOK_LOW_STOCK_THRESHOLD`
    /// - `STOCKBOOK_SEED_DEMO_DATA` (`true`/`false`/`1`/`0`)
    /// - `STOCKBOOK_LOG`
    pub fn apply_env<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("STOCKBOOK_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(symbol) = lookup("STOCKBOOK_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(raw) = lookup("STOCKBOOK_DECIMAL_SEPARATOR") {
            let mut chars = raw.chars();
            self.decimal_separator = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => return Err(invalid("STOCKBOOK_DECIMAL_SEPARATOR", &raw)),
            };
        }

        if let Some(raw) = lookup("STOCKBOOK_LOW_STOCK_THRESHOLD") {
            self.low_stock_threshold = raw
                .trim()
                .parse()
                .map_err(|_| invalid("STOCKBOOK_LOW_STOCK_THRESHOLD", &raw))?;
        }

        if let Some(raw) = lookup("STOCKBOOK_SEED_DEMO_DATA") {
            self.seed_demo_data = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(invalid("STOCKBOOK_SEED_DEMO_DATA", &raw)),
            };
        }

        if let Some(filter) = lookup("STOCKBOOK_LOG") {
            self.log_filter = filter;
        }

        self.validate()
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.low_stock_threshold < 0 {
            return Err(invalid(
                "low_stock_threshold",
                &self.low_stock_threshold.to_string(),
            ));
        }
        if self.decimal_separator.is_ascii_digit() {
            return Err(invalid(
                "decimal_separator",
                &self.decimal_separator.to_string(),
            ));
        }
        Ok(())
    }

    /// Formats an amount for display, e.g. `$12.34` or `-R$5,00`.
    pub fn format_currency(&self, amount: Money) -> String {
        format!(
            "{}{}{}{}{:02}",
            if amount.is_negative() { "-" } else { "" },
            self.currency_symbol,
            amount.dollars().abs(),
            self.decimal_separator,
            amount.cents_part()
        )
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

/// `stockbook.toml` inside the platform config directory.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "stockbook", "stockbook")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_format_currency() {
        let config = AppConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");

        let config = AppConfig {
            currency_symbol: "R$".to_string(),
            decimal_separator: ',',
            ..AppConfig::default()
        };
        assert_eq!(config.format_currency(Money::from_cents(500)), "R$5,00");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str("store_name = \"Corner Shop\"\n").unwrap();
        assert_eq!(config.store_name, "Corner Shop");
        assert_eq!(config.low_stock_threshold, DEFAULT_LOW_STOCK_THRESHOLD);
        assert_eq!(config.currency_symbol, "$");
    }

    #[test]
    fn test_full_toml() {
        let raw = r#"
            store_name = "Loja"
            currency_symbol = "R$"
            decimal_separator = ","
            low_stock_threshold = 3
            seed_demo_data = true
            log_filter = "debug"
        "#;
        let config = AppConfig::from_toml_str(raw).unwrap();
        assert_eq!(config.decimal_separator, ',');
        assert_eq!(config.low_stock_threshold, 3);
        assert!(config.seed_demo_data);
    }

    #[test]
    fn test_bad_toml_is_rejected() {
        assert!(matches!(
            AppConfig::from_toml_str("low_stock_threshold = \"many\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            AppConfig::from_toml_str("low_stock_threshold = -1"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_env(env(&[
                ("STOCKBOOK_STORE_NAME", "Kiosk"),
                ("STOCKBOOK_LOW_STOCK_THRESHOLD", "4"),
                ("STOCKBOOK_SEED_DEMO_DATA", "yes"),
            ]))
            .unwrap();

        assert_eq!(config.store_name, "Kiosk");
        assert_eq!(config.low_stock_threshold, 4);
        assert!(config.seed_demo_data);
    }

    #[test]
    fn test_bad_env_values_are_rejected() {
        let mut config = AppConfig::default();
        assert!(config
            .apply_env(env(&[("STOCKBOOK_LOW_STOCK_THRESHOLD", "ten")]))
            .is_err());
        assert!(config
            .apply_env(env(&[("STOCKBOOK_DECIMAL_SEPARATOR", "..")]))
            .is_err());
        assert!(config
            .apply_env(env(&[("STOCKBOOK_SEED_DEMO_DATA", "maybe")]))
            .is_err());
    }
}
