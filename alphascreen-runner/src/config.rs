//! Screen configuration, stored as TOML.
//!
//! Every field has a default, so an empty file (or no file) is a valid config.

use alphascreen_core::screen::{IndicatorWindows, ScreenParams};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Parameters of a screening run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Tickers screened when none are given on the command line.
    pub tickers: Vec<String>,
    /// Calendar days of history requested per ticker.
    pub lookback_days: u32,
    /// Minimum number of complete bars a ticker needs.
    pub min_bars: usize,
    /// Tickers whose latest close is below this are skipped.
    pub price_floor: f64,
    /// Rows in each of the strong-buy and strong-sell views.
    pub top_n: usize,
    /// Upper bound on tickers fetched at the same time.
    pub max_concurrency: usize,
    pub indicators: IndicatorWindows,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        let params = ScreenParams::default();
        Self {
            tickers: ["AAPL", "MSFT", "GOOGL", "NVDA"]
                .into_iter()
                .map(String::from)
                .collect(),
            lookback_days: 183,
            min_bars: params.min_bars,
            price_floor: params.price_floor,
            top_n: 10,
            max_concurrency: 4,
            indicators: params.windows,
        }
    }
}

impl ScreenConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: ScreenConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookback_days == 0 {
            return Err(ConfigError::Invalid("lookback_days must be > 0".into()));
        }
        if self.min_bars == 0 {
            return Err(ConfigError::Invalid("min_bars must be > 0".into()));
        }
        if !self.price_floor.is_finite() || self.price_floor < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "price_floor must be a non-negative number, got {}",
                self.price_floor
            )));
        }
        if self.max_concurrency == 0 {
            return Err(ConfigError::Invalid("max_concurrency must be > 0".into()));
        }
        self.indicators.validate().map_err(ConfigError::Invalid)
    }

    /// Thresholds and windows handed to the snapshot builder.
    pub fn params(&self) -> ScreenParams {
        ScreenParams {
            min_bars: self.min_bars,
            price_floor: self.price_floor,
            windows: self.indicators,
        }
    }

    /// Inclusive date range ending at `today`.
    pub fn date_range(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        (today - Duration::days(i64::from(self.lookback_days)), today)
    }
}
