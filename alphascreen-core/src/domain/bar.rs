//! Bar: the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::data::provider::RawBar;

/// Daily OHLCV bar for a single symbol.
///
/// Missing provider fields are carried as `f64::NAN`; such bars are "void"
/// and are dropped before any indicator sees the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Attach a symbol to a raw provider bar.
    pub fn from_raw(symbol: &str, raw: &RawBar) -> Self {
        Self {
            symbol: symbol.to_string(),
            date: raw.date,
            open: raw.open,
            high: raw.high,
            low: raw.low,
            close: raw.close,
            volume: raw.volume.map_or(f64::NAN, |v| v as f64),
        }
    }

    /// Returns true if any OHLCV field is missing (NaN).
    pub fn is_void(&self) -> bool {
        self.open.is_nan()
            || self.high.is_nan()
            || self.low.is_nan()
            || self.close.is_nan()
            || self.volume.is_nan()
    }
}
