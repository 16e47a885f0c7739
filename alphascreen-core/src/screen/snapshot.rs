//! Snapshot builder: bar series in, fixed-shape indicator record (or rejection) out.
//!
//! Filters run in a fixed order: void bars are dropped, then the remaining
//! count is checked against `min_bars`, then the latest close against the
//! price floor. Each filter looks only at its own input, so a ticker with too
//! little history is rejected whatever its price and vice versa.

use crate::domain::Bar;
use crate::indicators::{IndicatorSource, IndicatorSpec, StandardIndicators};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a ticker was excluded from a screening run.
///
/// Rejections are per-ticker outcomes, never batch failures.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    #[error("ticker is empty")]
    InvalidTicker,

    #[error("no price data: {detail}")]
    DataUnavailable { detail: String },

    #[error("insufficient history: {valid_bars} valid bars, need {required}")]
    InsufficientHistory { valid_bars: usize, required: usize },

    #[error("latest close {price:.2} is below the {floor:.2} price floor")]
    BelowPriceFloor { price: f64, floor: f64 },

    #[error("indicator {indicator} has no value at the latest bar")]
    IndicatorUnavailable { indicator: String },
}

impl Rejection {
    /// Short category label used in rejection tallies.
    pub fn kind(&self) -> &'static str {
        match self {
            Rejection::InvalidTicker => "invalid_ticker",
            Rejection::DataUnavailable { .. } => "data_unavailable",
            Rejection::InsufficientHistory { .. } => "insufficient_history",
            Rejection::BelowPriceFloor { .. } => "below_price_floor",
            Rejection::IndicatorUnavailable { .. } => "indicator_unavailable",
        }
    }
}

/// Window sizes of the indicators read into a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorWindows {
    pub rsi: usize,
    pub stochastic: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger: usize,
    pub adx: usize,
    pub ema_fast: usize,
    pub ema_slow: usize,
}

impl Default for IndicatorWindows {
    fn default() -> Self {
        Self {
            rsi: 14,
            stochastic: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger: 20,
            adx: 14,
            ema_fast: 20,
            ema_slow: 50,
        }
    }
}

impl IndicatorWindows {
    pub fn rsi_spec(&self) -> IndicatorSpec {
        IndicatorSpec::Rsi { period: self.rsi }
    }

    pub fn stochastic_spec(&self) -> IndicatorSpec {
        IndicatorSpec::Stochastic {
            period: self.stochastic,
        }
    }

    pub fn macd_spec(&self) -> IndicatorSpec {
        IndicatorSpec::MacdDiff {
            fast: self.macd_fast,
            slow: self.macd_slow,
            signal: self.macd_signal,
        }
    }

    pub fn bollinger_spec(&self) -> IndicatorSpec {
        IndicatorSpec::BollingerMiddle {
            period: self.bollinger,
        }
    }

    pub fn adx_spec(&self) -> IndicatorSpec {
        IndicatorSpec::Adx { period: self.adx }
    }

    pub fn ema_fast_spec(&self) -> IndicatorSpec {
        IndicatorSpec::Ema {
            period: self.ema_fast,
        }
    }

    pub fn ema_slow_spec(&self) -> IndicatorSpec {
        IndicatorSpec::Ema {
            period: self.ema_slow,
        }
    }

    /// Check the windows describe indicators that can be built.
    pub fn validate(&self) -> Result<(), String> {
        let named = [
            ("rsi", self.rsi),
            ("stochastic", self.stochastic),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("bollinger", self.bollinger),
            ("adx", self.adx),
            ("ema_fast", self.ema_fast),
            ("ema_slow", self.ema_slow),
        ];
        if let Some((name, _)) = named.iter().find(|(_, w)| *w == 0) {
            return Err(format!("indicator window '{name}' must be >= 1"));
        }
        if self.macd_fast >= self.macd_slow {
            return Err("macd_fast must be shorter than macd_slow".into());
        }
        Ok(())
    }
}

/// Data-sufficiency and price-floor thresholds plus indicator windows.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenParams {
    pub min_bars: usize,
    pub price_floor: f64,
    pub windows: IndicatorWindows,
}

impl Default for ScreenParams {
    fn default() -> Self {
        Self {
            min_bars: 60,
            price_floor: 3.0,
            windows: IndicatorWindows::default(),
        }
    }
}

/// Latest indicator readings for one ticker, rounded for scoring and display.
///
/// Built once by [`SnapshotBuilder::build`]; score and signal are attached
/// alongside it, never written into it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub ticker: String,
    pub price: f64,
    pub rsi: f64,
    pub stochastic: f64,
    pub macd_diff: f64,
    pub bollinger_distance: f64,
    pub obv: f64,
    pub adx: f64,
    pub ema_cross: bool,
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Builds [`IndicatorSnapshot`]s from bar series through an [`IndicatorSource`].
#[derive(Debug, Clone)]
pub struct SnapshotBuilder<S = StandardIndicators> {
    params: ScreenParams,
    source: S,
}

impl SnapshotBuilder<StandardIndicators> {
    pub fn new(params: ScreenParams) -> Self {
        Self::with_source(params, StandardIndicators)
    }
}

impl<S: IndicatorSource> SnapshotBuilder<S> {
    pub fn with_source(params: ScreenParams, source: S) -> Self {
        Self { params, source }
    }

    pub fn params(&self) -> &ScreenParams {
        &self.params
    }

    /// Build a snapshot for `ticker`, or say why it was rejected.
    pub fn build(&self, ticker: &str, bars: &[Bar]) -> Result<IndicatorSnapshot, Rejection> {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(Rejection::InvalidTicker);
        }
        if bars.is_empty() {
            return Err(Rejection::DataUnavailable {
                detail: "empty price series".into(),
            });
        }

        let valid: Vec<Bar> = bars.iter().filter(|b| !b.is_void()).cloned().collect();
        let insufficient = Rejection::InsufficientHistory {
            valid_bars: valid.len(),
            required: self.params.min_bars,
        };
        if valid.len() < self.params.min_bars {
            return Err(insufficient);
        }
        let close = match valid.last() {
            Some(bar) => bar.close,
            None => return Err(insufficient),
        };
        if close < self.params.price_floor {
            return Err(Rejection::BelowPriceFloor {
                price: close,
                floor: self.params.price_floor,
            });
        }

        let w = &self.params.windows;
        let rsi = self.read(&w.rsi_spec(), &valid)?;
        let stochastic = self.read(&w.stochastic_spec(), &valid)?;
        let macd_diff = self.read(&w.macd_spec(), &valid)?;
        let middle = self.read(&w.bollinger_spec(), &valid)?;
        let obv = self.read(&IndicatorSpec::Obv, &valid)?;
        let adx = self.read(&w.adx_spec(), &valid)?;
        let ema_fast = self.read(&w.ema_fast_spec(), &valid)?;
        let ema_slow = self.read(&w.ema_slow_spec(), &valid)?;

        Ok(IndicatorSnapshot {
            ticker,
            price: round_to(close, 2),
            rsi: round_to(rsi, 2),
            stochastic: round_to(stochastic, 2),
            macd_diff: round_to(macd_diff, 3),
            bollinger_distance: round_to(close - middle, 2),
            obv: round_to(obv, 2),
            adx: round_to(adx, 2),
            ema_cross: ema_fast > ema_slow,
        })
    }

    fn read(&self, spec: &IndicatorSpec, bars: &[Bar]) -> Result<f64, Rejection> {
        self.source
            .latest(spec, bars)
            .filter(|v| v.is_finite())
            .ok_or_else(|| Rejection::IndicatorUnavailable {
                indicator: spec.to_string(),
            })
    }
}
