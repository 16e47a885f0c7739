//! Capability interface: "latest value of indicator X over window W for series S".
//!
//! The snapshot builder depends only on [`IndicatorSource`], never on how a
//! particular indicator is computed.

use super::{Adx, BollingerMiddle, Ema, Indicator, MacdDiff, Obv, Rsi, Stochastic};
use crate::domain::Bar;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An indicator together with its window parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndicatorSpec {
    Rsi { period: usize },
    Stochastic { period: usize },
    MacdDiff { fast: usize, slow: usize, signal: usize },
    BollingerMiddle { period: usize },
    Obv,
    Adx { period: usize },
    Ema { period: usize },
}

impl IndicatorSpec {
    /// Check the window parameters describe a buildable indicator.
    pub fn validate(&self) -> Result<(), String> {
        match *self {
            IndicatorSpec::Rsi { period }
            | IndicatorSpec::Stochastic { period }
            | IndicatorSpec::BollingerMiddle { period }
            | IndicatorSpec::Adx { period }
            | IndicatorSpec::Ema { period } => {
                if period == 0 {
                    return Err(format!("{self}: period must be >= 1"));
                }
            }
            IndicatorSpec::MacdDiff { fast, slow, signal } => {
                if fast == 0 || signal == 0 {
                    return Err(format!("{self}: periods must be >= 1"));
                }
                if fast >= slow {
                    return Err(format!("{self}: fast period must be shorter than slow"));
                }
            }
            IndicatorSpec::Obv => {}
        }
        Ok(())
    }

    /// Build the standard implementation for this spec.
    ///
    /// Panics if [`IndicatorSpec::validate`] fails.
    pub fn indicator(&self) -> Box<dyn Indicator> {
        match *self {
            IndicatorSpec::Rsi { period } => Box::new(Rsi::new(period)),
            IndicatorSpec::Stochastic { period } => Box::new(Stochastic::new(period)),
            IndicatorSpec::MacdDiff { fast, slow, signal } => {
                Box::new(MacdDiff::new(fast, slow, signal))
            }
            IndicatorSpec::BollingerMiddle { period } => Box::new(BollingerMiddle::new(period)),
            IndicatorSpec::Obv => Box::new(Obv::new()),
            IndicatorSpec::Adx { period } => Box::new(Adx::new(period)),
            IndicatorSpec::Ema { period } => Box::new(Ema::new(period)),
        }
    }
}

impl fmt::Display for IndicatorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorSpec::Rsi { period } => write!(f, "rsi_{period}"),
            IndicatorSpec::Stochastic { period } => write!(f, "stoch_k_{period}"),
            IndicatorSpec::MacdDiff { fast, slow, signal } => {
                write!(f, "macd_diff_{fast}_{slow}_{signal}")
            }
            IndicatorSpec::BollingerMiddle { period } => write!(f, "bollinger_middle_{period}"),
            IndicatorSpec::Obv => write!(f, "obv"),
            IndicatorSpec::Adx { period } => write!(f, "adx_{period}"),
            IndicatorSpec::Ema { period } => write!(f, "ema_{period}"),
        }
    }
}

/// Source of the latest indicator value for a bar series.
///
/// Returns `None` when the series is too short for the window or the value
/// is otherwise unavailable.
pub trait IndicatorSource: Send + Sync {
    fn latest(&self, spec: &IndicatorSpec, bars: &[Bar]) -> Option<f64>;
}

/// The indicator implementations shipped in this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardIndicators;

impl IndicatorSource for StandardIndicators {
    fn latest(&self, spec: &IndicatorSpec, bars: &[Bar]) -> Option<f64> {
        if let Err(reason) = spec.validate() {
            tracing::debug!(%spec, %reason, "indicator spec cannot be built");
            return None;
        }
        let indicator = spec.indicator();
        if bars.len() <= indicator.lookback() {
            return None;
        }
        indicator.latest(bars)
    }
}
