//! Bollinger middle band: SMA(close, period).
//!
//! The screen only needs the distance of the close from the middle band, so
//! the outer bands are not computed. Lookback: period - 1.

use super::{closes, Indicator};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct BollingerMiddle {
    period: usize,
    name: String,
}

impl BollingerMiddle {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        Self {
            period,
            name: format!("bollinger_middle_{period}"),
        }
    }
}

impl Indicator for BollingerMiddle {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        rolling_mean(&closes(bars), self.period)
    }
}

/// Rolling mean over a trailing window. Windows holding a NaN yield NaN.
pub fn rolling_mean(values: &[f64], period: usize) -> Vec<f64> {
    let mut result = vec![f64::NAN; values.len()];
    if period == 0 {
        return result;
    }
    for (i, window) in values.windows(period).enumerate() {
        if window.iter().all(|v| !v.is_nan()) {
            result[i + period - 1] = window.iter().sum::<f64>() / period as f64;
        }
    }
    result
}
