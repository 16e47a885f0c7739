//! Stochastic oscillator %K.
//!
//! %K = 100 * (close - lowest_low) / (highest_high - lowest_low) over the
//! trailing `period` bars. A window with no range reads 50.
//! Lookback: period - 1.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Stochastic {
    period: usize,
    name: String,
}

impl Stochastic {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "Stochastic period must be >= 1");
        Self {
            period,
            name: format!("stoch_k_{period}"),
        }
    }
}

impl Indicator for Stochastic {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let mut result = vec![f64::NAN; bars.len()];

        for (i, window) in bars.windows(self.period).enumerate() {
            let highest = window.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
            let lowest = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
            let close = window[window.len() - 1].close;
            if window.iter().any(|b| b.high.is_nan() || b.low.is_nan()) || close.is_nan() {
                continue;
            }

            let range = highest - lowest;
            result[i + self.period - 1] = if range.abs() < f64::EPSILON {
                50.0
            } else {
                100.0 * (close - lowest) / range
            };
        }

        result
    }
}
