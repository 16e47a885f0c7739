//! MACD histogram ("MACD diff").
//!
//! MACD line = EMA(fast) - EMA(slow); signal = EMA(signal) of the MACD line;
//! diff = MACD line - signal. Lookback: slow + signal - 2.

use super::ema::ema_of_series;
use super::{closes, Indicator};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct MacdDiff {
    fast: usize,
    slow: usize,
    signal: usize,
    name: String,
}

impl MacdDiff {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast >= 1 && signal >= 1, "MACD periods must be >= 1");
        assert!(fast < slow, "MACD fast period must be shorter than slow period");
        Self {
            fast,
            slow,
            signal,
            name: format!("macd_diff_{fast}_{slow}_{signal}"),
        }
    }
}

impl Indicator for MacdDiff {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.slow + self.signal - 2
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes = closes(bars);
        let fast = ema_of_series(&closes, self.fast);
        let slow = ema_of_series(&closes, self.slow);

        let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = ema_of_series(&line, self.signal);

        line.iter().zip(&signal).map(|(l, s)| l - s).collect()
    }
}
