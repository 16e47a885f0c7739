//! On-Balance Volume (OBV).
//!
//! Running sum of signed volume: a close below the previous close subtracts
//! the bar's volume, any other bar adds it. The first bar has no previous
//! close and counts as an addition, as does an unchanged close.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone, Default)]
pub struct Obv;

impl Obv {
    pub fn new() -> Self {
        Self
    }
}

impl Indicator for Obv {
    fn name(&self) -> &str {
        "obv"
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let mut result = Vec::with_capacity(bars.len());
        let mut total = 0.0;
        let mut prev_close: Option<f64> = None;

        for bar in bars {
            match prev_close {
                Some(prev) if bar.close < prev => total -= bar.volume,
                _ => total += bar.volume,
            }
            prev_close = Some(bar.close);
            result.push(total);
        }

        result
    }
}
