//! Standard technical indicators and the capability trait the screen reads them through.
//!
//! Every indicator is a pure function of a bar series and yields a series of
//! the same length, with `f64::NAN` during warm-up. The screen only ever asks
//! for the latest value, through [`IndicatorSource`].

pub mod adx;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod obv;
pub mod rsi;
pub mod source;
pub mod stochastic;
pub mod wilder;

pub use adx::Adx;
pub use bollinger::BollingerMiddle;
pub use ema::Ema;
pub use macd::MacdDiff;
pub use obv::Obv;
pub use rsi::Rsi;
pub use source::{IndicatorSource, IndicatorSpec, StandardIndicators};
pub use stochastic::Stochastic;

use crate::domain::Bar;

/// A single-series technical indicator.
///
/// `compute` returns a `Vec<f64>` of the same length as `bars`; the first
/// `lookback()` values are `f64::NAN`. No value at bar t may depend on bars
/// after t.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g. "rsi_14", "macd_diff_12_26_9").
    fn name(&self) -> &str;

    /// Number of leading bars that produce no value.
    fn lookback(&self) -> usize;

    fn compute(&self, bars: &[Bar]) -> Vec<f64>;

    /// Last value of the computed series, `None` if it is missing or non-finite.
    fn latest(&self, bars: &[Bar]) -> Option<f64> {
        self.compute(bars)
            .last()
            .copied()
            .filter(|v| v.is_finite())
    }
}

/// Close prices of a bar slice.
pub(crate) fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Create bars from close prices for testing.
///
/// open = prev close (or close for the first bar), high = max(open, close) + 1,
/// low = min(open, close) - 1, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                symbol: "TEST".to_string(),
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Create bars from explicit (open, high, low, close) tuples, volume 1000.
#[cfg(test)]
pub fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| Bar {
            symbol: "TEST".to_string(),
            date: base_date + chrono::Duration::days(i as i64),
            open,
            high,
            low,
            close,
            volume: 1000.0,
        })
        .collect()
}

#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
