//! Deterministic synthetic data provider for offline screening.
//!
//! Produces a seeded random walk per symbol (seed = BLAKE3 of the symbol),
//! weekdays only. The same symbol and date range always yield the same bars,
//! so offline screens are reproducible. Results are clearly fake and the
//! fetch result is tagged `DataSource::Synthetic`.

use super::provider::{DataError, DataProvider, DataSource, FetchResult, RawBar};
use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Synthetic bar generator behind the `DataProvider` trait.
#[derive(Debug, Clone, Default)]
pub struct SyntheticProvider {
    start_price: Option<f64>,
}

impl SyntheticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the first bar's open for every symbol. Without this, the start
    /// price is drawn from the symbol's seed in the range [1, 400).
    pub fn with_start_price(start_price: f64) -> Self {
        Self {
            start_price: Some(start_price),
        }
    }

    fn generate(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Vec<RawBar> {
        let seed: [u8; 32] = *blake3::hash(symbol.as_bytes()).as_bytes();
        let mut rng = StdRng::from_seed(seed);

        let mut price = self
            .start_price
            .unwrap_or_else(|| rng.gen_range(1.0..400.0));
        let drift: f64 = rng.gen_range(-0.004..0.004);

        let mut bars = Vec::new();
        let mut current = start;

        while current <= end {
            if matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
                current += chrono::Duration::days(1);
                continue;
            }

            let daily_return: f64 = drift + rng.gen_range(-0.03..0.03);
            let open = price;
            let close = price * (1.0 + daily_return);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
            let volume = rng.gen_range(500_000..5_000_000u64);

            bars.push(RawBar {
                date: current,
                open,
                high,
                low,
                close,
                volume: Some(volume),
            });

            price = close;
            current += chrono::Duration::days(1);
        }

        bars
    }
}

impl DataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars: self.generate(symbol, start, end),
            source: DataSource::Synthetic,
        })
    }

    fn is_available(&self) -> bool {
        true
    }
}
