//! Batch screening: fetch, build, score and rank a list of tickers.
//!
//! Tickers are processed on a private Rayon pool sized by
//! `max_concurrency`, which also bounds concurrent requests to the data
//! provider. Results are collected in request order, so score ties resolve by
//! the order tickers were given, never by which fetch finished first.

use crate::config::{ConfigError, ScreenConfig};
use alphascreen_core::data::DataProvider;
use alphascreen_core::domain::Bar;
use alphascreen_core::screen::{
    BatchRanker, RankError, Ranking, Rejection, ScoredSnapshot, ScoringEngine, SnapshotBuilder,
};
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// A ticker excluded from a run, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedTicker {
    pub ticker: String,
    #[serde(flatten)]
    pub rejection: Rejection,
}

#[derive(Debug, Error)]
pub enum ScreenError {
    /// The request named no tickers at all.
    #[error("no tickers requested")]
    EmptyRequest,

    /// Tickers were requested but none passed validation.
    #[error("no valid data: all {} requested tickers were rejected", .rejected.len())]
    NoValidData { rejected: Vec<RejectedTicker> },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Outcome of a screening run with at least one ranked ticker.
#[derive(Debug, Clone)]
pub struct ScreenReport {
    pub requested: usize,
    pub ranking: Ranking,
    pub rejected: Vec<RejectedTicker>,
    pub top_n: usize,
}

impl ScreenReport {
    /// Rejection count per category.
    pub fn rejection_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for r in &self.rejected {
            *counts.entry(r.rejection.kind()).or_insert(0) += 1;
        }
        counts
    }
}

/// Parse a comma-separated ticker list.
///
/// Entries are trimmed and upper-cased; blanks are dropped and repeats keep
/// only their first occurrence.
pub fn parse_tickers(input: &str) -> Vec<String> {
    let mut tickers: Vec<String> = Vec::new();
    for ticker in input.split(',').map(|t| t.trim().to_uppercase()) {
        if !ticker.is_empty() && !tickers.contains(&ticker) {
            tickers.push(ticker);
        }
    }
    tickers
}

/// Trim and upper-case each ticker, keeping only the first occurrence of each
/// symbol. Blank entries are kept so they are reported as invalid.
fn normalize_tickers(tickers: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut normalized = Vec::with_capacity(tickers.len());
    for raw in tickers {
        let ticker = raw.trim().to_uppercase();
        if ticker.is_empty() || seen.insert(ticker.clone()) {
            normalized.push(ticker);
        } else {
            tracing::debug!(ticker = %ticker, "dropping duplicate ticker");
        }
    }
    normalized
}

/// Screen `tickers` with history ending today (UTC).
pub fn run_screen(
    tickers: &[String],
    provider: &dyn DataProvider,
    config: &ScreenConfig,
) -> Result<ScreenReport, ScreenError> {
    run_screen_at(tickers, provider, config, chrono::Utc::now().date_naive())
}

/// Screen `tickers` with history ending at `today`.
///
/// Repeated tickers (compared after trimming and upper-casing) are screened
/// once, at the position of their first occurrence.
pub fn run_screen_at(
    tickers: &[String],
    provider: &dyn DataProvider,
    config: &ScreenConfig,
    today: NaiveDate,
) -> Result<ScreenReport, ScreenError> {
    if tickers.is_empty() {
        return Err(ScreenError::EmptyRequest);
    }
    config.validate()?;

    let tickers = normalize_tickers(tickers);

    let (start, end) = config.date_range(today);
    let builder = SnapshotBuilder::new(config.params());
    let engine = ScoringEngine::new();

    tracing::info!(
        tickers = tickers.len(),
        provider = provider.name(),
        %start,
        %end,
        "screening batch"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.max_concurrency)
        .build()?;

    let outcomes: Vec<Result<ScoredSnapshot, RejectedTicker>> = pool.install(|| {
        tickers
            .par_iter()
            .map(|ticker| {
                screen_one(ticker, provider, &builder, start, end)
                    .map(|snapshot| engine.evaluate(snapshot))
                    .map_err(|rejection| RejectedTicker {
                        ticker: ticker.clone(),
                        rejection,
                    })
            })
            .collect()
    });

    let mut scored = Vec::new();
    let mut rejected = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(s) => {
                tracing::debug!(
                    ticker = %s.snapshot.ticker,
                    score = %s.score,
                    signal = %s.signal,
                    "ticker scored"
                );
                scored.push(s);
            }
            Err(r) => {
                tracing::warn!(ticker = %r.ticker, reason = %r.rejection, "ticker rejected");
                rejected.push(r);
            }
        }
    }

    let ranking = match BatchRanker::new().rank(scored) {
        Ok(ranking) => ranking,
        Err(RankError::EmptyBatchResult) => return Err(ScreenError::NoValidData { rejected }),
    };

    tracing::info!(
        ranked = ranking.len(),
        rejected = rejected.len(),
        "screen complete"
    );

    Ok(ScreenReport {
        requested: tickers.len(),
        ranking,
        rejected,
        top_n: config.top_n,
    })
}

fn screen_one(
    ticker: &str,
    provider: &dyn DataProvider,
    builder: &SnapshotBuilder,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<alphascreen_core::IndicatorSnapshot, Rejection> {
    let symbol = ticker.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(Rejection::InvalidTicker);
    }

    let fetched = provider
        .fetch(&symbol, start, end)
        .map_err(|e| Rejection::DataUnavailable {
            detail: e.to_string(),
        })?;

    let bars: Vec<Bar> = fetched
        .bars
        .iter()
        .map(|raw| Bar::from_raw(&symbol, raw))
        .collect();

    builder.build(&symbol, &bars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_uppercases_and_drops_blanks() {
        assert_eq!(parse_tickers("aapl, msft,,"), ["AAPL", "MSFT"]);
    }

    #[test]
    fn parse_keeps_first_occurrence() {
        assert_eq!(parse_tickers("nvda, AAPL ,Nvda, aapl"), ["NVDA", "AAPL"]);
    }

    #[test]
    fn parse_empty() {
        assert!(parse_tickers("").is_empty());
        assert!(parse_tickers(" , ,").is_empty());
    }

    #[test]
    fn normalize_keeps_first_occurrence_and_blanks() {
        let raw: Vec<String> = ["AAPL", "aapl", " msft", "", " AAPL ", "  "]
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(normalize_tickers(&raw), ["AAPL", "MSFT", "", ""]);
    }

    #[test]
    fn rejection_counts_group_by_kind() {
        let rejected = vec![
            RejectedTicker {
                ticker: "A".into(),
                rejection: Rejection::InvalidTicker,
            },
            RejectedTicker {
                ticker: "B".into(),
                rejection: Rejection::BelowPriceFloor {
                    price: 1.0,
                    floor: 3.0,
                },
            },
            RejectedTicker {
                ticker: "C".into(),
                rejection: Rejection::BelowPriceFloor {
                    price: 2.0,
                    floor: 3.0,
                },
            },
        ];
        let scored = ScoringEngine::new().evaluate(alphascreen_core::IndicatorSnapshot {
            ticker: "OK".into(),
            price: 10.0,
            rsi: 50.0,
            stochastic: 50.0,
            macd_diff: 0.0,
            bollinger_distance: 0.0,
            obv: 0.0,
            adx: 0.0,
            ema_cross: false,
        });
        let report = ScreenReport {
            requested: 4,
            ranking: BatchRanker::new().rank(vec![scored]).unwrap(),
            rejected,
            top_n: 10,
        };
        let counts = report.rejection_counts();
        assert_eq!(counts["below_price_floor"], 2);
        assert_eq!(counts["invalid_ticker"], 1);
    }
}
