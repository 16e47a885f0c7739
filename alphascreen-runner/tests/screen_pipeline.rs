//! Integration tests for the screening pipeline.
//!
//! A scripted provider stands in for the market-data source so each ticker's
//! outcome (scored, rejected, failed fetch) is known in advance.

use std::collections::HashMap;
use std::time::Duration;

use alphascreen_core::data::{
    DataError, DataProvider, DataSource, FetchResult, RawBar, SyntheticProvider,
};
use alphascreen_core::screen::{Rejection, Signal};
use alphascreen_runner::{run_screen_at, ScreenConfig, ScreenError};
use chrono::NaiveDate;

#[derive(Clone)]
enum Script {
    /// Linear series from `start` moving by `step` per bar.
    Linear { start: f64, step: f64, bars: usize },
    Empty,
    NotFound,
}

struct ScriptedProvider {
    scripts: HashMap<&'static str, Script>,
    delays: HashMap<&'static str, Duration>,
}

impl ScriptedProvider {
    fn new(scripts: &[(&'static str, Script)]) -> Self {
        Self {
            scripts: scripts.iter().cloned().collect(),
            delays: HashMap::new(),
        }
    }

    fn with_delay(mut self, symbol: &'static str, delay: Duration) -> Self {
        self.delays.insert(symbol, delay);
        self
    }
}

fn linear_bars(start: f64, step: f64, n: usize) -> Vec<RawBar> {
    let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    (0..n)
        .map(|i| {
            let close = start + step * i as f64;
            let open = close - step;
            RawBar {
                date: base + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 0.5,
                low: open.min(close) - 0.5,
                close,
                volume: Some(10_000),
            }
        })
        .collect()
}

impl DataProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn fetch(&self, symbol: &str, _start: NaiveDate, _end: NaiveDate) -> Result<FetchResult, DataError> {
        if let Some(delay) = self.delays.get(symbol) {
            std::thread::sleep(*delay);
        }
        let bars = match self.scripts.get(symbol) {
            Some(Script::Linear { start, step, bars }) => linear_bars(*start, *step, *bars),
            Some(Script::Empty) => Vec::new(),
            Some(Script::NotFound) | None => {
                return Err(DataError::SymbolNotFound {
                    symbol: symbol.to_string(),
                })
            }
        };
        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars,
            source: DataSource::Synthetic,
        })
    }

    fn is_available(&self) -> bool {
        true
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 28).unwrap()
}

fn tickers(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

const RISE: Script = Script::Linear {
    start: 50.0,
    step: 1.0,
    bars: 120,
};
const FALL: Script = Script::Linear {
    start: 200.0,
    step: -1.0,
    bars: 120,
};

#[test]
fn steady_decline_scores_oversold_conditions() {
    // RSI, ADX, below middle band, stochastic: 0.35 + 0.10 + 0.05 + 0.05
    let provider = ScriptedProvider::new(&[("DOWN", FALL)]);
    let report = run_screen_at(&tickers(&["down"]), &provider, &ScreenConfig::default(), today()).unwrap();

    let row = &report.ranking.rows()[0];
    assert_eq!(row.rank, 1);
    assert_eq!(row.scored.snapshot.ticker, "DOWN");
    assert_eq!(row.scored.snapshot.price, 81.0);
    assert_eq!(row.scored.snapshot.rsi, 0.0);
    assert!(!row.scored.snapshot.ema_cross);
    assert_eq!(row.scored.score.hundredths(), 55);
    assert_eq!(row.scored.signal, Signal::WeakBuy);
}

#[test]
fn steady_rise_scores_trend_conditions() {
    // ADX, OBV, EMA cross: 0.10 * 3
    let provider = ScriptedProvider::new(&[("UP", RISE)]);
    let report = run_screen_at(&tickers(&["UP"]), &provider, &ScreenConfig::default(), today()).unwrap();

    let row = &report.ranking.rows()[0];
    assert!(row.scored.snapshot.ema_cross);
    assert!(row.scored.snapshot.obv > 0.0);
    assert_eq!(row.scored.score.hundredths(), 30);
    assert_eq!(row.scored.signal, Signal::WeakSell);
}

#[test]
fn ties_follow_request_order_not_completion_order() {
    let provider = ScriptedProvider::new(&[("TIE1", RISE), ("DOWN", FALL), ("TIE2", RISE)])
        .with_delay("TIE1", Duration::from_millis(100));
    let report = run_screen_at(
        &tickers(&["TIE1", "DOWN", "TIE2"]),
        &provider,
        &ScreenConfig::default(),
        today(),
    )
    .unwrap();

    let order: Vec<(&str, usize)> = report
        .ranking
        .rows()
        .iter()
        .map(|r| (r.scored.snapshot.ticker.as_str(), r.rank))
        .collect();
    assert_eq!(order, [("DOWN", 1), ("TIE1", 2), ("TIE2", 3)]);
}

#[test]
fn rejections_are_tallied_not_fatal() {
    let provider = ScriptedProvider::new(&[
        ("GOOD", RISE),
        ("EMPTY", Script::Empty),
        ("GONE", Script::NotFound),
        (
            "SHORT",
            Script::Linear {
                start: 50.0,
                step: 0.1,
                bars: 59,
            },
        ),
        (
            "PENNY",
            Script::Linear {
                start: 2.0,
                step: 0.0,
                bars: 120,
            },
        ),
    ]);
    let report = run_screen_at(
        &tickers(&["GOOD", "EMPTY", "GONE", "SHORT", "PENNY"]),
        &provider,
        &ScreenConfig::default(),
        today(),
    )
    .unwrap();

    assert_eq!(report.requested, 5);
    assert_eq!(report.ranking.len(), 1);
    assert_eq!(report.rejected.len(), 4);

    let by_ticker: HashMap<&str, &Rejection> = report
        .rejected
        .iter()
        .map(|r| (r.ticker.as_str(), &r.rejection))
        .collect();
    assert!(matches!(by_ticker["EMPTY"], Rejection::DataUnavailable { .. }));
    assert!(matches!(by_ticker["GONE"], Rejection::DataUnavailable { detail } if detail.contains("GONE")));
    assert!(matches!(
        by_ticker["SHORT"],
        Rejection::InsufficientHistory { valid_bars: 59, required: 60 }
    ));
    assert!(matches!(by_ticker["PENNY"], Rejection::BelowPriceFloor { .. }));

    let counts = report.rejection_counts();
    assert_eq!(counts["data_unavailable"], 2);
    assert_eq!(counts["insufficient_history"], 1);
    assert_eq!(counts["below_price_floor"], 1);
}

#[test]
fn empty_request_differs_from_all_rejected() {
    let provider = ScriptedProvider::new(&[("GONE", Script::NotFound)]);
    let config = ScreenConfig::default();

    let empty = run_screen_at(&[], &provider, &config, today()).unwrap_err();
    assert!(matches!(empty, ScreenError::EmptyRequest));

    let all_rejected = run_screen_at(&tickers(&["GONE", "ALSO_GONE"]), &provider, &config, today()).unwrap_err();
    match all_rejected {
        ScreenError::NoValidData { rejected } => {
            assert_eq!(rejected.len(), 2);
            assert_eq!(rejected[0].ticker, "GONE");
            assert_eq!(rejected[1].ticker, "ALSO_GONE");
        }
        other => panic!("expected NoValidData, got {other:?}"),
    }
}

#[test]
fn price_floor_is_configurable() {
    let provider = ScriptedProvider::new(&[("UP", RISE)]);
    let config = ScreenConfig {
        price_floor: 500.0,
        ..ScreenConfig::default()
    };
    let err = run_screen_at(&tickers(&["UP"]), &provider, &config, today()).unwrap_err();
    assert!(matches!(err, ScreenError::NoValidData { .. }));
}

#[test]
fn invalid_config_is_reported() {
    let provider = ScriptedProvider::new(&[("UP", RISE)]);
    let config = ScreenConfig {
        max_concurrency: 0,
        ..ScreenConfig::default()
    };
    let err = run_screen_at(&tickers(&["UP"]), &provider, &config, today()).unwrap_err();
    assert!(matches!(err, ScreenError::Config(_)));
}

#[test]
fn synthetic_provider_accounts_for_every_ticker() {
    let config = ScreenConfig::default();
    let requested = config.tickers.clone();
    match run_screen_at(&requested, &SyntheticProvider::new(), &config, today()) {
        Ok(report) => {
            assert_eq!(report.ranking.len() + report.rejected.len(), requested.len());
            assert!(report.ranking.strong_buys(config.top_n).len() <= config.top_n);
        }
        Err(ScreenError::NoValidData { rejected }) => assert_eq!(rejected.len(), requested.len()),
        Err(other) => panic!("unexpected error: {other}"),
    }
}

#[test]
fn repeated_tickers_are_screened_once() {
    let provider = ScriptedProvider::new(&[("UP", RISE), ("DOWN", FALL)]);
    let report = run_screen_at(
        &tickers(&["up", "DOWN", " UP", "Up ", "down"]),
        &provider,
        &ScreenConfig::default(),
        today(),
    )
    .unwrap();

    assert_eq!(report.requested, 2);
    let ranked: Vec<(usize, &str)> = report
        .ranking
        .rows()
        .iter()
        .map(|r| (r.rank, r.scored.snapshot.ticker.as_str()))
        .collect();
    assert_eq!(ranked, [(1, "DOWN"), (2, "UP")]);
    assert!(report.rejected.is_empty());
}

#[test]
fn config_ticker_list_is_deduplicated() {
    let config = ScreenConfig::from_toml(r#"tickers = ["AAPL", "aapl", " AAPL"]"#).unwrap();
    match run_screen_at(&config.tickers, &SyntheticProvider::new(), &config, today()) {
        Ok(report) => {
            assert_eq!(report.requested, 1);
            assert_eq!(report.ranking.len() + report.rejected.len(), 1);
            assert_eq!(report.ranking.rows()[0].scored.snapshot.ticker, "AAPL");
        }
        Err(ScreenError::NoValidData { rejected }) => {
            assert_eq!(rejected.len(), 1);
            assert_eq!(rejected[0].ticker, "AAPL");
        }
        Err(other) => panic!("unexpected error: {other}"),
    }
}
