//! Indicator-to-score aggregation: snapshot builder, scoring engine, batch ranker.
//!
//! Pipeline per run: `SnapshotBuilder::build` for each ticker, then
//! `ScoringEngine::evaluate` on accepted snapshots, then one
//! `BatchRanker::rank` over the accepted set. Nothing here blocks or logs.

pub mod ranking;
pub mod scoring;
pub mod snapshot;

pub use ranking::{BatchRanker, RankError, RankedRow, Ranking};
pub use scoring::{Condition, Score, ScoredSnapshot, ScoringEngine, Signal};
pub use snapshot::{
    round_to, IndicatorSnapshot, IndicatorWindows, Rejection, ScreenParams, SnapshotBuilder,
};
