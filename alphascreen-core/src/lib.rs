//! AlphaScreen Core: bars, market-data providers, indicators, and the
//! screening engine.
//!
//! - Domain bar type
//! - Data providers (Yahoo Finance, synthetic) behind the `DataProvider` trait
//! - Standard indicators behind the `IndicatorSource` capability trait
//! - Snapshot builder, scoring engine, and batch ranker

pub mod data;
pub mod domain;
pub mod indicators;
pub mod screen;

pub use domain::Bar;
pub use screen::{
    BatchRanker, IndicatorSnapshot, RankError, RankedRow, Ranking, Rejection, Score,
    ScoredSnapshot, ScoringEngine, ScreenParams, Signal, SnapshotBuilder,
};
