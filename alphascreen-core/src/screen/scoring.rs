//! Scoring engine: snapshot in, composite score and signal out.
//!
//! The score is the sum of the weights of the conditions that hold. Weights
//! and scores are kept as integer hundredths so that sums are exact and the
//! signal thresholds compare without floating-point drift.

use super::snapshot::IndicatorSnapshot;
use serde::{Serialize, Serializer};
use std::fmt;

/// Composite score in hundredths, 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Score(u32);

impl Score {
    pub const ZERO: Score = Score(0);
    pub const MAX: Score = Score(100);

    pub fn from_hundredths(hundredths: u32) -> Self {
        Score(hundredths)
    }

    pub fn hundredths(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{}.{:02}", self.0 / 100, self.0 % 100))
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

/// Discrete trading signal derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Signal {
    #[serde(rename = "Strong buy")]
    StrongBuy,
    #[serde(rename = "Weak buy")]
    WeakBuy,
    #[serde(rename = "Neutral")]
    Neutral,
    #[serde(rename = "Weak sell")]
    WeakSell,
    #[serde(rename = "Strong sell")]
    StrongSell,
}

impl Signal {
    pub const ALL: [Signal; 5] = [
        Signal::StrongBuy,
        Signal::WeakBuy,
        Signal::Neutral,
        Signal::WeakSell,
        Signal::StrongSell,
    ];

    /// Step function over closed-open score bands, highest band first.
    pub fn from_score(score: Score) -> Self {
        match score.hundredths() {
            75..=u32::MAX => Signal::StrongBuy,
            55..=74 => Signal::WeakBuy,
            40..=54 => Signal::Neutral,
            15..=39 => Signal::WeakSell,
            _ => Signal::StrongSell,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Signal::StrongBuy => "Strong buy",
            Signal::WeakBuy => "Weak buy",
            Signal::Neutral => "Neutral",
            Signal::WeakSell => "Weak sell",
            Signal::StrongSell => "Strong sell",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// One weighted boolean condition of the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    RsiOversold,
    MacdBullish,
    StrongTrend,
    Accumulation,
    EmaBullishCross,
    BelowMiddleBand,
    StochasticOversold,
}

impl Condition {
    pub const ALL: [Condition; 7] = [
        Condition::RsiOversold,
        Condition::MacdBullish,
        Condition::StrongTrend,
        Condition::Accumulation,
        Condition::EmaBullishCross,
        Condition::BelowMiddleBand,
        Condition::StochasticOversold,
    ];

    /// Weight in hundredths. The seven weights sum to 100.
    pub fn weight(self) -> u32 {
        match self {
            Condition::RsiOversold => 35,
            Condition::MacdBullish => 25,
            Condition::StrongTrend => 10,
            Condition::Accumulation => 10,
            Condition::EmaBullishCross => 10,
            Condition::BelowMiddleBand => 5,
            Condition::StochasticOversold => 5,
        }
    }

    /// Strict comparison against the rounded snapshot value.
    pub fn holds(self, snap: &IndicatorSnapshot) -> bool {
        match self {
            Condition::RsiOversold => snap.rsi < 30.0,
            Condition::MacdBullish => snap.macd_diff > 0.0,
            Condition::StrongTrend => snap.adx > 25.0,
            Condition::Accumulation => snap.obv > 0.0,
            Condition::EmaBullishCross => snap.ema_cross,
            Condition::BelowMiddleBand => snap.bollinger_distance < 0.0,
            Condition::StochasticOversold => snap.stochastic < 20.0,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Condition::RsiOversold => "RSI < 30",
            Condition::MacdBullish => "MACD diff > 0",
            Condition::StrongTrend => "ADX > 25",
            Condition::Accumulation => "OBV > 0",
            Condition::EmaBullishCross => "EMA20 > EMA50",
            Condition::BelowMiddleBand => "close below Bollinger middle",
            Condition::StochasticOversold => "Stochastic < 20",
        }
    }
}

/// A snapshot with its score, signal and the conditions that fired.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSnapshot {
    #[serde(flatten)]
    pub snapshot: IndicatorSnapshot,
    pub score: Score,
    pub signal: Signal,
    pub triggered: Vec<Condition>,
}

/// Stateless scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        ScoringEngine
    }

    /// Conditions that hold for `snap`, in weight-table order.
    pub fn triggered(&self, snap: &IndicatorSnapshot) -> Vec<Condition> {
        Condition::ALL
            .into_iter()
            .filter(|c| c.holds(snap))
            .collect()
    }

    pub fn score(&self, snap: &IndicatorSnapshot) -> (Score, Signal) {
        let hundredths = Condition::ALL
            .into_iter()
            .filter(|c| c.holds(snap))
            .map(Condition::weight)
            .sum();
        let score = Score::from_hundredths(hundredths);
        (score, Signal::from_score(score))
    }

    /// Score `snap` and attach the result to it.
    pub fn evaluate(&self, snap: IndicatorSnapshot) -> ScoredSnapshot {
        let (score, signal) = self.score(&snap);
        let triggered = self.triggered(&snap);
        ScoredSnapshot {
            snapshot: snap,
            score,
            signal,
            triggered,
        }
    }
}
