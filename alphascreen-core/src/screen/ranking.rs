//! Batch ranking: stable sort by score, sequential ranks, per-signal views.

use super::scoring::{ScoredSnapshot, Signal};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    /// Nothing survived validation, so there is nothing to rank.
    #[error("no scored snapshots to rank")]
    EmptyBatchResult,
}

/// A scored snapshot with its position in the batch (1 = highest score).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow {
    pub rank: usize,
    #[serde(flatten)]
    pub scored: ScoredSnapshot,
}

/// Ranked rows of one screening run, highest score first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ranking {
    rows: Vec<RankedRow>,
}

impl Ranking {
    pub fn rows(&self) -> &[RankedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First `limit` rows carrying `signal`, in rank order.
    pub fn with_signal(&self, signal: Signal, limit: usize) -> Vec<&RankedRow> {
        self.rows
            .iter()
            .filter(|row| row.scored.signal == signal)
            .take(limit)
            .collect()
    }

    pub fn strong_buys(&self, limit: usize) -> Vec<&RankedRow> {
        self.with_signal(Signal::StrongBuy, limit)
    }

    pub fn strong_sells(&self, limit: usize) -> Vec<&RankedRow> {
        self.with_signal(Signal::StrongSell, limit)
    }

    /// Drop the ranks, keeping the ranked order.
    pub fn into_scored(self) -> Vec<ScoredSnapshot> {
        self.rows.into_iter().map(|row| row.scored).collect()
    }
}

/// Orders a batch of scored snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchRanker;

impl BatchRanker {
    pub fn new() -> Self {
        BatchRanker
    }

    /// Rank `scored` by score, descending. Equal scores keep input order.
    pub fn rank(&self, mut scored: Vec<ScoredSnapshot>) -> Result<Ranking, RankError> {
        if scored.is_empty() {
            return Err(RankError::EmptyBatchResult);
        }

        // sort_by is stable
        scored.sort_by(|a, b| b.score.cmp(&a.score));

        let rows = scored
            .into_iter()
            .enumerate()
            .map(|(i, scored)| RankedRow { rank: i + 1, scored })
            .collect();

        Ok(Ranking { rows })
    }
}
