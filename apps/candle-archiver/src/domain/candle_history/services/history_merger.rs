//! History merger domain service.
//!
//! Combines the archived series with a freshly fetched page:
//!
//! - concatenation order: archived rows first, then fetched rows
//! - rows whose `open_time` was already seen are dropped (first occurrence wins,
//!   so archived values are never overwritten by a re-fetched minute)
//! - no sorting and no value coercion
//!
//! The result is re-indexed positionally (it is just a `Vec`).

use std::collections::HashSet;

use crate::domain::candle_history::aggregate::CandleSeries;
use crate::domain::shared::Timestamp;

/// Result of merging a fetched page into an archived series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// The merged series to persist.
    pub series: CandleSeries,
    /// Rows in the archived series before the merge.
    pub rows_existing: usize,
    /// Rows in the fetched page.
    pub rows_fetched: usize,
    /// Fetched rows that introduced a new open time.
    pub rows_added: usize,
    /// Rows dropped as duplicates (from either input).
    pub duplicates_dropped: usize,
}

/// Stateless merge service.
#[derive(Debug, Default, Clone, Copy)]
pub struct HistoryMerger;

impl HistoryMerger {
    /// Create a new merger.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Merge `fetched` into `existing`.
    #[must_use]
    pub fn merge(&self, existing: CandleSeries, fetched: CandleSeries) -> MergeOutcome {
        let rows_existing = existing.len();
        let rows_fetched = fetched.len();

        let mut seen: HashSet<Timestamp> = HashSet::with_capacity(rows_existing + rows_fetched);
        let mut merged = Vec::with_capacity(rows_existing + rows_fetched);

        for candle in existing.into_candles() {
            if seen.insert(candle.open_time) {
                merged.push(candle);
            }
        }
        let kept_from_existing = merged.len();

        for candle in fetched.into_candles() {
            if seen.insert(candle.open_time) {
                merged.push(candle);
            }
        }

        let rows_added = merged.len() - kept_from_existing;
        let duplicates_dropped = rows_existing + rows_fetched - merged.len();

        MergeOutcome {
            series: CandleSeries::new(merged),
            rows_existing,
            rows_fetched,
            rows_added,
            duplicates_dropped,
        }
    }
}
