//! Candle series aggregate.

use std::collections::HashSet;

use crate::domain::candle_history::value_objects::Candle;
use crate::domain::shared::{DomainError, Timestamp};

/// The ordered history of candles for one symbol.
///
/// Rows are held in insertion order with plain positional indices. After a
/// merge, `open_time` is unique; a series read back from storage is not
/// re-checked, see [`CandleSeries::ensure_unique_open_times`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Create a series from rows in the given order.
    #[must_use]
    pub const fn new(candles: Vec<Candle>) -> Self {
        Self { candles }
    }

    /// Create an empty series.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            candles: Vec::new(),
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Whether the series has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Rows in positional order.
    #[must_use]
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Iterate rows in positional order.
    pub fn iter(&self) -> std::slice::Iter<'_, Candle> {
        self.candles.iter()
    }

    /// Consume the series and return its rows.
    #[must_use]
    pub fn into_candles(self) -> Vec<Candle> {
        self.candles
    }

    /// Open time of the first row.
    #[must_use]
    pub fn first_open_time(&self) -> Option<Timestamp> {
        self.candles.first().map(|c| c.open_time)
    }

    /// Open time of the last row.
    #[must_use]
    pub fn last_open_time(&self) -> Option<Timestamp> {
        self.candles.last().map(|c| c.open_time)
    }

    /// Check the series key invariant.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` naming the first repeated open time.
    pub fn ensure_unique_open_times(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::with_capacity(self.candles.len());
        for candle in &self.candles {
            if !seen.insert(candle.open_time) {
                return Err(DomainError::InvariantViolation {
                    aggregate: "CandleSeries".to_string(),
                    invariant: "open_time is unique".to_string(),
                    state: format!("duplicate at {}", candle.open_time),
                });
            }
        }
        Ok(())
    }
}

impl From<Vec<Candle>> for CandleSeries {
    fn from(candles: Vec<Candle>) -> Self {
        Self::new(candles)
    }
}

impl<'a> IntoIterator for &'a CandleSeries {
    type Item = &'a Candle;
    type IntoIter = std::slice::Iter<'a, Candle>;

    fn into_iter(self) -> Self::IntoIter {
        self.candles.iter()
    }
}
