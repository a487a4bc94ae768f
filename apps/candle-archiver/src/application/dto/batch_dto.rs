//! Batch DTOs

use serde::{Deserialize, Serialize};

/// Body of the success response.
pub const SUCCESS_BODY: &str = "Tâche exécutée avec succès";

/// Result of refreshing one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SymbolOutcome {
    /// Merged series written back to the store.
    Persisted {
        /// Rows in the stored series.
        rows_total: usize,
        /// New rows appended by this run.
        rows_added: usize,
        /// The archived series could not be checked or read, so the base was empty.
        history_unavailable: bool,
    },
    /// Exchange returned no candles; nothing written.
    NoNewData,
    /// Exchange request failed; nothing written.
    FetchFailed {
        /// Failure details.
        reason: String,
    },
    /// Archived series could not be checked or read, and strict history is on.
    HistoryUnavailable {
        /// Failure details.
        reason: String,
    },
    /// Upload of the merged series failed.
    PersistFailed {
        /// Failure details.
        reason: String,
    },
}

impl SymbolOutcome {
    /// Stable label used for metrics and log fields.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Persisted { .. } => "persisted",
            Self::NoNewData => "no_new_data",
            Self::FetchFailed { .. } => "fetch_failed",
            Self::HistoryUnavailable { .. } => "history_unavailable",
            Self::PersistFailed { .. } => "persist_failed",
        }
    }

    /// Whether the symbol ended in an error state.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::FetchFailed { .. } | Self::HistoryUnavailable { .. } | Self::PersistFailed { .. }
        )
    }
}

/// Outcome for one roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolReportDto {
    /// Symbol (e.g., "BTCUSDT").
    pub symbol: String,
    /// What happened.
    #[serde(flatten)]
    pub outcome: SymbolOutcome,
}

/// Report for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReportDto {
    /// Per-symbol outcomes in roster order.
    pub symbols: Vec<SymbolReportDto>,
}

impl BatchReportDto {
    /// Record the outcome for a symbol.
    pub fn push(&mut self, symbol: impl Into<String>, outcome: SymbolOutcome) {
        self.symbols.push(SymbolReportDto {
            symbol: symbol.into(),
            outcome,
        });
    }

    /// Number of symbols whose series was written.
    #[must_use]
    pub fn persisted(&self) -> usize {
        self.count(|o| matches!(o, SymbolOutcome::Persisted { .. }))
    }

    /// Number of symbols that ended in an error state.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(SymbolOutcome::is_failure)
    }

    /// Number of symbols with no new candles.
    #[must_use]
    pub fn unchanged(&self) -> usize {
        self.count(|o| matches!(o, SymbolOutcome::NoNewData))
    }

    /// Outcome recorded for `symbol`, if any.
    #[must_use]
    pub fn outcome_for(&self, symbol: &str) -> Option<&SymbolOutcome> {
        self.symbols
            .iter()
            .find(|r| r.symbol == symbol)
            .map(|r| &r.outcome)
    }

    fn count(&self, pred: impl Fn(&SymbolOutcome) -> bool) -> usize {
        self.symbols.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// Structured response written by the binary on completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResponseDto {
    /// Always 200 once the batch has run.
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// Fixed success message.
    pub body: String,
}

impl InvocationResponseDto {
    /// The success response. Per-symbol failures do not change it.
    #[must_use]
    pub fn success() -> Self {
        Self {
            status_code: 200,
            body: SUCCESS_BODY.to_string(),
        }
    }
}
