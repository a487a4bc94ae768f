//! Run Batch Use Case
//!
//! Walks the roster in order, refreshing each symbol. One symbol's failure
//! never stops the next.

use std::time::Instant;

use crate::application::dto::BatchReportDto;
use crate::application::ports::{MarketDataPort, SeriesStorePort};
use crate::application::use_cases::RefreshSeriesUseCase;
use crate::domain::shared::Symbol;
use crate::observability;

/// Use case for one scheduled run over the whole roster.
pub struct RunBatchUseCase<M, S>
where
    M: MarketDataPort,
    S: SeriesStorePort,
{
    refresh: RefreshSeriesUseCase<M, S>,
    roster: Vec<Symbol>,
}

impl<M, S> RunBatchUseCase<M, S>
where
    M: MarketDataPort,
    S: SeriesStorePort,
{
    /// Create a new `RunBatchUseCase`.
    pub const fn new(refresh: RefreshSeriesUseCase<M, S>, roster: Vec<Symbol>) -> Self {
        Self { refresh, roster }
    }

    /// Execute the use case.
    pub async fn execute(&self) -> BatchReportDto {
        let started = Instant::now();
        let mut report = BatchReportDto::default();

        tracing::info!(symbols = self.roster.len(), "Starting candle update");

        for symbol in &self.roster {
            let outcome = self.refresh.execute(symbol).await;
            observability::record_symbol_outcome(outcome.label());
            report.push(symbol.as_str(), outcome);
        }

        let elapsed = started.elapsed();
        observability::record_batch_duration(elapsed);

        tracing::info!(
            persisted = report.persisted(),
            unchanged = report.unchanged(),
            failed = report.failed(),
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            "Candle update finished"
        );

        report
    }
}
