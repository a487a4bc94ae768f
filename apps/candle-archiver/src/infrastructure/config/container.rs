//! Dependency Injection Container
//!
//! Manages creation and wiring of all application components.

use std::sync::Arc;

use crate::application::ports::{MarketDataPort, SeriesStorePort};
use crate::application::use_cases::{RefreshSeriesUseCase, RunBatchUseCase};
use crate::domain::shared::Symbol;

/// Dependency injection container.
///
/// Holds the wired ports and hands out use cases built on them.
pub struct Container<M, S>
where
    M: MarketDataPort + 'static,
    S: SeriesStorePort + 'static,
{
    // Ports
    market_data: Arc<M>,
    store: Arc<S>,

    // Settings
    roster: Vec<Symbol>,
    strict_history: bool,
}

impl<M, S> Container<M, S>
where
    M: MarketDataPort + 'static,
    S: SeriesStorePort + 'static,
{
    /// Create a new container with all dependencies.
    pub const fn new(
        market_data: Arc<M>,
        store: Arc<S>,
        roster: Vec<Symbol>,
        strict_history: bool,
    ) -> Self {
        Self {
            market_data,
            store,
            roster,
            strict_history,
        }
    }

    /// Symbols processed by each batch.
    pub fn roster(&self) -> &[Symbol] {
        &self.roster
    }

    /// Create a `RefreshSeriesUseCase`.
    pub fn refresh_series_use_case(&self) -> RefreshSeriesUseCase<M, S> {
        RefreshSeriesUseCase::new(
            Arc::clone(&self.market_data),
            Arc::clone(&self.store),
            self.strict_history,
        )
    }

    /// Create a `RunBatchUseCase` over the configured roster.
    pub fn run_batch_use_case(&self) -> RunBatchUseCase<M, S> {
        RunBatchUseCase::new(self.refresh_series_use_case(), self.roster.clone())
    }
}
