//! Refresh Series Use Case
//!
//! Brings one symbol's archived series up to date: read the archive (or start
//! empty), fetch the latest page, merge, write back.

use std::sync::Arc;

use crate::application::dto::SymbolOutcome;
use crate::application::ports::{MarketDataPort, SeriesStorePort};
use crate::domain::candle_history::{CandleSeries, HistoryMerger};
use crate::domain::shared::Symbol;
use crate::observability;

/// Archived history to merge into, plus whether it had to be abandoned.
struct Base {
    series: CandleSeries,
    history_unavailable: bool,
}

/// Use case for refreshing a single symbol's archive.
pub struct RefreshSeriesUseCase<M, S>
where
    M: MarketDataPort,
    S: SeriesStorePort,
{
    market_data: Arc<M>,
    store: Arc<S>,
    merger: HistoryMerger,
    strict_history: bool,
}

impl<M, S> RefreshSeriesUseCase<M, S>
where
    M: MarketDataPort,
    S: SeriesStorePort,
{
    /// Create a new `RefreshSeriesUseCase`.
    ///
    /// With `strict_history`, a symbol whose archive cannot be checked or read
    /// is skipped instead of being rewritten from a single page.
    pub const fn new(market_data: Arc<M>, store: Arc<S>, strict_history: bool) -> Self {
        Self {
            market_data,
            store,
            merger: HistoryMerger::new(),
            strict_history,
        }
    }

    /// Execute the use case for `symbol`.
    ///
    /// Never fails: every error is logged and reflected in the outcome.
    pub async fn execute(&self, symbol: &Symbol) -> SymbolOutcome {
        let base = match self.load_base(symbol).await {
            Ok(base) => base,
            Err(reason) => return SymbolOutcome::HistoryUnavailable { reason },
        };

        let fetched = match self.market_data.fetch_klines(symbol).await {
            Ok(fetched) => fetched,
            Err(e) => {
                tracing::error!(symbol = %symbol, error = %e, "Failed to fetch candles");
                return SymbolOutcome::FetchFailed {
                    reason: e.to_string(),
                };
            }
        };

        if fetched.is_empty() {
            tracing::info!(symbol = %symbol, "No new candles");
            return SymbolOutcome::NoNewData;
        }

        let outcome = self.merger.merge(base.series, fetched);
        observability::record_rows(outcome.rows_fetched, outcome.rows_added);
        tracing::debug!(
            symbol = %symbol,
            rows_existing = outcome.rows_existing,
            rows_fetched = outcome.rows_fetched,
            rows_added = outcome.rows_added,
            duplicates_dropped = outcome.duplicates_dropped,
            first_open_time = ?outcome.series.first_open_time(),
            last_open_time = ?outcome.series.last_open_time(),
            "Merged candles"
        );

        if let Err(e) = self.store.save(symbol, &outcome.series).await {
            tracing::error!(symbol = %symbol, error = %e, "Failed to persist series");
            return SymbolOutcome::PersistFailed {
                reason: e.to_string(),
            };
        }

        tracing::info!(
            symbol = %symbol,
            rows_total = outcome.series.len(),
            rows_added = outcome.rows_added,
            "Series updated"
        );

        SymbolOutcome::Persisted {
            rows_total: outcome.series.len(),
            rows_added: outcome.rows_added,
            history_unavailable: base.history_unavailable,
        }
    }

    /// Resolve the archived series to merge into.
    ///
    /// `Err` only in strict mode, carrying the reason the symbol is skipped.
    async fn load_base(&self, symbol: &Symbol) -> Result<Base, String> {
        let exists = match self.store.exists(symbol).await {
            Ok(exists) => exists,
            Err(e) if self.strict_history => {
                tracing::error!(symbol = %symbol, error = %e, "Existence check failed, skipping");
                return Err(e.to_string());
            }
            Err(e) => {
                tracing::warn!(symbol = %symbol, error = %e, "Existence check failed, starting empty");
                return Ok(Base {
                    series: CandleSeries::empty(),
                    history_unavailable: true,
                });
            }
        };

        if !exists {
            tracing::info!(symbol = %symbol, "No archived series, starting empty");
            return Ok(Base {
                series: CandleSeries::empty(),
                history_unavailable: false,
            });
        }

        match self.store.load(symbol).await {
            Ok(series) => Ok(Base {
                series,
                history_unavailable: false,
            }),
            Err(e) if self.strict_history => {
                tracing::error!(symbol = %symbol, error = %e, "Archived series unreadable, skipping");
                Err(e.to_string())
            }
            Err(e) => {
                tracing::warn!(symbol = %symbol, error = %e, "Archived series unreadable, starting empty");
                Ok(Base {
                    series: CandleSeries::empty(),
                    history_unavailable: true,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        MarketDataError, MockMarketDataPort, MockSeriesStorePort, SeriesStoreError,
    };
    use crate::domain::candle_history::value_objects::fixtures::candle_at;
    use rust_decimal::Decimal;

    fn series(rows: &[(i64, i64)]) -> CandleSeries {
        rows.iter()
            .map(|&(minute, close)| candle_at(minute, close))
            .collect::<Vec<_>>()
            .into()
    }

    fn fetch_returning(page: CandleSeries) -> MockMarketDataPort {
        let mut market = MockMarketDataPort::new();
        market
            .expect_fetch_klines()
            .times(1)
            .returning(move |_| Ok(page.clone()));
        market
    }

    fn use_case(
        market: MockMarketDataPort,
        store: MockSeriesStorePort,
        strict: bool,
    ) -> RefreshSeriesUseCase<MockMarketDataPort, MockSeriesStorePort> {
        RefreshSeriesUseCase::new(Arc::new(market), Arc::new(store), strict)
    }

    #[tokio::test]
    async fn merges_into_existing_and_saves() {
        let mut store = MockSeriesStorePort::new();
        store.expect_exists().returning(|_| Ok(true));
        store.expect_load().returning(|_| Ok(series(&[(0, 100)])));
        store
            .expect_save()
            .withf(|symbol, saved| {
                let closes: Vec<Decimal> = saved.iter().map(|c| c.close).collect();
                symbol.as_str() == "BTCUSDT"
                    && closes == vec![Decimal::new(100, 0), Decimal::new(102, 0)]
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let market = fetch_returning(series(&[(0, 101), (1, 102)]));

        let outcome = use_case(market, store, false)
            .execute(&Symbol::new("BTCUSDT"))
            .await;

        assert_eq!(
            outcome,
            SymbolOutcome::Persisted {
                rows_total: 2,
                rows_added: 1,
                history_unavailable: false,
            }
        );
    }

    #[tokio::test]
    async fn missing_archive_starts_empty_without_load() {
        let mut store = MockSeriesStorePort::new();
        store.expect_exists().returning(|_| Ok(false));
        store.expect_load().never();
        store.expect_save().times(1).returning(|_, _| Ok(()));

        let market = fetch_returning(series(&[(0, 1), (1, 2), (2, 3)]));

        let outcome = use_case(market, store, false)
            .execute(&Symbol::new("ETHUSDT"))
            .await;

        assert_eq!(
            outcome,
            SymbolOutcome::Persisted {
                rows_total: 3,
                rows_added: 3,
                history_unavailable: false,
            }
        );
    }

    #[tokio::test]
    async fn exists_error_starts_empty_and_flags_it() {
        let mut store = MockSeriesStorePort::new();
        store.expect_exists().returning(|_| {
            Err(SeriesStoreError::Unavailable {
                message: "timeout".to_string(),
            })
        });
        store.expect_load().never();
        store.expect_save().times(1).returning(|_, _| Ok(()));

        let market = fetch_returning(series(&[(0, 1)]));

        let outcome = use_case(market, store, false)
            .execute(&Symbol::new("SOLUSDT"))
            .await;

        assert_eq!(
            outcome,
            SymbolOutcome::Persisted {
                rows_total: 1,
                rows_added: 1,
                history_unavailable: true,
            }
        );
    }

    #[tokio::test]
    async fn strict_history_skips_when_existence_check_fails() {
        let mut store = MockSeriesStorePort::new();
        store.expect_exists().returning(|_| {
            Err(SeriesStoreError::AccessDenied {
                message: "403".to_string(),
            })
        });
        store.expect_load().never();
        store.expect_save().never();

        let mut market = MockMarketDataPort::new();
        market.expect_fetch_klines().never();

        let outcome = use_case(market, store, true)
            .execute(&Symbol::new("SOLUSDT"))
            .await;

        match outcome {
            SymbolOutcome::HistoryUnavailable { reason } => assert!(reason.contains("403")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreadable_archive_falls_back_to_empty_and_flags_it() {
        let mut store = MockSeriesStorePort::new();
        store.expect_exists().returning(|_| Ok(true));
        store.expect_load().returning(|_| {
            Err(SeriesStoreError::AccessDenied {
                message: "403".to_string(),
            })
        });
        store.expect_save().times(1).returning(|_, _| Ok(()));

        let market = fetch_returning(series(&[(0, 1), (1, 2)]));

        let outcome = use_case(market, store, false)
            .execute(&Symbol::new("ADAUSDT"))
            .await;

        assert_eq!(
            outcome,
            SymbolOutcome::Persisted {
                rows_total: 2,
                rows_added: 2,
                history_unavailable: true,
            }
        );
    }

    #[tokio::test]
    async fn strict_history_skips_unreadable_archive() {
        let mut store = MockSeriesStorePort::new();
        store.expect_exists().returning(|_| Ok(true));
        store.expect_load().returning(|_| {
            Err(SeriesStoreError::Codec {
                message: "bad magic".to_string(),
            })
        });
        store.expect_save().never();

        let mut market = MockMarketDataPort::new();
        market.expect_fetch_klines().never();

        let outcome = use_case(market, store, true)
            .execute(&Symbol::new("ADAUSDT"))
            .await;

        assert!(matches!(outcome, SymbolOutcome::HistoryUnavailable { .. }));
    }

    #[tokio::test]
    async fn fetch_failure_persists_nothing() {
        let mut store = MockSeriesStorePort::new();
        store.expect_exists().returning(|_| Ok(true));
        store.expect_load().returning(|_| Ok(series(&[(0, 1)])));
        store.expect_save().never();

        let mut market = MockMarketDataPort::new();
        market.expect_fetch_klines().returning(|_| {
            Err(MarketDataError::ApiError {
                status: 500,
                message: "internal".to_string(),
            })
        });

        let outcome = use_case(market, store, false)
            .execute(&Symbol::new("BNBUSDT"))
            .await;

        assert!(matches!(outcome, SymbolOutcome::FetchFailed { .. }));
    }

    #[tokio::test]
    async fn empty_fetch_persists_nothing() {
        let mut store = MockSeriesStorePort::new();
        store.expect_exists().returning(|_| Ok(false));
        store.expect_save().never();

        let market = fetch_returning(CandleSeries::empty());

        let outcome = use_case(market, store, false)
            .execute(&Symbol::new("XRPUSDT"))
            .await;

        assert_eq!(outcome, SymbolOutcome::NoNewData);
    }

    #[tokio::test]
    async fn save_failure_is_reported() {
        let mut store = MockSeriesStorePort::new();
        store.expect_exists().returning(|_| Ok(false));
        store.expect_save().returning(|_, _| {
            Err(SeriesStoreError::StagingFile {
                path: "/tmp/X.parquet".to_string(),
                message: "not found".to_string(),
            })
        });

        let market = fetch_returning(series(&[(0, 1)]));

        let outcome = use_case(market, store, false)
            .execute(&Symbol::new("DOTUSDT"))
            .await;

        match outcome {
            SymbolOutcome::PersistFailed { reason } => assert!(reason.contains("/tmp/X.parquet")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
