// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Candle Archiver - Rust Core Library
//!
//! One-shot batch job that keeps a per-symbol archive of one-minute candles.
//! Each run fetches the latest page of klines for every pair in the roster,
//! merges it into the archived series (deduplicated by open time, archived
//! rows win), and writes the series back to object storage as Parquet.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic
//!   - `candle_history`: `Candle`, `CandleSeries`, `HistoryMerger`
//!   - `shared`: `Symbol`, `Timestamp`, `DomainError`
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: `MarketDataPort`, `SeriesStorePort`
//!   - `use_cases`: `RefreshSeries`, `RunBatch`
//!   - `dto`: per-symbol outcomes, batch report, invocation response
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `marketdata`: Binance klines adapter
//!   - `storage`: `object_store` archive (S3 / in-memory) with Parquet codec
//!   - `config`: Dependency injection container
//!
//! Failures are per symbol: they are logged, recorded in the report, and
//! never stop the batch.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// YAML configuration with environment interpolation.
pub mod config;

/// Batch metrics.
pub mod observability;

/// Tracing subscriber setup.
pub mod telemetry;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::candle_history::{Candle, CandleSeries, HistoryMerger, MergeOutcome};
pub use domain::shared::{DomainError, Symbol, Timestamp};

// Application re-exports
pub use application::dto::{BatchReportDto, InvocationResponseDto, SymbolOutcome};
pub use application::ports::{
    MarketDataError, MarketDataPort, SeriesStoreError, SeriesStorePort,
};
pub use application::use_cases::{RefreshSeriesUseCase, RunBatchUseCase};

// Infrastructure re-exports
pub use infrastructure::config::Container;
pub use infrastructure::marketdata::{BinanceConfig, BinanceError, BinanceMarketDataAdapter};
pub use infrastructure::storage::{ObjectStoreConfig, ObjectStoreSeriesStore, StorageError};
