//! Observability module for metrics.
//!
//! Log output is configured in [`crate::telemetry`].

mod metrics;

pub use metrics::{
    BATCH_DURATION_SECONDS, ROWS_ADDED_TOTAL, ROWS_FETCHED_TOTAL, SYMBOLS_TOTAL,
    record_batch_duration, record_rows, record_symbol_outcome, register_metrics,
};
