//! Batch metrics for the candle archiver.
//!
//! Recorded through the `metrics` facade. The binary is a one-shot job and
//! installs no exporter, so these are no-ops unless a host process has
//! installed a recorder.
//!
//! # Example
//!
//! ```ignore
//! use candle_archiver::observability::{record_symbol_outcome, register_metrics};
//!
//! register_metrics();
//! record_symbol_outcome("persisted");
//! ```

use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};

/// Symbols processed, labelled by outcome.
pub const SYMBOLS_TOTAL: &str = "candle_archiver_symbols_total";
/// Candles returned by the exchange.
pub const ROWS_FETCHED_TOTAL: &str = "candle_archiver_rows_fetched_total";
/// Candles appended to archived series.
pub const ROWS_ADDED_TOTAL: &str = "candle_archiver_rows_added_total";
/// Wall time of one batch run.
pub const BATCH_DURATION_SECONDS: &str = "candle_archiver_batch_duration_seconds";

/// Register metric descriptions with the installed recorder.
pub fn register_metrics() {
    describe_counter!(SYMBOLS_TOTAL, "Total symbols processed by outcome");
    describe_counter!(ROWS_FETCHED_TOTAL, "Total candles returned by the exchange");
    describe_counter!(ROWS_ADDED_TOTAL, "Total candles appended to archived series");
    describe_histogram!(BATCH_DURATION_SECONDS, "Duration of one batch run");
}

/// Record the final outcome of one symbol.
pub fn record_symbol_outcome(outcome: &'static str) {
    counter!(SYMBOLS_TOTAL, "outcome" => outcome).increment(1);
}

/// Record the row counts of one merge.
pub fn record_rows(fetched: usize, added: usize) {
    counter!(ROWS_FETCHED_TOTAL).increment(fetched as u64);
    counter!(ROWS_ADDED_TOTAL).increment(added as u64);
}

/// Record how long a batch took.
pub fn record_batch_duration(duration: Duration) {
    histogram!(BATCH_DURATION_SECONDS).record(duration.as_secs_f64());
}
