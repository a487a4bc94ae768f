//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod refresh_series;
mod run_batch;

pub use refresh_series::RefreshSeriesUseCase;
pub use run_batch::RunBatchUseCase;
