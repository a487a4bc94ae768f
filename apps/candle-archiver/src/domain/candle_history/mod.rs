//! Candle History Bounded Context
//!
//! Per-symbol minute candle history: the `Candle` row, the `CandleSeries`
//! aggregate keyed by open time, and the `HistoryMerger` service that folds a
//! freshly fetched page into the archived series.

pub mod aggregate;
pub mod services;
pub mod value_objects;

pub use aggregate::CandleSeries;
pub use services::{HistoryMerger, MergeOutcome};
pub use value_objects::Candle;
