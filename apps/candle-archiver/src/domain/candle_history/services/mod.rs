//! Candle History Domain Services

mod history_merger;

pub use history_merger::{HistoryMerger, MergeOutcome};
