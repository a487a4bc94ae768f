//! Candle History Aggregates

mod series;

pub use series::CandleSeries;
