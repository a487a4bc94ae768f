//! Market Data Adapters
//!
//! REST implementations of `MarketDataPort`.

pub mod binance;

pub use binance::{BinanceConfig, BinanceError, BinanceMarketDataAdapter};
