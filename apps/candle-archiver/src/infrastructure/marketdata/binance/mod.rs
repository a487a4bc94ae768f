//! Binance Spot Adapter
//!
//! Implements `MarketDataPort` against the public klines endpoint.
//!
//! # Modules
//!
//! - `adapter`: `BinanceMarketDataAdapter`
//! - `api_types`: wire row and error body
//! - `config`: base URL, page size, timeout
//! - `error`: `BinanceError` and its mapping to `MarketDataError`

mod adapter;
mod api_types;
mod config;
mod error;

pub use adapter::BinanceMarketDataAdapter;
pub use api_types::{BinanceErrorResponse, KlineRow};
pub use config::{BinanceConfig, DEFAULT_BASE_URL, KLINE_INTERVAL, MAX_KLINES_LIMIT};
pub use error::BinanceError;
