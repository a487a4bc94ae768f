//! Market Data Port (Driven Port)
//!
//! Interface for fetching recent minute candles from the exchange.
//! This is a secondary/outbound port used by application use cases.

use async_trait::async_trait;

use crate::domain::candle_history::CandleSeries;
use crate::domain::shared::Symbol;

/// Market data error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarketDataError {
    /// Transport-level failure (DNS, connect, timeout, TLS).
    #[error("Market data connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// Exchange answered with a non-success status.
    #[error("Market data API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// Exchange rejected the request for request-weight reasons.
    #[error("Rate limited by market data provider")]
    RateLimited,

    /// Response body could not be decoded into candles.
    #[error("Invalid market data payload: {message}")]
    InvalidPayload {
        /// Decode failure details.
        message: String,
    },
}

/// Port for fetching minute candles from the exchange.
///
/// Implementations return the most recent page of closed-or-open one-minute
/// candles for the symbol, in the order the exchange reports them. An empty
/// series is a valid answer (unknown-but-accepted symbol, quiet market).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Fetch the most recent page of one-minute candles for `symbol`.
    async fn fetch_klines(&self, symbol: &Symbol) -> Result<CandleSeries, MarketDataError>;
}
