//! Binance-specific error types.

use thiserror::Error;

use crate::application::ports::MarketDataError;

/// Errors from the Binance adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BinanceError {
    /// HTTP client could not be built.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Request did not complete.
    #[error("Network error: {0}")]
    Network(String),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Exchange error code, when the body carried one.
        code: Option<i64>,
        /// Error message from the API.
        message: String,
    },

    /// Request weight exceeded (429) or IP banned (418).
    #[error("Rate limited (status {status})")]
    RateLimited {
        /// HTTP status code.
        status: u16,
    },

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// A kline row carried an out-of-range timestamp.
    #[error("Invalid kline row: {0}")]
    InvalidRow(String),
}

impl From<BinanceError> for MarketDataError {
    fn from(err: BinanceError) -> Self {
        match err {
            BinanceError::Http(message) | BinanceError::Network(message) => {
                Self::ConnectionError { message }
            }
            BinanceError::Api {
                status, message, ..
            } => Self::ApiError { status, message },
            BinanceError::RateLimited { .. } => Self::RateLimited,
            BinanceError::JsonParse(message) | BinanceError::InvalidRow(message) => {
                Self::InvalidPayload { message }
            }
        }
    }
}
