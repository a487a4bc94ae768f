//! Binance adapter configuration.

use std::time::Duration;

/// Public spot REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";

/// Largest page the klines endpoint serves.
pub const MAX_KLINES_LIMIT: u16 = 1000;

/// Candle width requested from the exchange.
pub const KLINE_INTERVAL: &str = "1m";

/// Configuration for the Binance market data adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinanceConfig {
    /// REST base URL, without trailing slash.
    pub base_url: String,
    /// Candles requested per symbol.
    pub limit: u16,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl BinanceConfig {
    /// Create a configuration for `base_url` with default page size and timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            limit: MAX_KLINES_LIMIT,
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the page size.
    #[must_use]
    pub const fn with_limit(mut self, limit: u16) -> Self {
        self.limit = limit;
        self
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full klines endpoint URL.
    #[must_use]
    pub fn klines_url(&self) -> String {
        format!("{}/api/v3/klines", self.base_url)
    }
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
