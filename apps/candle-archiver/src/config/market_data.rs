//! Market data configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::infrastructure::marketdata::binance::{BinanceConfig, DEFAULT_BASE_URL, MAX_KLINES_LIMIT};

/// Exchange REST settings. The candle interval is fixed at one minute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketDataConfig {
    /// REST base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Candles requested per symbol (1..=1000).
    #[serde(default = "default_limit")]
    pub limit: u16,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            limit: default_limit(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl MarketDataConfig {
    /// Adapter configuration.
    #[must_use]
    pub fn to_binance_config(&self) -> BinanceConfig {
        BinanceConfig::new(self.base_url.as_str())
            .with_limit(self.limit)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_limit() -> u16 {
    MAX_KLINES_LIMIT
}

const fn default_timeout_secs() -> u64 {
    30
}
