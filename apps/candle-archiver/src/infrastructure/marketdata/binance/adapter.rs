//! Binance Market Data Adapter
//!
//! REST implementation of `MarketDataPort` over the public spot klines endpoint.
//! Unauthenticated; one request per symbol, no retry.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::api_types::{BinanceErrorResponse, KlineRow};
use super::config::{BinanceConfig, KLINE_INTERVAL};
use super::error::BinanceError;
use crate::application::ports::{MarketDataError, MarketDataPort};
use crate::domain::candle_history::{Candle, CandleSeries};
use crate::domain::shared::Symbol;

/// Binance market data adapter.
#[derive(Debug, Clone)]
pub struct BinanceMarketDataAdapter {
    client: Client,
    klines_url: String,
    limit: String,
}

impl BinanceMarketDataAdapter {
    /// Create a new adapter.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: &BinanceConfig) -> Result<Self, BinanceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BinanceError::Http(e.to_string()))?;

        Ok(Self {
            client,
            klines_url: config.klines_url(),
            limit: config.limit.to_string(),
        })
    }

    /// Fetch and decode the raw kline rows for `symbol`.
    async fn get_klines(&self, symbol: &Symbol) -> Result<Vec<KlineRow>, BinanceError> {
        let response = self
            .client
            .get(&self.klines_url)
            .query(&[
                ("symbol", symbol.as_str()),
                ("interval", KLINE_INTERVAL),
                ("limit", self.limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| BinanceError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| BinanceError::Network(e.to_string()))?;

        if status.is_success() {
            return serde_json::from_str(&text).map_err(|e| BinanceError::JsonParse(e.to_string()));
        }

        if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::IM_A_TEAPOT {
            return Err(BinanceError::RateLimited {
                status: status.as_u16(),
            });
        }

        let (code, message) = serde_json::from_str::<BinanceErrorResponse>(&text)
            .map_or_else(|_| (None, text), |body| (Some(body.code), body.msg));

        Err(BinanceError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }
}

#[async_trait]
impl MarketDataPort for BinanceMarketDataAdapter {
    async fn fetch_klines(&self, symbol: &Symbol) -> Result<CandleSeries, MarketDataError> {
        let rows = self.get_klines(symbol).await?;
        tracing::debug!(symbol = %symbol, rows = rows.len(), "Fetched klines");

        let candles = rows
            .into_iter()
            .map(Candle::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CandleSeries::new(candles))
    }
}
