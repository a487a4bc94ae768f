//! Binance REST response types.
//!
//! These types map directly to the `/api/v3/klines` wire format.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::error::BinanceError;
use crate::domain::candle_history::Candle;
use crate::domain::shared::Timestamp;

/// One kline row: a 12-element JSON array.
///
/// `[open_time, open, high, low, close, volume, close_time, quote_volume,
/// trades, taker_buy_base, taker_buy_quote, ignore]`, decimals as strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KlineRow(
    /// Open time, epoch milliseconds.
    pub i64,
    /// Open price.
    #[serde(with = "rust_decimal::serde::str")]
    pub Decimal,
    /// High price.
    #[serde(with = "rust_decimal::serde::str")]
    pub Decimal,
    /// Low price.
    #[serde(with = "rust_decimal::serde::str")]
    pub Decimal,
    /// Close price.
    #[serde(with = "rust_decimal::serde::str")]
    pub Decimal,
    /// Base asset volume.
    #[serde(with = "rust_decimal::serde::str")]
    pub Decimal,
    /// Close time, epoch milliseconds.
    pub i64,
    /// Quote asset volume.
    #[serde(with = "rust_decimal::serde::str")]
    pub Decimal,
    /// Number of trades.
    pub u64,
    /// Taker buy base asset volume.
    #[serde(with = "rust_decimal::serde::str")]
    pub Decimal,
    /// Taker buy quote asset volume.
    #[serde(with = "rust_decimal::serde::str")]
    pub Decimal,
    /// Unused field.
    pub String,
);

impl TryFrom<KlineRow> for Candle {
    type Error = BinanceError;

    fn try_from(row: KlineRow) -> Result<Self, Self::Error> {
        let open_time = Timestamp::from_unix_millis(row.0)
            .ok_or_else(|| BinanceError::InvalidRow(format!("open time {} out of range", row.0)))?;
        let close_time = Timestamp::from_unix_millis(row.6)
            .ok_or_else(|| BinanceError::InvalidRow(format!("close time {} out of range", row.6)))?;

        Ok(Self {
            open_time,
            open: row.1,
            high: row.2,
            low: row.3,
            close: row.4,
            volume: row.5,
            close_time,
            quote_asset_volume: row.7,
            number_of_trades: row.8,
            taker_buy_base_asset_volume: row.9,
            taker_buy_quote_asset_volume: row.10,
            ignore: row.11,
        })
    }
}

/// Error body returned with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct BinanceErrorResponse {
    /// Exchange error code (e.g. -1121 for an invalid symbol).
    pub code: i64,
    /// Error message.
    pub msg: String,
}
