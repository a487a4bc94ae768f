//! Candle value object (one kline row).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::Timestamp;

/// One one-minute price/volume observation for a symbol.
///
/// Field order follows the exchange kline row. Decimal fields keep the
/// scale the exchange reported (e.g. `"42000.01000000"` stays 8dp).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    /// Interval open time; unique key within a series.
    pub open_time: Timestamp,
    /// Open price.
    pub open: Decimal,
    /// High price.
    pub high: Decimal,
    /// Low price.
    pub low: Decimal,
    /// Close price.
    pub close: Decimal,
    /// Base asset volume.
    pub volume: Decimal,
    /// Interval close time.
    pub close_time: Timestamp,
    /// Quote asset volume.
    pub quote_asset_volume: Decimal,
    /// Number of trades in the interval.
    pub number_of_trades: u64,
    /// Taker buy base asset volume.
    pub taker_buy_base_asset_volume: Decimal,
    /// Taker buy quote asset volume.
    pub taker_buy_quote_asset_volume: Decimal,
    /// Reserved exchange field, stored as received.
    pub ignore: String,
}
