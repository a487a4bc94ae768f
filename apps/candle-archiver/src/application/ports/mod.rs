//! Application Ports (Driven)
//!
//! Ports define interfaces for interacting with external systems.
//! - **Driven Ports** (Secondary/Outbound): How our application uses external systems

mod market_data_port;
mod series_store_port;

pub use market_data_port::{MarketDataError, MarketDataPort};
pub use series_store_port::{SeriesStoreError, SeriesStorePort};

#[cfg(test)]
pub use market_data_port::MockMarketDataPort;
#[cfg(test)]
pub use series_store_port::MockSeriesStorePort;
