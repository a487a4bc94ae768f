//! Symbol roster configuration.

use serde::{Deserialize, Serialize};

use crate::domain::shared::Symbol;

/// Pairs archived when no roster is configured, in processing order.
pub const DEFAULT_SYMBOLS: [&str; 30] = [
    "SOLUSDT",
    "ETHUSDT",
    "BNBUSDT",
    "AXSUSDT",
    "ADAUSDT",
    "BTCUSDT",
    "AVAXUSDT",
    "LINKUSDT",
    "NEARUSDT",
    "RENDERUSDT",
    "POLUSDT",
    "AAVEUSDT",
    "ICPUSDT",
    "THETAUSDT",
    "DOTUSDT",
    "ALPACAUSDT",
    "SHIBUSDT",
    "XRPUSDT",
    "CHZUSDT",
    "FILUSDT",
    "ALGOUSDT",
    "ONEUSDT",
    "EGLDUSDT",
    "MANAUSDT",
    "VETUSDT",
    "AXLUSDT",
    "VTHOUSDT",
    "AIUSDT",
    "HOTUSDT",
    "ILVUSDT",
];

/// Symbols processed by each run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Spot pairs, processed in this order.
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            symbols: default_symbols(),
        }
    }
}

impl RosterConfig {
    /// Normalized roster.
    #[must_use]
    pub fn to_symbols(&self) -> Vec<Symbol> {
        self.symbols.iter().map(Symbol::new).collect()
    }
}

fn default_symbols() -> Vec<String> {
    DEFAULT_SYMBOLS.iter().map(ToString::to_string).collect()
}
