//! Series Store Port (Driven Port)
//!
//! Interface for the durable per-symbol candle archive.

use async_trait::async_trait;

use crate::domain::candle_history::CandleSeries;
use crate::domain::shared::Symbol;

/// Series store error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeriesStoreError {
    /// No archived series for the symbol.
    #[error("No archived series for {symbol}")]
    NotFound {
        /// Symbol that was looked up.
        symbol: String,
    },

    /// Credentials rejected or missing permission on the bucket.
    #[error("Access denied to series store: {message}")]
    AccessDenied {
        /// Error details.
        message: String,
    },

    /// Store unreachable or returned an unexpected error.
    #[error("Series store unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Local staging file could not be written, read, or was missing.
    #[error("Staging file error at {path}: {message}")]
    StagingFile {
        /// Staging path.
        path: String,
        /// Error details.
        message: String,
    },

    /// Archived object is not a readable candle table.
    #[error("Series encoding error: {message}")]
    Codec {
        /// Error details.
        message: String,
    },
}

/// Port for the per-symbol candle archive.
///
/// One object per symbol; a `save` replaces the whole object.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SeriesStorePort: Send + Sync {
    /// Whether an archived series exists for `symbol`.
    async fn exists(&self, symbol: &Symbol) -> Result<bool, SeriesStoreError>;

    /// Load the archived series for `symbol`.
    async fn load(&self, symbol: &Symbol) -> Result<CandleSeries, SeriesStoreError>;

    /// Replace the archived series for `symbol`.
    async fn save(&self, symbol: &Symbol, series: &CandleSeries) -> Result<(), SeriesStoreError>;
}
