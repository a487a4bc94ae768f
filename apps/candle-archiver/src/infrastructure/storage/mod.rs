//! Series Storage Adapters
//!
//! `SeriesStorePort` over `object_store` (S3 or in-memory), with series
//! encoded as Parquet.

mod config;
mod error;
mod object_store_adapter;
pub mod parquet_codec;

pub use config::{DEFAULT_BUCKET, ObjectStoreConfig, StorageBackend};
pub use error::StorageError;
pub use object_store_adapter::ObjectStoreSeriesStore;
pub use parquet_codec::CodecError;
