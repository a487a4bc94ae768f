//! Storage adapter error types.

use thiserror::Error;

use super::parquet_codec::CodecError;
use crate::application::ports::SeriesStoreError;

/// Errors constructing the storage adapter.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Object store client could not be built.
    #[error("Failed to build object store: {0}")]
    Build(#[from] object_store::Error),

    /// Staging directory could not be created.
    #[error("Failed to prepare staging directory '{path}': {source}")]
    StagingDir {
        /// Directory path.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// Map an object store error for `symbol` to the port error.
pub fn map_store_error(err: object_store::Error, symbol: &str) -> SeriesStoreError {
    match err {
        object_store::Error::NotFound { .. } => SeriesStoreError::NotFound {
            symbol: symbol.to_string(),
        },
        e @ (object_store::Error::PermissionDenied { .. }
        | object_store::Error::Unauthenticated { .. }) => SeriesStoreError::AccessDenied {
            message: e.to_string(),
        },
        e => SeriesStoreError::Unavailable {
            message: e.to_string(),
        },
    }
}

/// Map a codec error on the staging file at `path` to the port error.
pub fn map_codec_error(err: CodecError, path: &str) -> SeriesStoreError {
    match err {
        CodecError::Io(e) => SeriesStoreError::StagingFile {
            path: path.to_string(),
            message: e.to_string(),
        },
        e => SeriesStoreError::Codec {
            message: e.to_string(),
        },
    }
}
