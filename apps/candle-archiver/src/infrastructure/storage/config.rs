//! Object store adapter configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default archive bucket.
pub const DEFAULT_BUCKET: &str = "projetcryptoalex";

/// Which object store backs the archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Amazon S3 or an S3-compatible endpoint.
    #[default]
    S3,
    /// Process-local store; contents are lost on exit.
    Memory,
}

/// Configuration for [`super::ObjectStoreSeriesStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectStoreConfig {
    /// Backend kind.
    pub backend: StorageBackend,
    /// Bucket name (S3 only).
    pub bucket: String,
    /// Region; falls back to `AWS_REGION` / `AWS_DEFAULT_REGION`.
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible stores.
    pub endpoint: Option<String>,
    /// Access key; falls back to `AWS_ACCESS_KEY_ID`.
    pub access_key_id: Option<String>,
    /// Secret key; falls back to `AWS_SECRET_ACCESS_KEY`.
    pub secret_access_key: Option<String>,
    /// Permit plain-HTTP endpoints.
    pub allow_http: bool,
    /// Prefix prepended to every object key.
    pub key_prefix: String,
    /// Directory for per-symbol staging files.
    pub staging_dir: PathBuf,
}

impl ObjectStoreConfig {
    /// S3 configuration for `bucket` with credentials from the environment.
    #[must_use]
    pub fn s3(bucket: impl Into<String>) -> Self {
        Self {
            backend: StorageBackend::S3,
            bucket: bucket.into(),
            region: None,
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            allow_http: false,
            key_prefix: String::new(),
            staging_dir: std::env::temp_dir(),
        }
    }

    /// In-memory configuration.
    #[must_use]
    pub fn memory() -> Self {
        Self {
            backend: StorageBackend::Memory,
            ..Self::s3(DEFAULT_BUCKET)
        }
    }

    /// Set the staging directory.
    #[must_use]
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = dir.into();
        self
    }
}

impl Default for ObjectStoreConfig {
    fn default() -> Self {
        Self::s3(DEFAULT_BUCKET)
    }
}
