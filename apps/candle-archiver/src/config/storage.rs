//! Archive storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::infrastructure::storage::{DEFAULT_BUCKET, ObjectStoreConfig, StorageBackend};

/// Where the per-symbol series objects live.
///
/// Unset (or empty) credentials and region fall back to the standard `AWS_*`
/// environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// `s3` or `memory`.
    #[serde(default)]
    pub backend: StorageBackend,
    /// Bucket name.
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Bucket region.
    #[serde(default)]
    pub region: Option<String>,
    /// Custom S3-compatible endpoint.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Access key id.
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// Secret access key.
    #[serde(default)]
    pub secret_access_key: Option<String>,
    /// Prefix prepended to `{SYMBOL}.parquet`.
    #[serde(default)]
    pub key_prefix: String,
    /// Staging directory; defaults to the system temp dir.
    #[serde(default)]
    pub staging_dir: Option<PathBuf>,
    /// Permit plain-HTTP endpoints (local S3 emulators).
    #[serde(default)]
    pub allow_http: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            bucket: default_bucket(),
            region: None,
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            key_prefix: String::new(),
            staging_dir: None,
            allow_http: false,
        }
    }
}

impl StorageConfig {
    /// Adapter configuration.
    #[must_use]
    pub fn to_store_config(&self) -> ObjectStoreConfig {
        ObjectStoreConfig {
            backend: self.backend,
            bucket: self.bucket.clone(),
            region: non_empty(self.region.as_ref()),
            endpoint: non_empty(self.endpoint.as_ref()),
            access_key_id: non_empty(self.access_key_id.as_ref()),
            secret_access_key: non_empty(self.secret_access_key.as_ref()),
            allow_http: self.allow_http,
            key_prefix: self.key_prefix.clone(),
            staging_dir: self
                .staging_dir
                .clone()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(std::env::temp_dir),
        }
    }
}

fn default_bucket() -> String {
    DEFAULT_BUCKET.to_string()
}

/// Interpolating an unset variable yields `""`; treat that as absent.
fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}
