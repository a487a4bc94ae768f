//! Object Store Series Adapter
//!
//! Implements `SeriesStorePort` over any `object_store::ObjectStore`. Each
//! symbol is one Parquet object at `{key_prefix}{SYMBOL}.parquet`. Downloads
//! and uploads go through a staging file at `{staging_dir}/{SYMBOL}.parquet`.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use object_store::aws::AmazonS3Builder;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutPayload};

use super::config::{ObjectStoreConfig, StorageBackend};
use super::error::{StorageError, map_codec_error, map_store_error};
use super::parquet_codec::{read_series_file, write_series_file};
use crate::application::ports::{SeriesStoreError, SeriesStorePort};
use crate::domain::candle_history::CandleSeries;
use crate::domain::shared::Symbol;

/// Candle archive backed by an object store.
#[derive(Debug, Clone)]
pub struct ObjectStoreSeriesStore {
    store: Arc<dyn ObjectStore>,
    key_prefix: String,
    staging_dir: PathBuf,
}

impl ObjectStoreSeriesStore {
    /// Wrap an existing object store.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        key_prefix: impl Into<String>,
        staging_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            key_prefix: key_prefix.into(),
            staging_dir: staging_dir.into(),
        }
    }

    /// Build the store described by `config` and prepare its staging directory.
    ///
    /// # Errors
    ///
    /// Returns error if the S3 client cannot be built or the staging
    /// directory cannot be created.
    pub fn from_config(config: &ObjectStoreConfig) -> Result<Self, StorageError> {
        let store: Arc<dyn ObjectStore> = match config.backend {
            StorageBackend::Memory => Arc::new(InMemory::new()),
            StorageBackend::S3 => Arc::new(build_s3(config)?),
        };

        std::fs::create_dir_all(&config.staging_dir).map_err(|source| {
            StorageError::StagingDir {
                path: config.staging_dir.display().to_string(),
                source,
            }
        })?;

        tracing::info!(
            backend = ?config.backend,
            bucket = %config.bucket,
            staging_dir = %config.staging_dir.display(),
            "Series store ready"
        );

        Ok(Self::new(store, &config.key_prefix, &config.staging_dir))
    }

    /// Underlying object store.
    #[must_use]
    pub fn inner(&self) -> Arc<dyn ObjectStore> {
        Arc::clone(&self.store)
    }

    /// Object key for `symbol`.
    #[must_use]
    pub fn object_path(&self, symbol: &Symbol) -> ObjectPath {
        ObjectPath::from(format!("{}{}.parquet", self.key_prefix, symbol))
    }

    /// Local staging path for `symbol`.
    #[must_use]
    pub fn staging_path(&self, symbol: &Symbol) -> PathBuf {
        self.staging_dir.join(format!("{symbol}.parquet"))
    }
}

fn build_s3(config: &ObjectStoreConfig) -> Result<impl ObjectStore, StorageError> {
    let mut builder = AmazonS3Builder::from_env()
        .with_bucket_name(&config.bucket)
        .with_allow_http(config.allow_http);

    if let Some(region) = &config.region {
        builder = builder.with_region(region);
    }
    if let Some(endpoint) = &config.endpoint {
        builder = builder.with_endpoint(endpoint);
    }
    if let Some(key) = &config.access_key_id {
        builder = builder.with_access_key_id(key);
    }
    if let Some(secret) = &config.secret_access_key {
        builder = builder.with_secret_access_key(secret);
    }

    Ok(builder.build()?)
}

#[async_trait]
impl SeriesStorePort for ObjectStoreSeriesStore {
    async fn exists(&self, symbol: &Symbol) -> Result<bool, SeriesStoreError> {
        match self.store.head(&self.object_path(symbol)).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(map_store_error(e, symbol.as_str())),
        }
    }

    async fn load(&self, symbol: &Symbol) -> Result<CandleSeries, SeriesStoreError> {
        let key = self.object_path(symbol);
        let staging = self.staging_path(symbol);
        let staging_display = staging.display().to_string();

        let bytes = self
            .store
            .get(&key)
            .await
            .map_err(|e| map_store_error(e, symbol.as_str()))?
            .bytes()
            .await
            .map_err(|e| map_store_error(e, symbol.as_str()))?;

        tokio::fs::write(&staging, &bytes)
            .await
            .map_err(|e| SeriesStoreError::StagingFile {
                path: staging_display.clone(),
                message: e.to_string(),
            })?;

        let series = read_series_file(&staging).map_err(|e| map_codec_error(e, &staging_display))?;
        tracing::debug!(
            symbol = %symbol,
            key = %key,
            rows = series.len(),
            bytes = bytes.len(),
            "Downloaded series"
        );
        Ok(series)
    }

    async fn save(&self, symbol: &Symbol, series: &CandleSeries) -> Result<(), SeriesStoreError> {
        let key = self.object_path(symbol);
        let staging = self.staging_path(symbol);
        let staging_display = staging.display().to_string();

        write_series_file(&staging, series).map_err(|e| map_codec_error(e, &staging_display))?;

        let bytes = tokio::fs::read(&staging)
            .await
            .map_err(|e| SeriesStoreError::StagingFile {
                path: staging_display,
                message: e.to_string(),
            })?;
        let size = bytes.len();

        self.store
            .put(&key, PutPayload::from(bytes))
            .await
            .map_err(|e| map_store_error(e, symbol.as_str()))?;

        tracing::debug!(symbol = %symbol, key = %key, rows = series.len(), bytes = size, "Uploaded series");
        Ok(())
    }
}
