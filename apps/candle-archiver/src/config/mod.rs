//! Configuration module for the candle archiver.
//!
//! Provides configuration loading, validation, and environment variable
//! interpolation for the batch job.
//!
//! # Usage
//!
//! ```rust,ignore
//! use candle_archiver::config::load_config;
//!
//! // Load from default path (config.yaml); a missing file yields defaults
//! let config = load_config(None)?;
//!
//! println!("bucket: {}", config.storage.bucket);
//! ```

mod batch;
mod market_data;
mod observability;
mod roster;
mod storage;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use batch::BatchConfig;
pub use market_data::MarketDataConfig;
pub use observability::{LOG_FORMATS, LoggingConfig, ObservabilityConfig};
pub use roster::{DEFAULT_SYMBOLS, RosterConfig};
pub use storage::StorageConfig;

use crate::infrastructure::marketdata::binance::MAX_KLINES_LIMIT;
use crate::infrastructure::storage::StorageBackend;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "CANDLE_ARCHIVER_CONFIG";

/// Config file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Exchange settings.
    #[serde(default)]
    pub market_data: MarketDataConfig,
    /// Archive storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Symbols to archive.
    #[serde(default)]
    pub roster: RosterConfig,
    /// Batch behaviour.
    #[serde(default)]
    pub batch: BatchConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Path of the config file: `$CANDLE_ARCHIVER_CONFIG` or `config.yaml`.
#[must_use]
pub fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV)
        .ok()
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

/// Load configuration from a YAML file with environment variable interpolation.
///
/// A missing file yields the built-in defaults.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let config = Config::default();
            validate_config(&config)?;
            return Ok(config);
        }
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_string(),
                source: e,
            });
        }
    };

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = if interpolated.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml_bw::from_str(&interpolated)?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map(|m| m.as_str());
        match cap.get(1).map(|m| std::env::var(m.as_str())) {
            Some(Ok(v)) if !v.is_empty() => v,
            _ => default_value.map_or_else(String::new, str::to_string),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let limit = config.market_data.limit;
    if limit == 0 || limit > MAX_KLINES_LIMIT {
        return Err(ConfigError::ValidationError(format!(
            "market_data.limit must be between 1 and {MAX_KLINES_LIMIT}, got {limit}"
        )));
    }

    if config.market_data.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "market_data.timeout_secs must be positive".to_string(),
        ));
    }

    if config.market_data.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "market_data.base_url must not be empty".to_string(),
        ));
    }

    if config.storage.backend == StorageBackend::S3 && config.storage.bucket.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "storage.bucket must not be empty for the s3 backend".to_string(),
        ));
    }

    let symbols = config.roster.to_symbols();
    if symbols.is_empty() {
        return Err(ConfigError::ValidationError(
            "roster.symbols must not be empty".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for symbol in &symbols {
        symbol
            .validate()
            .map_err(|e| ConfigError::ValidationError(format!("roster.symbols: {e}")))?;
        if !seen.insert(symbol.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "roster.symbols contains duplicate symbol {symbol}"
            )));
        }
    }

    let format = config.observability.logging.format.to_ascii_lowercase();
    if !LOG_FORMATS.contains(&format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {LOG_FORMATS:?}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.market_data.base_url, "https://api.binance.com");
        assert_eq!(config.market_data.limit, 1000);
        assert_eq!(config.storage.backend, StorageBackend::S3);
        assert_eq!(config.storage.bucket, "projetcryptoalex");
        assert_eq!(config.storage.key_prefix, "");
        assert_eq!(config.roster.symbols.len(), 30);
        assert_eq!(config.roster.symbols[0], "SOLUSDT");
        assert_eq!(config.roster.symbols[29], "ILVUSDT");
        assert!(!config.batch.strict_history);
        assert_eq!(config.observability.logging.format, "json");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = load_config_from_string("").unwrap();
        assert_eq!(config.roster.symbols.len(), 30);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config(Some("/nonexistent/candle-archiver/config.yaml")).unwrap();
        assert_eq!(config.storage.bucket, "projetcryptoalex");
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "storage:\n  backend: memory\nbatch:\n  strict_history: true\n")
            .unwrap();

        let config = load_config(path.to_str()).unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(config.batch.strict_history);
    }

    #[test]
    fn test_shipped_config_keeps_full_roster() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.yaml");

        let config = load_config(Some(path)).unwrap();

        assert_eq!(config.roster.symbols, DEFAULT_SYMBOLS.to_vec());
        assert_eq!(config.market_data.limit, 1000);
    }

    #[test]
    fn test_load_full_config() {
        let yaml = r"
market_data:
  base_url: http://localhost:8080
  limit: 500
  timeout_secs: 5
storage:
  backend: s3
  bucket: my-candles
  region: eu-west-3
  key_prefix: minute/
  staging_dir: /tmp/staging
roster:
  symbols: [btcusdt, ETHUSDT]
observability:
  logging:
    level: debug
    format: pretty
";

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load config: {e}"),
        };

        assert_eq!(config.market_data.limit, 500);
        assert_eq!(config.storage.bucket, "my-candles");
        assert_eq!(config.storage.key_prefix, "minute/");
        let symbols: Vec<String> = config
            .roster
            .to_symbols()
            .into_iter()
            .map(|s| s.into_inner())
            .collect();
        assert_eq!(symbols, vec!["BTCUSDT", "ETHUSDT"]);
        assert!(config.observability.logging.is_pretty());

        let binance = config.market_data.to_binance_config();
        assert_eq!(binance.klines_url(), "http://localhost:8080/api/v3/klines");
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "bucket: ${CANDLE_ARCHIVER_TEST_NONEXISTENT_VAR:-projetcryptoalex}";
        let result = interpolate_env_vars(input);
        assert_eq!(result, "bucket: projetcryptoalex");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax, not format args
    fn test_env_var_with_default_uses_existing() {
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);
        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "secret_access_key: ${CANDLE_ARCHIVER_TEST_UNLIKELY_TO_EXIST}";
        let result = interpolate_env_vars(input);
        assert_eq!(result, "secret_access_key: ");
    }

    #[test_case("market_data:\n  limit: 0\n", "market_data.limit" ; "zero limit")]
    #[test_case("market_data:\n  limit: 1001\n", "market_data.limit" ; "limit above page size")]
    #[test_case("market_data:\n  timeout_secs: 0\n", "timeout_secs" ; "zero timeout")]
    #[test_case("storage:\n  bucket: ''\n", "storage.bucket" ; "empty bucket")]
    #[test_case("roster:\n  symbols: []\n", "must not be empty" ; "empty roster")]
    #[test_case("roster:\n  symbols: [BTCUSDT, btcusdt]\n", "duplicate" ; "duplicate symbol")]
    #[test_case("roster:\n  symbols: ['BTC/USDT']\n", "roster.symbols" ; "invalid symbol")]
    #[test_case("observability:\n  logging:\n    format: xml\n", "format" ; "unknown log format")]
    fn test_validation_rejects(yaml: &str, expected: &str) {
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected validation error for {yaml:?}");
        };
        assert!(
            err.to_string().contains(expected),
            "{err} should mention {expected}"
        );
    }

    #[test]
    fn test_memory_backend_allows_empty_bucket() {
        let yaml = "storage:\n  backend: memory\n  bucket: ''\n";
        assert!(load_config_from_string(yaml).is_ok());
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = load_config_from_string("roster: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
