//! Candle Archiver Binary
//!
//! Runs one archive pass over the roster and exits.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin candle-archiver
//! ```
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CANDLE_ARCHIVER_CONFIG`: Path to the YAML config (default: config.yaml)
//! - `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` / `AWS_REGION`: S3 credentials
//!   when not set in the config file
//! - `RUST_LOG`: Log filter (default: candle_archiver=info)
//!
//! On completion the response document is written to stdout and the process
//! exits 0, even when individual symbols failed. A non-zero exit means the
//! job could not start.

use std::sync::Arc;

use anyhow::Context;
use candle_archiver::application::dto::InvocationResponseDto;
use candle_archiver::config::{Config, config_path, load_config};
use candle_archiver::infrastructure::config::Container;
use candle_archiver::infrastructure::marketdata::BinanceMarketDataAdapter;
use candle_archiver::infrastructure::storage::ObjectStoreSeriesStore;
use candle_archiver::{observability, telemetry};

/// Concrete container wired for production.
type AppContainer = Container<BinanceMarketDataAdapter, ObjectStoreSeriesStore>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let path = config_path();
    let config = load_config(Some(&path)).with_context(|| format!("loading {path}"))?;

    if let Err(e) = telemetry::init_tracing(&config.observability.logging) {
        eprintln!("Failed to initialize tracing: {e}");
    }
    observability::register_metrics();

    log_config(&path, &config);

    let container = build_container(&config)?;
    tracing::debug!(symbols = ?container.roster(), "Roster");
    let report = container.run_batch_use_case().execute().await;

    if report.failed() > 0 {
        tracing::warn!(
            failed = report.failed(),
            symbols = ?report
                .symbols
                .iter()
                .filter(|r| r.outcome.is_failure())
                .map(|r| r.symbol.as_str())
                .collect::<Vec<_>>(),
            "Some symbols were not updated"
        );
    }

    let response = serde_json::to_string(&InvocationResponseDto::success())
        .context("serializing response")?;
    println!("{response}");

    Ok(())
}

/// Build adapters from configuration and wire them into the container.
fn build_container(config: &Config) -> anyhow::Result<AppContainer> {
    let market_data = BinanceMarketDataAdapter::new(&config.market_data.to_binance_config())
        .context("creating market data adapter")?;
    let store = ObjectStoreSeriesStore::from_config(&config.storage.to_store_config())
        .context("creating series store")?;

    Ok(Container::new(
        Arc::new(market_data),
        Arc::new(store),
        config.roster.to_symbols(),
        config.batch.strict_history,
    ))
}

fn log_config(path: &str, config: &Config) {
    tracing::info!(
        config_path = %path,
        base_url = %config.market_data.base_url,
        limit = config.market_data.limit,
        backend = ?config.storage.backend,
        bucket = %config.storage.bucket,
        symbols = config.roster.symbols.len(),
        strict_history = config.batch.strict_history,
        "Starting Candle Archiver"
    );
}

/// Load `.env` from the working directory or the nearest ancestor that has one.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}
