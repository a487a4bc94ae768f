//! Batch Integration Tests
//!
//! Runs the full batch (Binance adapter → merge → object store archive) against
//! a mock exchange and an in-memory bucket.

// Allow unwrap in tests - tests should panic on unexpected errors
#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutPayload};
use rust_decimal::Decimal;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use candle_archiver::application::dto::{InvocationResponseDto, SymbolOutcome};
use candle_archiver::application::ports::SeriesStorePort;
use candle_archiver::domain::candle_history::{Candle, CandleSeries};
use candle_archiver::domain::shared::{Symbol, Timestamp};
use candle_archiver::infrastructure::config::Container;
use candle_archiver::infrastructure::marketdata::{BinanceConfig, BinanceMarketDataAdapter};
use candle_archiver::infrastructure::storage::ObjectStoreSeriesStore;

const BASE_MS: i64 = 1_704_067_200_000;

// =============================================================================
// Helpers
// =============================================================================

fn kline(minute: i64, close: &str) -> serde_json::Value {
    let open_ms = BASE_MS + minute * 60_000;
    json!([
        open_ms, "1.00000000", "2.00000000", "0.50000000", close, "10.00000000",
        open_ms + 59_999, "15.00000000", 12, "4.00000000", "6.00000000", "0"
    ])
}

fn candle(minute: i64, close: i64) -> Candle {
    let open_ms = BASE_MS + minute * 60_000;
    let close = Decimal::new(close, 0);
    Candle {
        open_time: Timestamp::from_unix_millis(open_ms).unwrap(),
        open: close,
        high: close,
        low: close,
        close,
        volume: Decimal::ONE,
        close_time: Timestamp::from_unix_millis(open_ms + 59_999).unwrap(),
        quote_asset_volume: Decimal::ONE,
        number_of_trades: 1,
        taker_buy_base_asset_volume: Decimal::ONE,
        taker_buy_quote_asset_volume: Decimal::ONE,
        ignore: "0".to_string(),
    }
}

async fn mount_klines(server: &MockServer, symbol: &str, rows: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/v3/klines"))
        .and(query_param("symbol", symbol))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .mount(server)
        .await;
}

async fn mount_failure(server: &MockServer, symbol: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path("/api/v3/klines"))
        .and(query_param("symbol", symbol))
        .respond_with(ResponseTemplate::new(status).set_body_string("upstream failure"))
        .mount(server)
        .await;
}

struct Harness {
    _staging: TempDir,
    bucket: Arc<InMemory>,
    store: Arc<ObjectStoreSeriesStore>,
    container: Container<BinanceMarketDataAdapter, ObjectStoreSeriesStore>,
}

fn harness(server: &MockServer, roster: &[&str], strict_history: bool) -> Harness {
    let staging = TempDir::new().unwrap();
    let bucket = Arc::new(InMemory::new());
    let store = Arc::new(ObjectStoreSeriesStore::new(
        Arc::clone(&bucket) as Arc<dyn ObjectStore>,
        "",
        staging.path(),
    ));
    let market = BinanceMarketDataAdapter::new(
        &BinanceConfig::new(server.uri()).with_timeout(Duration::from_secs(5)),
    )
    .unwrap();

    let container = Container::new(
        Arc::new(market),
        Arc::clone(&store),
        roster.iter().map(|s| Symbol::new(*s)).collect(),
        strict_history,
    );

    Harness {
        _staging: staging,
        bucket,
        store,
        container,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn failing_symbol_is_left_untouched_and_run_succeeds() {
    let server = MockServer::start().await;
    mount_klines(&server, "AAAUSDT", json!([kline(0, "1.5"), kline(1, "1.6")])).await;
    mount_failure(&server, "BBBUSDT", 500).await;

    let h = harness(&server, &["AAAUSDT", "BBBUSDT"], false);
    let b = Symbol::new("BBBUSDT");
    let b_history: CandleSeries = vec![candle(0, 7)].into();
    h.store.save(&b, &b_history).await.unwrap();
    let b_before = h
        .bucket
        .get(&ObjectPath::from("BBBUSDT.parquet"))
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();

    let report = h.container.run_batch_use_case().execute().await;

    assert_eq!(
        report.outcome_for("AAAUSDT"),
        Some(&SymbolOutcome::Persisted {
            rows_total: 2,
            rows_added: 2,
            history_unavailable: false,
        })
    );
    assert!(matches!(
        report.outcome_for("BBBUSDT"),
        Some(SymbolOutcome::FetchFailed { .. })
    ));

    let a = h.store.load(&Symbol::new("AAAUSDT")).await.unwrap();
    assert_eq!(a.len(), 2);
    assert_eq!(a.candles()[0].close.to_string(), "1.5");

    let b_after = h
        .bucket
        .get(&ObjectPath::from("BBBUSDT.parquet"))
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    assert_eq!(b_before, b_after);

    let response = serde_json::to_value(InvocationResponseDto::success()).unwrap();
    assert_eq!(response["statusCode"], 200);
}

#[tokio::test]
async fn archived_rows_win_and_new_minutes_append() {
    let server = MockServer::start().await;
    mount_klines(&server, "BTCUSDT", json!([kline(0, "101"), kline(1, "102")])).await;

    let h = harness(&server, &["BTCUSDT"], false);
    let btc = Symbol::new("BTCUSDT");
    h.store
        .save(&btc, &vec![candle(0, 100)].into())
        .await
        .unwrap();

    h.container.run_batch_use_case().execute().await;

    let merged = h.store.load(&btc).await.unwrap();
    let closes: Vec<String> = merged.iter().map(|c| c.close.to_string()).collect();
    assert_eq!(closes, vec!["100", "102"]);
}

#[tokio::test]
async fn repeated_runs_do_not_grow_the_series() {
    let server = MockServer::start().await;
    mount_klines(
        &server,
        "ETHUSDT",
        json!([kline(0, "1"), kline(1, "2"), kline(2, "3")]),
    )
    .await;

    let h = harness(&server, &["ETHUSDT"], false);

    let first = h.container.run_batch_use_case().execute().await;
    let second = h.container.run_batch_use_case().execute().await;

    assert_eq!(first.persisted(), 1);
    assert_eq!(
        second.outcome_for("ETHUSDT"),
        Some(&SymbolOutcome::Persisted {
            rows_total: 3,
            rows_added: 0,
            history_unavailable: false,
        })
    );
    assert_eq!(h.store.load(&Symbol::new("ETHUSDT")).await.unwrap().len(), 3);
}

#[tokio::test]
async fn empty_page_writes_nothing() {
    let server = MockServer::start().await;
    mount_klines(&server, "AIUSDT", json!([])).await;

    let h = harness(&server, &["AIUSDT"], false);

    let report = h.container.run_batch_use_case().execute().await;

    assert_eq!(report.outcome_for("AIUSDT"), Some(&SymbolOutcome::NoNewData));
    assert!(!h.store.exists(&Symbol::new("AIUSDT")).await.unwrap());
}

#[tokio::test]
async fn unreadable_archive_is_replaced_unless_strict() {
    let server = MockServer::start().await;
    mount_klines(&server, "SOLUSDT", json!([kline(0, "9")])).await;
    let key = ObjectPath::from("SOLUSDT.parquet");

    // Lenient: the corrupt object is rewritten from the fetched page.
    let lenient = harness(&server, &["SOLUSDT"], false);
    lenient
        .bucket
        .put(&key, PutPayload::from_static(b"corrupt"))
        .await
        .unwrap();
    let report = lenient.container.run_batch_use_case().execute().await;
    assert_eq!(
        report.outcome_for("SOLUSDT"),
        Some(&SymbolOutcome::Persisted {
            rows_total: 1,
            rows_added: 1,
            history_unavailable: true,
        })
    );

    // Strict: the corrupt object is left in place.
    let strict = harness(&server, &["SOLUSDT"], true);
    strict
        .bucket
        .put(&key, PutPayload::from_static(b"corrupt"))
        .await
        .unwrap();
    let report = strict.container.run_batch_use_case().execute().await;
    assert!(matches!(
        report.outcome_for("SOLUSDT"),
        Some(SymbolOutcome::HistoryUnavailable { .. })
    ));
    let kept = strict
        .bucket
        .get(&key)
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    assert_eq!(kept.as_ref(), b"corrupt");
}
