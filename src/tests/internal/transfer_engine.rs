//! 传输引擎测试：直接调用 `TransferEngine::run`，用闭包收集进度。
//!
//! 全部使用进程内测试服务器，不依赖外网。

use std::sync::Arc;

use crate::DownloadRequest;
use crate::tests::{ServeOptions, random_payload, refused_url, spawn_server};
use crate::transfer::{
    CancelFlag, DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_INDETERMINATE_REPORT_STEP,
    DEFAULT_MAX_REDIRECTS, DEFAULT_READ_TIMEOUT_MS, DEFAULT_TEMP_FILE_NAME, DownloadError,
    DownloadOutcome, DownloadProgress, PromoteStrategy, TransferConfig, TransferEngine,
};
use crate::trust::TrustAll;

const PAYLOAD_LEN: usize = 10_000;

fn engine() -> TransferEngine {
    TransferEngine::new(TransferConfig::default(), Arc::new(TrustAll))
}

/// 跑一次下载，返回结果与全部进度。
async fn run_collecting(
    engine: &TransferEngine,
    request: &DownloadRequest,
    cancel: &CancelFlag,
) -> (DownloadOutcome, Vec<DownloadProgress>) {
    let mut seen = Vec::new();
    let mut sink = |p: DownloadProgress| seen.push(p);
    let outcome = engine.run(request, &mut sink, cancel).await;
    (outcome, seen)
}

// ---------- 请求规范化 ----------

#[test]
fn url_without_scheme_gets_http_prefix() {
    let request = DownloadRequest::new("example.com/app.apk", "/tmp/app.apk");
    assert_eq!(request.source_url(), "http://example.com/app.apk");
}

#[test]
fn url_with_scheme_is_kept() {
    let http = DownloadRequest::new("http://example.com/a.apk", "/tmp/a.apk");
    let https = DownloadRequest::new("https://example.com/a.apk", "/tmp/a.apk");
    assert_eq!(http.source_url(), "http://example.com/a.apk");
    assert_eq!(https.source_url(), "https://example.com/a.apk");
}

#[test]
fn deserialized_request_gets_http_prefix() {
    let request: DownloadRequest = serde_json::from_str(
        r#"{"source_url": "example.com/app.apk", "destination": "/tmp/app.apk"}"#,
    )
    .unwrap();
    assert_eq!(request.source_url(), "http://example.com/app.apk");
    assert_eq!(request.destination(), std::path::Path::new("/tmp/app.apk"));

    let https: DownloadRequest = serde_json::from_str(
        r#"{"source_url": "https://example.com/app.apk", "destination": "app.apk"}"#,
    )
    .unwrap();
    assert_eq!(https.source_url(), "https://example.com/app.apk");
}

#[tokio::test]
async fn deserialized_request_without_scheme_downloads() {
    let payload = random_payload(3_000);
    let server = spawn_server(payload.clone(), ServeOptions::default()).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("app.apk");

    let json = serde_json::json!({
        "source_url": format!("{}/app.apk", server.authority),
        "destination": dest,
    });
    let request: DownloadRequest = serde_json::from_value(json).unwrap();

    let (outcome, _) = run_collecting(&engine(), &request, &CancelFlag::new()).await;
    assert!(outcome.succeeded(), "下载应成功: {:?}", outcome);
    assert_eq!(std::fs::read(&dest).unwrap(), payload);
}

// ---------- 配置 ----------

#[test]
fn partial_config_fills_defaults() {
    let config: TransferConfig =
        serde_json::from_str(r#"{"buffer_size": 4096, "promote_strategy": "copy_only"}"#).unwrap();
    assert_eq!(config.buffer_size, 4096);
    assert_eq!(config.promote_strategy, PromoteStrategy::CopyOnly);
    assert_eq!(config.connect_timeout_ms, DEFAULT_CONNECT_TIMEOUT_MS);
    assert_eq!(config.read_timeout_ms, DEFAULT_READ_TIMEOUT_MS);
    assert_eq!(config.temp_file_name, DEFAULT_TEMP_FILE_NAME);
    assert!(config.keep_alive);
    assert_eq!(config.max_redirects, DEFAULT_MAX_REDIRECTS);
    assert_eq!(config.indeterminate_report_step, DEFAULT_INDETERMINATE_REPORT_STEP);

    let empty: TransferConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, TransferConfig::default());

    let round_trip: TransferConfig =
        serde_json::from_str(&serde_json::to_string(&config).unwrap()).unwrap();
    assert_eq!(round_trip, config);
}

#[test]
fn percent_is_none_when_total_unknown_or_zero() {
    let unknown = DownloadProgress { bytes_done: 10, total: None };
    let zero = DownloadProgress { bytes_done: 10, total: Some(0) };
    assert_eq!(unknown.percent(), None);
    assert_eq!(zero.percent(), None);
    assert!(zero.is_indeterminate());
}

#[test]
fn percent_floors_and_caps_at_100() {
    let p = DownloadProgress { bytes_done: 9_999, total: Some(10_000) };
    assert_eq!(p.percent(), Some(99));
    let over = DownloadProgress { bytes_done: 12_000, total: Some(10_000) };
    assert_eq!(over.percent(), Some(100));
}

// ---------- 端到端 ----------

#[tokio::test]
async fn known_length_payload_is_saved_byte_for_byte() {
    let payload = random_payload(PAYLOAD_LEN);
    let server = spawn_server(payload.clone(), ServeOptions::default()).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("app.apk");

    let request = DownloadRequest::new(server.url("/app.apk"), &dest);
    let (outcome, seen) = run_collecting(&engine(), &request, &CancelFlag::new()).await;

    assert!(outcome.succeeded(), "下载应成功: {:?}", outcome);
    assert_eq!(outcome.destination(), dest.as_path());
    assert_eq!(std::fs::read(&dest).unwrap(), payload);
    assert!(!dir.path().join(DEFAULT_TEMP_FILE_NAME).exists());

    // 每块不超过 1024 字节，累计字节数最终等于总大小
    let mut previous = 0;
    for p in &seen {
        assert!(p.bytes_done > previous && p.bytes_done - previous <= 1024);
        assert_eq!(p.total, Some(PAYLOAD_LEN as u64));
        previous = p.bytes_done;
    }
    assert_eq!(previous, PAYLOAD_LEN as u64);

    let percents: Vec<u8> = seen.iter().filter_map(|p| p.percent()).collect();
    assert!(percents.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(percents.last(), Some(&100));
}

#[tokio::test]
async fn url_without_scheme_is_requested_over_http_with_keep_alive() {
    let server = spawn_server(random_payload(256), ServeOptions::default()).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("app.apk");

    let request = DownloadRequest::new(format!("{}/app.apk", server.authority), &dest);
    assert_eq!(request.source_url(), server.url("/app.apk"));

    let (outcome, _) = run_collecting(&engine(), &request, &CancelFlag::new()).await;
    assert!(outcome.succeeded(), "下载应成功: {:?}", outcome);

    let recorded = server.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].request_line, "GET /app.apk HTTP/1.1");
    assert_eq!(
        recorded[0]
            .header("connection")
            .map(|v| v.to_ascii_lowercase()),
        Some("keep-alive".to_string())
    );
}

#[tokio::test]
async fn unknown_length_reports_indeterminate_progress() {
    let payload = random_payload(5_000);
    let options = ServeOptions {
        send_content_length: false,
        ..Default::default()
    };
    let server = spawn_server(payload.clone(), options).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("app.apk");

    let request = DownloadRequest::new(server.url("/app.apk"), &dest);
    let (outcome, seen) = run_collecting(&engine(), &request, &CancelFlag::new()).await;

    assert!(outcome.succeeded(), "下载应成功: {:?}", outcome);
    assert!(!seen.is_empty());
    assert!(seen.iter().all(|p| p.total.is_none() && p.percent().is_none()));
    assert_eq!(seen.last().map(|p| p.bytes_done), Some(5_000));
    assert_eq!(std::fs::read(&dest).unwrap(), payload);
}

#[tokio::test]
async fn stale_destination_and_temp_are_replaced() {
    let payload = random_payload(PAYLOAD_LEN);
    let server = spawn_server(payload.clone(), ServeOptions::default()).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("app.apk");
    let temp = dir.path().join(DEFAULT_TEMP_FILE_NAME);
    std::fs::write(&dest, b"old apk").unwrap();
    std::fs::write(&temp, b"half written").unwrap();

    let request = DownloadRequest::new(server.url("/app.apk"), &dest);
    let (outcome, _) = run_collecting(&engine(), &request, &CancelFlag::new()).await;

    assert!(outcome.succeeded(), "下载应成功: {:?}", outcome);
    assert_eq!(std::fs::read(&dest).unwrap(), payload);
    assert!(!temp.exists());
}

#[tokio::test]
async fn missing_parent_directories_are_created() {
    let server = spawn_server(random_payload(2_048), ServeOptions::default()).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("a").join("b").join("app.apk");

    let request = DownloadRequest::new(server.url("/app.apk"), &dest);
    let (outcome, _) = run_collecting(&engine(), &request, &CancelFlag::new()).await;

    assert!(outcome.succeeded(), "下载应成功: {:?}", outcome);
    assert_eq!(std::fs::metadata(&dest).unwrap().len(), 2_048);
}

#[tokio::test]
async fn cancel_stops_at_next_chunk_without_destination() {
    let payload = random_payload(64 * 1024);
    let server = spawn_server(payload, ServeOptions::default()).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("app.apk");

    let cancel = CancelFlag::new();
    let cancel_in_sink = cancel.clone();
    let mut seen = Vec::new();
    let mut sink = |p: DownloadProgress| {
        seen.push(p);
        cancel_in_sink.cancel();
    };

    let request = DownloadRequest::new(server.url("/app.apk"), &dest);
    let outcome = engine().run(&request, &mut sink, &cancel).await;

    assert!(outcome.is_cancelled(), "应为取消: {:?}", outcome);
    assert!(!outcome.succeeded());
    assert_eq!(seen.len(), 1, "取消后不应再有进度");
    assert!(!dest.exists());
    assert!(!dir.path().join(DEFAULT_TEMP_FILE_NAME).exists());
}

#[tokio::test]
async fn error_status_fails_and_keeps_existing_destination() {
    let options = ServeOptions {
        status: 404,
        ..Default::default()
    };
    let server = spawn_server(Vec::new(), options).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("app.apk");
    std::fs::write(&dest, b"previous release").unwrap();

    let request = DownloadRequest::new(server.url("/missing.apk"), &dest);
    let (outcome, seen) = run_collecting(&engine(), &request, &CancelFlag::new()).await;

    assert!(matches!(
        outcome.error(),
        Some(DownloadError::HttpStatus(status)) if status.as_u16() == 404
    ));
    assert!(seen.is_empty());
    assert_eq!(std::fs::read(&dest).unwrap(), b"previous release");
}

#[tokio::test]
async fn refused_connection_becomes_failed_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("app.apk");

    let request = DownloadRequest::new(refused_url().await, &dest);
    let (outcome, _) = run_collecting(&engine(), &request, &CancelFlag::new()).await;

    assert!(matches!(outcome.error(), Some(DownloadError::Connection(_))));
    assert!(!dest.exists());
}

#[tokio::test]
async fn copy_only_strategy_still_delivers_file() {
    let payload = random_payload(PAYLOAD_LEN);
    let server = spawn_server(payload.clone(), ServeOptions::default()).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("app.apk");

    let config = TransferConfig {
        promote_strategy: PromoteStrategy::CopyOnly,
        ..Default::default()
    };
    let engine = TransferEngine::new(config, Arc::new(TrustAll));
    let request = DownloadRequest::new(server.url("/app.apk"), &dest);
    let (outcome, _) = run_collecting(&engine, &request, &CancelFlag::new()).await;

    assert!(outcome.succeeded(), "下载应成功: {:?}", outcome);
    assert_eq!(std::fs::read(&dest).unwrap(), payload);
    assert!(!dir.path().join(DEFAULT_TEMP_FILE_NAME).exists());
}
