//! Integration tests for the check-mode probe.

mod common;

use common::{sample_dashboard, write_mock};
use keynoteapi::client::{KeynoteClient, KeynoteConfig};
use keynoteapi::error::KeynoteError;
use keynoteapi::probe::{run_probe, DEFAULT_PROBE_RANGES};
use keynoteapi::types::TimeRange;
use serde_json::{json, Value};
use tempfile::TempDir;

fn mock_client(dir: &TempDir, document: &Value) -> KeynoteClient {
    let mock_path = dir.path().join("dashboard.json");
    write_mock(&mock_path, document);
    let config = KeynoteConfig::default()
        .with_api_key("test-api-key")
        .with_mock_input(&mock_path)
        .with_cache_dir(dir.path());
    KeynoteClient::new(config).unwrap()
}

#[tokio::test]
async fn probe_collects_every_scanned_range() {
    let dir = TempDir::new().unwrap();
    let mut client = mock_client(&dir, &sample_dashboard());

    let report = run_probe(&mut client, "WPT_Ford", &DEFAULT_PROBE_RANGES)
        .await
        .unwrap();

    assert_eq!(report.slot, "WPT_Ford");
    assert_eq!(report.availability.len(), 4);
    assert_eq!(report.response_times.len(), 4);

    let last_day = report
        .availability
        .iter()
        .find(|s| s.range == TimeRange::Last24Hours)
        .unwrap();
    assert!((last_day.value - 97.658).abs() < 1e-9);

    let last_day_perf = report
        .response_times
        .iter()
        .find(|s| s.range == TimeRange::Last24Hours)
        .unwrap();
    assert!((last_day_perf.value - 28.783).abs() < 1e-9);

    assert_eq!(report.remaining.remaining_hour, Some(248));
    assert!(report.runtime_secs >= 0.0);
}

#[tokio::test]
async fn probe_skips_invalid_values_and_keeps_going() {
    let document = json!({
        "product": [{
            "id": "TxP",
            "measurement": [{
                "alias": "flaky",
                "id": "7",
                "avail_data": [
                    {"name": "last_five_minute", "value": "not-a-number"},
                    {"name": "last_fifteen_minute", "value": "101"},
                    {"name": "last_one_hour", "value": "98.193"}
                ],
                "perf_data": [
                    {"name": "last_one_hour", "value": "-3"},
                    {"name": "last_24_hours", "value": "28.783"}
                ]
            }]
        }]
    });

    let dir = TempDir::new().unwrap();
    let mut client = mock_client(&dir, &document);

    let report = run_probe(&mut client, "flaky", &DEFAULT_PROBE_RANGES)
        .await
        .unwrap();

    assert_eq!(report.availability.len(), 1);
    assert_eq!(report.availability[0].range, TimeRange::LastOneHour);
    assert_eq!(report.response_times.len(), 1);
    assert_eq!(report.response_times[0].range, TimeRange::Last24Hours);
}

#[tokio::test]
async fn probe_fails_when_no_availability_was_usable() {
    let document = json!({
        "product": [{
            "id": "TxP",
            "measurement": [{
                "alias": "dark",
                "id": "8",
                "avail_data": [],
                "perf_data": [{"name": "last_one_hour", "value": "1.5"}]
            }]
        }],
        "remaining_api_calls": {"hour_call_remaining": 0, "day_call_remaining": 12}
    });

    let dir = TempDir::new().unwrap();
    let mut client = mock_client(&dir, &document);

    let err = run_probe(&mut client, "dark", &DEFAULT_PROBE_RANGES)
        .await
        .unwrap_err();
    match err {
        KeynoteError::NoData { metric, remaining } => {
            assert_eq!(metric, "availability");
            assert_eq!(remaining, "0");
        }
        other => panic!("expected NoData, got {other:?}"),
    }
}

#[tokio::test]
async fn probe_fails_when_no_response_time_was_usable() {
    let document = json!({
        "product": [{
            "id": "TxP",
            "measurement": [{
                "alias": "silent",
                "id": "9",
                "avail_data": [{"name": "last_one_hour", "value": "99.9"}],
                "perf_data": []
            }]
        }]
    });

    let dir = TempDir::new().unwrap();
    let mut client = mock_client(&dir, &document);

    let err = run_probe(&mut client, "silent", &DEFAULT_PROBE_RANGES)
        .await
        .unwrap_err();
    match err {
        KeynoteError::NoData { metric, remaining } => {
            assert_eq!(metric, "response time");
            assert_eq!(remaining, "unknown");
        }
        other => panic!("expected NoData, got {other:?}"),
    }
}

#[tokio::test]
async fn probe_of_unknown_slot_reports_no_availability() {
    let dir = TempDir::new().unwrap();
    let mut client = mock_client(&dir, &sample_dashboard());

    let err = run_probe(&mut client, "nonexistent", &DEFAULT_PROBE_RANGES)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        KeynoteError::NoData { metric: "availability", .. }
    ));
}
