//! Integration tests for the measurement-slot listing.

mod common;

use common::{sample_dashboard, write_mock};
use keynoteapi::client::{KeynoteClient, KeynoteConfig};
use keynoteapi::listing::render_listing;
use serde_json::json;
use tempfile::TempDir;

async fn render(document: &serde_json::Value) -> String {
    let dir = TempDir::new().unwrap();
    let mock_path = dir.path().join("dashboard.json");
    write_mock(&mock_path, document);
    let config = KeynoteConfig::default()
        .with_api_key("test-api-key")
        .with_mock_input(&mock_path)
        .with_cache_dir(dir.path());
    let mut client = KeynoteClient::new(config).unwrap();

    let mut out = Vec::new();
    render_listing(&mut client, &mut out).await.unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn listing_shows_alias_with_all_figure_groups() {
    let output = render(&sample_dashboard()).await;

    assert!(output.contains("# 'WPT_Ford':"));
    assert!(output.contains("Availability data:"));
    assert!(output.contains("- last_24_hours:\t 97.658%"));
    assert!(output.contains("Response times:"));
    assert!(output.contains("- last_24_hours:\t 28.783s"));
    assert!(output.contains("Thresholds:"));
    assert!(output.contains("- availability_warning:\t 99"));
}

#[tokio::test]
async fn listing_follows_document_order() {
    let document = json!({
        "product": [
            {"id": "TxP", "measurement": [{"alias": "first_slot", "id": "1"}]},
            {"id": "ApP", "measurement": [{"alias": "second_slot", "id": "2"}]}
        ]
    });
    let output = render(&document).await;

    let first = output.find("first_slot").unwrap();
    let second = output.find("second_slot").unwrap();
    assert!(first < second);
}

#[tokio::test]
async fn listing_omits_threshold_section_without_data() {
    let document = json!({
        "product": [{
            "id": "TxP",
            "measurement": [{
                "alias": "bare",
                "id": "3",
                "avail_data": [{"name": "last_one_hour", "value": "100"}]
            }]
        }]
    });
    let output = render(&document).await;

    assert!(output.contains("# 'bare':"));
    assert!(!output.contains("Thresholds:"));
}
