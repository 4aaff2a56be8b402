//! Shared fixtures for integration tests.

use std::path::Path;

use serde_json::{json, Value};

/// A dashboard document in the shape the API returns for one transaction
/// product with a single measurement slot.
pub fn sample_dashboard() -> Value {
    json!({
        "product": [
            {
                "id": "TxP",
                "name": "Transaction Perspective",
                "measurement": [
                    {
                        "alias": "WPT_Ford",
                        "id": "41",
                        "avail_data": [
                            {"name": "last_five_minute", "value": "100"},
                            {"name": "last_fifteen_minute", "value": "98.059"},
                            {"name": "last_one_hour", "value": "98.193"},
                            {"name": "last_24_hours", "value": "97.658"}
                        ],
                        "perf_data": [
                            {"name": "last_five_minute", "value": "16.726", "unit": "seconds"},
                            {"name": "last_fifteen_minute", "value": "16.726", "unit": "seconds"},
                            {"name": "last_one_hour", "value": "28.465", "unit": "seconds"},
                            {"name": "last_24_hours", "value": "28.783", "unit": "seconds"}
                        ],
                        "threshold_data": [
                            {"name": "availability_warning", "value": "99"},
                            {"name": "availability_critical", "value": "80"},
                            {"name": "performance_warning", "value": "30"},
                            {"name": "performance_critical", "value": "60"}
                        ]
                    }
                ]
            }
        ],
        "remaining_api_calls": {
            "hour_call_remaining": 248,
            "day_call_remaining": 5950
        },
        "link": {
            "href": "http://api.keynote.com/keynote/api/getslotmetadata?api_key=0",
            "type": "application/json",
            "rel": "slotmetadata"
        }
    })
}

pub fn write_mock(path: &Path, document: &Value) {
    std::fs::write(path, serde_json::to_vec(document).unwrap()).unwrap();
}
