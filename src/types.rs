//! Wire types for the Keynote dashboard document.
//!
//! Values arrive as strings in the wire format and are kept as strings here;
//! numeric coercion is the caller's job (see [`crate::probe`]).

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// One named figure inside `avail_data`, `perf_data`, or `threshold_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// A measurement slot, identified by its `alias`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub alias: String,
    pub id: String,
    #[serde(default)]
    pub avail_data: Vec<MetricRecord>,
    #[serde(default)]
    pub perf_data: Vec<MetricRecord>,
    #[serde(default)]
    pub threshold_data: Vec<MetricRecord>,
}

/// A product grouping one or more measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub measurement: Vec<Measurement>,
}

/// Hourly and daily call budget reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainingApiCalls {
    pub hour_call_remaining: i64,
    pub day_call_remaining: i64,
}

/// Root object of a `getdashboarddata` response.
///
/// A document without `product` has zero products rather than being an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DashboardDocument {
    #[serde(default)]
    pub product: Vec<Product>,
    #[serde(
        default,
        deserialize_with = "object_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub remaining_api_calls: Option<RemainingApiCalls>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<serde_json::Value>,
}

/// Some API revisions send `remaining_api_calls` as something other than an
/// object; treat those as if the field were absent.
fn object_or_none<'de, D>(deserializer: D) -> Result<Option<RemainingApiCalls>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl DashboardDocument {
    /// Every measurement alias across every product, mapped to its id.
    ///
    /// Iteration order follows document order. A duplicate alias keeps its
    /// original position but takes the id of the last occurrence.
    pub fn measurement_slots(&self) -> IndexMap<String, String> {
        let mut slots = IndexMap::new();
        for product in &self.product {
            for measurement in &product.measurement {
                slots.insert(measurement.alias.clone(), measurement.id.clone());
            }
        }
        slots
    }

    /// Availability figures for `alias`, keyed by time-range name.
    /// Empty if the alias is unknown.
    pub fn avail_data(&self, alias: &str) -> IndexMap<String, String> {
        self.slot_data(alias, |m| &m.avail_data)
    }

    /// Response-time figures for `alias`, keyed by time-range name.
    pub fn perf_data(&self, alias: &str) -> IndexMap<String, String> {
        self.slot_data(alias, |m| &m.perf_data)
    }

    /// Warning/critical threshold figures for `alias`.
    pub fn threshold_data(&self, alias: &str) -> IndexMap<String, String> {
        self.slot_data(alias, |m| &m.threshold_data)
    }

    fn slot_data(
        &self,
        alias: &str,
        select: fn(&Measurement) -> &Vec<MetricRecord>,
    ) -> IndexMap<String, String> {
        let mut data = IndexMap::new();
        for product in &self.product {
            for measurement in &product.measurement {
                if measurement.alias == alias {
                    for record in select(measurement) {
                        data.insert(record.name.clone(), record.value.clone());
                    }
                }
            }
        }
        data
    }
}

/// Remaining API calls recorded from fetched documents.
///
/// Both counts stay `None` until a document carrying `remaining_api_calls`
/// has been seen; a document without the field leaves prior values untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitState {
    pub remaining_hour: Option<i64>,
    pub remaining_day: Option<i64>,
}

impl RateLimitState {
    pub fn update_from(&mut self, document: &DashboardDocument) {
        if let Some(remaining) = &document.remaining_api_calls {
            self.remaining_hour = Some(remaining.hour_call_remaining);
            self.remaining_day = Some(remaining.day_call_remaining);
        }
    }
}

/// Symbolic reporting windows used by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeRange {
    LastFiveMinute,
    LastFifteenMinute,
    LastOneHour,
    Last24Hours,
    LastOneWeek,
    LastOneMonth,
}

impl TimeRange {
    pub const ALL: [TimeRange; 6] = [
        TimeRange::LastFiveMinute,
        TimeRange::LastFifteenMinute,
        TimeRange::LastOneHour,
        TimeRange::Last24Hours,
        TimeRange::LastOneWeek,
        TimeRange::LastOneMonth,
    ];

    /// Key used inside the dashboard document.
    pub fn key(&self) -> &'static str {
        match self {
            TimeRange::LastFiveMinute => "last_five_minute",
            TimeRange::LastFifteenMinute => "last_fifteen_minute",
            TimeRange::LastOneHour => "last_one_hour",
            TimeRange::Last24Hours => "last_24_hours",
            TimeRange::LastOneWeek => "last_one_week",
            TimeRange::LastOneMonth => "last_one_month",
        }
    }

    /// Short label used in metric names (`avail_5min`, `response_24h`, ...).
    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::LastFiveMinute => "5min",
            TimeRange::LastFifteenMinute => "15min",
            TimeRange::LastOneHour => "1h",
            TimeRange::Last24Hours => "24h",
            TimeRange::LastOneWeek => "1week",
            TimeRange::LastOneMonth => "1month",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
