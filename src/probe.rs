//! Check-mode scan: validate per-time-range figures and collect samples.
//!
//! Invalid or missing values are logged and skipped rather than aborting the
//! scan; only a scan that ends with zero usable availability or response-time
//! samples fails as a whole, since that usually means the API quota ran out.

use std::time::Instant;

use tracing::{debug, warn};

use crate::client::KeynoteClient;
use crate::error::{KeynoteError, Result};
use crate::types::{RateLimitState, TimeRange};

/// Time ranges scanned by the monitoring check.
pub const DEFAULT_PROBE_RANGES: [TimeRange; 4] = [
    TimeRange::LastFiveMinute,
    TimeRange::LastFifteenMinute,
    TimeRange::LastOneHour,
    TimeRange::Last24Hours,
];

/// One validated figure for one time range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub range: TimeRange,
    pub value: f64,
}

/// Everything the check binary needs to emit its metrics.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub slot: String,
    pub availability: Vec<Sample>,
    pub response_times: Vec<Sample>,
    pub remaining: RateLimitState,
    pub runtime_secs: f64,
}

/// Coerce a raw availability value, accepting percentages in 0..=100.
pub fn validate_availability(slot: &str, range: TimeRange, raw: &str) -> Result<f64> {
    let value: f64 = raw.parse().map_err(|_| KeynoteError::Validation {
        metric: "availability",
        slot: slot.to_string(),
        time_range: range.key().to_string(),
        value: raw.to_string(),
    })?;
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(KeynoteError::Validation {
            metric: "availability",
            slot: slot.to_string(),
            time_range: range.key().to_string(),
            value: raw.to_string(),
        })
    }
}

/// Coerce a raw response time, accepting any non-negative number of seconds.
pub fn validate_response_time(slot: &str, range: TimeRange, raw: &str) -> Result<f64> {
    let value: f64 = raw.parse().map_err(|_| KeynoteError::Validation {
        metric: "response time",
        slot: slot.to_string(),
        time_range: range.key().to_string(),
        value: raw.to_string(),
    })?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(KeynoteError::Validation {
            metric: "response time",
            slot: slot.to_string(),
            time_range: range.key().to_string(),
            value: raw.to_string(),
        })
    }
}

/// Scan `ranges` for availability and response-time samples of `slot`.
///
/// Fails with [`KeynoteError::NoData`] if a whole scan produced no usable
/// availability values, or none for response times.
pub async fn run_probe(
    client: &mut KeynoteClient,
    slot: &str,
    ranges: &[TimeRange],
) -> Result<ProbeReport> {
    let start = Instant::now();

    let availabilities = client.avail_data(slot).await?;
    let response_times = client.perf_data(slot).await?;

    let mut availability_samples = Vec::new();
    let mut response_samples = Vec::new();

    for range in ranges {
        match availabilities.get(range.key()) {
            Some(raw) => match validate_availability(slot, *range, raw) {
                Ok(value) => availability_samples.push(Sample { range: *range, value }),
                Err(err) => warn!(%err, "skipping availability sample"),
            },
            None => debug!(slot, range = range.key(), "no availability value"),
        }

        match response_times.get(range.key()) {
            Some(raw) => match validate_response_time(slot, *range, raw) {
                Ok(value) => response_samples.push(Sample { range: *range, value }),
                Err(err) => warn!(%err, "skipping response-time sample"),
            },
            None => debug!(slot, range = range.key(), "no response-time value"),
        }
    }

    let remaining = client.remaining_calls();

    if availability_samples.is_empty() {
        return Err(KeynoteError::no_data("availability", remaining.remaining_hour));
    }
    if response_samples.is_empty() {
        return Err(KeynoteError::no_data("response time", remaining.remaining_hour));
    }

    Ok(ProbeReport {
        slot: slot.to_string(),
        availability: availability_samples,
        response_times: response_samples,
        remaining,
        runtime_secs: start.elapsed().as_secs_f64(),
    })
}
