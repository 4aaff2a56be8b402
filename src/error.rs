//! Error types for the Keynote API client.

use thiserror::Error;

/// Primary error type for all Keynote operations.
#[derive(Error, Debug)]
pub enum KeynoteError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Http { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid {metric} for {slot}/{time_range}: '{value}'")]
    Validation {
        metric: &'static str,
        slot: String,
        time_range: String,
        value: String,
    },

    #[error("no valid {metric} in any time range (exhausted API quota? {remaining} calls left this hour)")]
    NoData {
        metric: &'static str,
        remaining: String,
    },
}

impl KeynoteError {
    /// Aggregate failure for a probe that obtained zero usable values.
    pub fn no_data(metric: &'static str, remaining_hour: Option<i64>) -> Self {
        let remaining = remaining_hour.map_or_else(|| "unknown".to_string(), |n| n.to_string());
        Self::NoData { metric, remaining }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, KeynoteError>;
