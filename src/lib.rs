//! Keynote dashboard API client.
//!
//! Fetches the `getdashboarddata` document from api.keynote.com (subject to
//! hourly and daily call limits), caches each response on local disk for a
//! short TTL, and extracts availability, response-time, and threshold figures
//! per measurement slot. Ships two binaries: `keynote-cli` for listing
//! measurement slots and `check-keynote` for Nagios-style monitoring.
//!
//! # Quick Start
//!
//! ```no_run
//! use keynoteapi::client::{KeynoteClient, KeynoteConfig};
//!
//! # async fn example() -> keynoteapi::error::Result<()> {
//! let config = KeynoteConfig::default().with_api_key("my-api-key");
//! let mut client = KeynoteClient::new(config)?;
//! let availability = client.avail_data("WPT_Ford").await?;
//! println!("{availability:?}");
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod cli;
pub mod client;
pub mod error;
pub mod listing;
pub mod probe;
pub mod types;
