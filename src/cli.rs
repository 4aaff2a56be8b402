//! Argument definitions for the two front-ends, plus logging setup.

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Arguments for `keynote-cli`.
#[derive(Parser, Debug)]
#[command(name = "keynote-cli", version, about = "CLI for the Keynote dashboard API")]
pub struct CliArgs {
    /// Enable verbose logging, up to 3 times
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Your personal API key from api.keynote.com
    #[arg(short = 'k', long)]
    pub apikey: Option<String>,

    /// List all available measurement slots and their current data values
    #[arg(short = 'l', long)]
    pub list_measurement_slots: bool,

    /// Measurement slot of your Keynote account to monitor
    #[arg(short = 'm', long)]
    pub measurement_slot: Option<String>,
}

/// Arguments for `check-keynote`.
#[derive(Parser, Debug)]
#[command(
    name = "check-keynote",
    version,
    about = "Nagios-style check for Keynote availability and response times"
)]
pub struct CheckArgs {
    /// Enable verbose logging, up to 3 times
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Timeout for this check in seconds; enforced by the invoking scheduler
    #[arg(short = 't', long, default_value_t = 10)]
    pub timeout: u64,

    /// Your personal API key from api.keynote.com
    #[arg(short = 'k', long)]
    pub apikey: Option<String>,

    /// List all available measurement slots and their current data values
    #[arg(short = 'l', long)]
    pub list_measurement_slots: bool,

    /// Measurement slot of your Keynote account to monitor
    #[arg(short = 'm', long)]
    pub measurement_slot: Option<String>,

    /// Warning level for any time range of availabilities (percent, lower bound)
    #[arg(short = 'a', long, default_value_t = 99.0)]
    pub avail_warning: f64,

    /// Critical level for any time range of availabilities (percent, lower bound)
    #[arg(short = 'A', long, default_value_t = 80.0)]
    pub avail_critical: f64,

    /// Warning level for any time range of response times (seconds, upper bound)
    #[arg(short = 'r', long)]
    pub response_warning: Option<f64>,

    /// Critical level for any time range of response times (seconds, upper bound)
    #[arg(short = 'R', long)]
    pub response_critical: Option<f64>,

    /// Warning level for remaining hourly API calls (lower bound)
    #[arg(long, default_value_t = 250)]
    pub apicalls_hour_warning: i64,

    /// Critical level for remaining hourly API calls (lower bound)
    #[arg(long)]
    pub apicalls_hour_critical: Option<i64>,

    /// Warning level for remaining daily API calls (lower bound)
    #[arg(long, default_value_t = 6000)]
    pub apicalls_day_warning: i64,

    /// Critical level for remaining daily API calls (lower bound)
    #[arg(long)]
    pub apicalls_day_critical: Option<i64>,
}

/// Initialize stderr logging; `-v` raises the level per repetition.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
