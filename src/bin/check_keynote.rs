//! Nagios-style check for Keynote availability and response times.
//!
//! Emits one metric per scanned time range for availability (percent, lower
//! warning/critical bounds, range 0-100) and response time (seconds, upper
//! bounds, min 0), plus the remaining hourly/daily API call budget and the
//! check's own runtime.

use std::error::Error;

use clap::Parser;
use nagiosplugin::{Metric, Resource, Runner, TriggerIfValue, Unit};

use keynoteapi::cli::{init_logging, CheckArgs};
use keynoteapi::client::{KeynoteClient, KeynoteConfig};
use keynoteapi::listing;
use keynoteapi::probe::{self, ProbeReport, DEFAULT_PROBE_RANGES};

fn main() {
    Runner::new().safe_run(run_check).print_and_exit()
}

fn run_check() -> Result<Resource, Box<dyn Error>> {
    let args = CheckArgs::parse();
    init_logging(args.verbose);

    let mut config = KeynoteConfig::default();
    if let Some(key) = args.apikey.clone() {
        config = config.with_api_key(key);
    }
    let mut client = KeynoteClient::new(config)?;

    let runtime = tokio::runtime::Runtime::new()?;

    if args.list_measurement_slots {
        runtime.block_on(listing::render_listing(&mut client, &mut std::io::stdout()))?;
        std::process::exit(0);
    }

    let slot = args
        .measurement_slot
        .clone()
        .ok_or("a measurement slot is required (-m), unless listing (-l)")?;

    let report = runtime.block_on(probe::run_probe(&mut client, &slot, &DEFAULT_PROBE_RANGES))?;

    Ok(build_resource(&args, &report))
}

/// Map a probe report to plugin metrics with their perfdata units and bounds.
fn build_resource(args: &CheckArgs, report: &ProbeReport) -> Resource {
    let mut resource = Resource::new("keynote")
        .with_description(format!("measurement slot '{}'", report.slot));

    for sample in &report.availability {
        resource = resource.with_result(
            Metric::new(format!("avail_{}", sample.range.label()), sample.value)
                .with_thresholds(args.avail_warning, args.avail_critical, TriggerIfValue::Less)
                .with_unit(Unit::Percentage)
                .with_minimum(0.0)
                .with_maximum(100.0),
        );
    }

    for sample in &report.response_times {
        resource = resource.with_result(
            Metric::new(format!("response_{}", sample.range.label()), sample.value)
                .with_thresholds(
                    args.response_warning,
                    args.response_critical,
                    TriggerIfValue::Greater,
                )
                .with_unit(Unit::Seconds)
                .with_minimum(0.0),
        );
    }

    if let Some(hour) = report.remaining.remaining_hour {
        resource = resource.with_result(
            Metric::new("remaining_api_calls_hour", hour)
                .with_thresholds(
                    args.apicalls_hour_warning,
                    args.apicalls_hour_critical,
                    TriggerIfValue::Less,
                )
                .with_minimum(0),
        );
    }
    if let Some(day) = report.remaining.remaining_day {
        resource = resource.with_result(
            Metric::new("remaining_api_calls_day", day)
                .with_thresholds(
                    args.apicalls_day_warning,
                    args.apicalls_day_critical,
                    TriggerIfValue::Less,
                )
                .with_minimum(0),
        );
    }

    resource = resource.with_result(
        Metric::new("script_runtime", report.runtime_secs)
            .with_unit(Unit::Seconds)
            .with_minimum(0.0),
    );

    resource
}
