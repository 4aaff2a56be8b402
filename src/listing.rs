//! Plain-text listing of every measurement slot with its current figures.

use std::io::Write;

use crate::client::KeynoteClient;
use crate::error::Result;

/// Print every alias with its availability, response-time, and threshold
/// figures. Values are shown exactly as the API reported them.
pub async fn render_listing<W: Write>(client: &mut KeynoteClient, out: &mut W) -> Result<()> {
    for (alias, _id) in client.measurement_slots().await? {
        writeln!(out, "\n# '{alias}':")?;

        writeln!(out, "  Availability data:")?;
        for (range, value) in client.avail_data(&alias).await? {
            writeln!(out, "    - {range}:\t {value}%")?;
        }

        writeln!(out, "  Response times:")?;
        for (range, value) in client.perf_data(&alias).await? {
            writeln!(out, "    - {range}:\t {value}s")?;
        }

        let thresholds = client.threshold_data(&alias).await?;
        if !thresholds.is_empty() {
            writeln!(out, "  Thresholds:")?;
            for (name, value) in thresholds {
                writeln!(out, "    - {name}:\t {value}")?;
            }
        }
    }
    Ok(())
}
