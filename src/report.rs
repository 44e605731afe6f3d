//! Rendering of merged PoP records.
//!
//! Two output shapes: a Markdown table for terminals and the raw JSON
//! array for anything downstream.

use crate::models::MergedLocation;
use anyhow::{Context, Result};
use chrono::Utc;
use std::io::Write;
use std::path::Path;

/// Render the merged locations as a Markdown table.
pub fn render_table(locations: &[MergedLocation]) -> String {
    let mut output = String::new();

    // Title
    output.push_str("# PoP Status Map\n\n");

    // Fetch metadata line
    let matched = locations.iter().filter(|l| l.is_matched()).count();
    output.push_str(&format!(
        "*Fetched: {} | PoPs: {} | With speed metadata: {}*\n\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        locations.len(),
        matched
    ));

    // The table itself
    output.push_str("| IATA | Status | City | Country | Region | Lat | Lon |\n");
    output.push_str("|:---|:---|:---|:---:|:---|---:|---:|\n");

    for location in locations {
        match &location.speed {
            Some(fields) => output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {:.4} | {:.4} |\n",
                location.iata,
                location.status,
                fields.city,
                fields.cca2,
                fields.region,
                fields.lat,
                fields.lon
            )),
            None => output.push_str(&format!(
                "| {} | {} | | | | | |\n",
                location.iata, location.status
            )),
        }
    }

    output
}

/// Render the merged locations as pretty-printed JSON.
pub fn render_json(locations: &[MergedLocation]) -> Result<String> {
    let mut json =
        serde_json::to_string_pretty(locations).context("Failed to serialize locations")?;
    json.push('\n');
    Ok(json)
}

/// Write rendered output to a file.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}
