//! Result rendering
//!
//! Plain output prints bare values one per line, ready for scripts; JSON
//! output carries the full report.

use crate::config::OutputFormat;
use crate::core::Reconstruction;
use crate::error::Result;
use crate::race::RaceReport;
use crate::utils::format_probability;

/// Render a race report
///
/// Plain output is the three sequential values, a blank line, then the two
/// concurrent values.
pub fn render_race(report: &RaceReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => {
            let mut lines: Vec<String> = report
                .sequential()
                .iter()
                .map(|&value| format_probability(value))
                .collect();
            lines.push(String::new());
            lines.extend(report.concurrent().iter().map(|&value| format_probability(value)));
            Ok(lines.join("\n"))
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

/// Render a header reconstruction
///
/// Plain output is the merkle root followed by the block hash, both as hex.
pub fn render_header(reconstruction: &Reconstruction, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(format!(
            "{}\n{}",
            reconstruction.merkle_root.to_hex(),
            reconstruction.block_hash().to_hex()
        )),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&reconstruction.report())?),
    }
}
