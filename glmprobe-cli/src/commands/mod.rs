//! CLI command implementations.

pub mod check;
pub mod token;
pub mod usage;

use glmprobe_core::Report;

/// Prints the report to stdout as pretty JSON.
///
/// This is the one durable output contract of the tool: exactly one JSON
/// document per run, diagnostics go to stderr only.
pub fn emit(report: &Report) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
