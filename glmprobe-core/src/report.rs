//! Report assembly.
//!
//! A [`Report`] is the sole externally observable artifact of a run: a
//! timestamp plus an ordered list of quota cards, always well-formed JSON
//! even when the probe failed. Assembly is total; failure outcomes become
//! degraded card content, never errors.

use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};

use crate::models::{ProbeOutcome, QuotaCard};

/// Visual reference ceiling for the latency card, in milliseconds. Not an
/// enforced threshold.
const LATENCY_REFERENCE_MS: u64 = 1000;

/// Tooltips longer than this are truncated before they reach the dashboard.
const TOOLTIP_MAX_LEN: usize = 100;

/// The final timestamped report printed to stdout.
///
/// Field names and nesting are a stable contract with downstream tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// When this report was assembled, ISO-8601 with UTC offset.
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
    /// Ordered quota cards.
    pub quotas: Vec<QuotaCard>,
}

impl Report {
    /// Assembles a report from a probe outcome at an explicit timestamp.
    ///
    /// Success yields the three fixed health cards; failure yields the
    /// degraded pair. Both paths are total.
    pub fn from_probe(outcome: &ProbeOutcome, now: DateTime<FixedOffset>) -> Self {
        let quotas = match outcome {
            ProbeOutcome::Success {
                model, latency_ms, ..
            } => operational_cards(model, *latency_ms),
            ProbeOutcome::Failure { .. } => degraded_cards(outcome),
        };

        Self {
            last_updated: format_timestamp(now),
            quotas,
        }
    }

    /// Wraps already-normalized cards (the usage-query flow).
    pub fn from_cards(quotas: Vec<QuotaCard>, now: DateTime<FixedOffset>) -> Self {
        Self {
            last_updated: format_timestamp(now),
            quotas,
        }
    }
}

/// The current local time, ready to stamp a report.
pub fn report_timestamp() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

fn format_timestamp(now: DateTime<FixedOffset>) -> String {
    now.format("%Y-%m-%dT%H:%M:%S%z").to_string()
}

fn operational_cards(model: &str, latency_ms: u64) -> Vec<QuotaCard> {
    let display_model = model.to_uppercase();
    vec![
        QuotaCard::new("API Status", "Operational")
            .with_unit("State")
            .with_tooltip(format!(
                "Verifies that your API Key is working via {model}."
            )),
        QuotaCard::new(
            "Latency",
            i64::try_from(latency_ms).unwrap_or(i64::MAX),
        )
        .with_limit(LATENCY_REFERENCE_MS)
        .with_unit("ms")
        .with_tooltip("Round-trip time to generate a response."),
        QuotaCard::new("Model Reachability", display_model.clone())
            .with_unit("Verified")
            .with_tooltip(format!(
                "Successfully connected to the {display_model} model."
            )),
    ]
}

fn degraded_cards(outcome: &ProbeOutcome) -> Vec<QuotaCard> {
    let status_text = outcome
        .last_status_code()
        .map_or_else(|| "Error".to_string(), |code| code.to_string());

    let mut error_card = QuotaCard::new("Error Message", "Check Logs").with_unit("See Console");
    if let Some(summary) = outcome.last_error_summary() {
        error_card = error_card.with_tooltip(truncate(summary, TOOLTIP_MAX_LEN));
    }

    vec![
        QuotaCard::new("API Status", "Error").with_unit(status_text),
        error_card,
    ]
}

fn truncate(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        text.to_string()
    } else {
        let mut end = max_len;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text[..end].to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
