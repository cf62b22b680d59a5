//! The `usage` command: query provider-side usage statistics and normalize
//! them into quota cards.
//!
//! Unlike `check`, this flow feeds whatever the usage endpoint returns
//! through the normalizer. The endpoint's response shape is not stable
//! across plans, which is exactly what the normalizer's fallback exists for:
//! a shape we have never seen still produces a well-formed report.

use std::time::Duration;

use anyhow::Result;
use clap::Args;
use glmprobe_core::{ApiCredential, Report, normalize::normalize, report::report_timestamp};
use glmprobe_fetch::ProbeClient;
use serde_json::json;
use tracing::warn;

use crate::commands::emit;
use crate::config;

/// Arguments for the usage command.
#[derive(Debug, Args)]
pub struct UsageArgs {
    /// Usage-statistics endpoint.
    #[arg(long, default_value = config::DEFAULT_USAGE_URL)]
    pub usage_url: String,

    /// Token lifetime in seconds.
    #[arg(long, default_value_t = 3600)]
    pub ttl: u64,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,
}

/// Runs the usage command end to end.
pub async fn run(args: &UsageArgs) -> Result<()> {
    let credential = config::load_credential()?;
    let report = execute(&credential, args).await?;
    emit(&report)
}

/// The usage-query flow with all inputs explicit, shared by `run` and tests.
///
/// Upstream failures degrade into normalized error cards rather than
/// propagating; only configuration errors return `Err`.
pub async fn execute(credential: &ApiCredential, args: &UsageArgs) -> Result<Report> {
    let token = credential.sign(args.ttl)?;
    let client = ProbeClient::with_timeout(Duration::from_secs(args.timeout))?;

    let raw = match client.get_with_auth(&args.usage_url, &token).await {
        Ok(response) => {
            let status = response.status();
            if !status.is_success() {
                warn!(status = %status, "Usage endpoint returned an error status");
            }
            let text = response.text().await.unwrap_or_default();
            serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
        }
        Err(error) => {
            warn!(error = %error, "Usage query failed");
            json!({"error": error.to_string()})
        }
    };

    let cards = normalize(&raw);
    Ok(Report::from_cards(cards, report_timestamp()))
}

// ============================================================================
// Tests
// ============================================================================
