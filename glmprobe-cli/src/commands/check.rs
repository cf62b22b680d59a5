//! The `check` command: sign a token, probe the candidate list, report.

use std::time::Duration;

use anyhow::Result;
use clap::Args;
use glmprobe_core::{ApiCredential, ProbeCandidate, Report, report::report_timestamp};
use glmprobe_fetch::{HttpTransport, PayloadTemplate, ProbeClient, run_probe};
use tracing::debug;

use crate::commands::emit;
use crate::config;

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Endpoint bases to try, in fallback order.
    #[arg(long, value_delimiter = ',', default_values = config::DEFAULT_ENDPOINTS)]
    pub endpoints: Vec<String>,

    /// Models to try on each endpoint, in preference order.
    #[arg(long, value_delimiter = ',', default_values = config::DEFAULT_MODELS)]
    pub models: Vec<String>,

    /// Token lifetime in seconds.
    #[arg(long, default_value_t = 3600)]
    pub ttl: u64,

    /// Per-attempt timeout in seconds.
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Completion budget for the ping request.
    #[arg(long, default_value_t = 6)]
    pub max_tokens: u32,
}

impl Default for CheckArgs {
    fn default() -> Self {
        Self {
            endpoints: config::DEFAULT_ENDPOINTS.iter().map(ToString::to_string).collect(),
            models: config::DEFAULT_MODELS.iter().map(ToString::to_string).collect(),
            ttl: 3600,
            timeout: 10,
            max_tokens: 6,
        }
    }
}

/// Runs the check command end to end.
///
/// Degraded probe outcomes still produce a report and exit 0; only
/// configuration errors (bad credential, empty candidate set, broken TLS)
/// bubble up as `Err` and become exit 1.
pub async fn run(args: &CheckArgs) -> Result<()> {
    let credential = config::load_credential()?;
    let candidates = config::build_candidates(&args.endpoints, &args.models)?;

    let report = execute(&credential, &candidates, args).await?;
    emit(&report)
}

/// The probe flow with all inputs explicit, shared by `run` and tests.
pub async fn execute(
    credential: &ApiCredential,
    candidates: &[ProbeCandidate],
    args: &CheckArgs,
) -> Result<Report> {
    let token = credential.sign(args.ttl)?;
    debug!(candidates = candidates.len(), "Starting probe pass");

    let client = ProbeClient::with_timeout(Duration::from_secs(args.timeout))?;
    let transport = HttpTransport::new(client);
    let template = PayloadTemplate {
        max_tokens: args.max_tokens,
        ..PayloadTemplate::default()
    };

    let outcome = run_probe(&transport, &token, candidates, &template).await?;
    Ok(Report::from_probe(&outcome, report_timestamp()))
}

// ============================================================================
// Tests
// ============================================================================
