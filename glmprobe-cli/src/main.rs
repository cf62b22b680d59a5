// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! glmprobe CLI - health and usage probe for the z.ai GLM API.
//!
//! # Examples
//!
//! ```bash
//! # Probe the default endpoint/model candidates
//! glmprobe
//!
//! # Probe a custom candidate ranking
//! glmprobe check --endpoints https://api.z.ai/api/paas/v4 --models glm-4.7,glm-4.5
//!
//! # Query provider-side usage statistics
//! glmprobe usage
//!
//! # Print a freshly signed token for manual debugging
//! glmprobe token
//! ```
//!
//! One pretty-printed JSON report per run on stdout; diagnostics on stderr.
//! Exit 0 covers both operational and degraded reports, exit 1 means a
//! configuration error prevented producing any report.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{check, token, usage};

// ============================================================================
// CLI Definition
// ============================================================================

/// glmprobe CLI - z.ai GLM API health probe.
#[derive(Parser)]
#[command(name = "glmprobe")]
#[command(about = "Health and usage probe for the z.ai GLM API")]
#[command(long_about = r#"
glmprobe signs a short-lived token from the ZAI_API_KEY credential, pings a
ranked list of endpoint/model candidates until one answers, and prints a
dashboard-ready JSON report.

Examples:
  glmprobe                       # Probe default candidates
  glmprobe check --models glm-4.7
  glmprobe usage                 # Provider-side usage statistics
  glmprobe token                 # Sign and inspect a token
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, runs 'check' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (no diagnostics on stderr).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Probe endpoint/model candidates (default if no command specified).
    #[command(visible_alias = "c")]
    Check(check::CheckArgs),

    /// Query provider-side usage statistics.
    #[command(visible_alias = "u")]
    Usage(usage::UsageArgs),

    /// Sign a token and print its decoded claims.
    Token(token::TokenArgs),
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success, including degraded-but-reported runs.
    Success = 0,
    /// Configuration error; no report was produced.
    ConfigError = 1,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("glmprobe=debug,info")
    } else {
        EnvFilter::new("glmprobe=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Check(args)) => check::run(args).await,
        Some(Commands::Usage(args)) => usage::run(args).await,
        Some(Commands::Token(args)) => token::run(args).await,
        None => {
            // Default to the check command
            check::run(&check::CheckArgs::default()).await
        }
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(ExitCode::ConfigError as i32);
    }

    Ok(())
}
