//! The `token` command: sign a token and show its decoded claims.
//!
//! Debugging aid for credential problems: confirms the key splits, shows
//! the validity window, and prints a token that can be replayed with curl.
//! The secret half never appears in the output.

use anyhow::Result;
use clap::Args;
use glmprobe_core::token::decode_claims;
use serde::Serialize;
use serde_json::json;

use crate::config;

/// Arguments for the token command.
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token lifetime in seconds.
    #[arg(long, default_value_t = 3600)]
    pub ttl: u64,
}

/// What the token command prints.
#[derive(Debug, Serialize)]
struct TokenOutput {
    token: String,
    claims: serde_json::Value,
}

/// Runs the token command.
pub async fn run(args: &TokenArgs) -> Result<()> {
    let credential = config::load_credential()?;
    let token = credential.sign(args.ttl)?;
    let claims = decode_claims(&token)?;

    let output = TokenOutput {
        token: token.to_string(),
        claims: json!({
            "identifier": claims.identifier,
            "issued_at_ms": claims.issued_at_ms,
            "expires_at_ms": claims.expires_at_ms,
        }),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
