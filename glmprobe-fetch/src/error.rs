//! Fetch error types.
//!
//! Note the narrow scope: a failed candidate attempt is not an error, it is
//! data in the attempt log. `ProbeError` covers only conditions that prevent
//! the probe pass from running at all.

use glmprobe_core::CoreError;
use thiserror::Error;

/// Errors raised by the probe infrastructure.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A core configuration error (e.g. empty candidate set).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// The signed token is not a valid header value.
    #[error("Invalid bearer token: {0}")]
    InvalidToken(String),
}
