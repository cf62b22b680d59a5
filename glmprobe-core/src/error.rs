//! Core error types for `glmprobe`.

use thiserror::Error;

/// Core error type for `glmprobe` operations.
///
/// Everything here is a configuration-class error: it prevents a report
/// from being produced at all. Per-candidate probe failures are not errors,
/// they are recorded as data in the attempt log.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Credential did not split into `<identifier>.<secret>`.
    #[error("Malformed credential: expected '<id>.<secret>' with two non-empty parts")]
    MalformedCredential,

    /// The probe candidate list was empty.
    #[error("Empty candidate set: at least one (endpoint, model) pair is required")]
    EmptyCandidateSet,

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
