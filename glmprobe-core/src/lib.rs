// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `GlmProbe` Core
//!
//! Core types and pure logic for the `glmprobe` tool.
//!
//! This crate contains everything that does not touch the network:
//!
//! - [`ApiCredential`] / [`TokenClaims`] - credential parsing and HS256
//!   token signing for the z.ai API (no round-trip required)
//! - [`ProbeCandidate`] / [`ProbeOutcome`] - the endpoint/model fallback
//!   list and the terminal result of a probe pass
//! - [`QuotaCard`] / [`Report`] - the dashboard-facing output schema
//! - [`normalize`](normalize::normalize) - tolerant conversion of arbitrary
//!   upstream JSON into quota cards
//!
//! All clock reads are injectable so the whole crate is deterministic
//! under test.

pub mod error;
pub mod models;
pub mod normalize;
pub mod report;
pub mod token;

// Re-export error type
pub use error::CoreError;

// Re-export model types
pub use models::{CandidateAttempt, CardValue, ProbeCandidate, ProbeOutcome, QuotaCard};

// Re-export token types
pub use token::{ApiCredential, SignedToken, TokenClaims};

// Re-export report type
pub use report::Report;
