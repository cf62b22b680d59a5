//! Domain models for glmprobe.
//!
//! ## Submodules
//!
//! - [`card`] - Dashboard output types (`QuotaCard`, `CardValue`)
//! - [`probe`] - Probe types (`ProbeCandidate`, `CandidateAttempt`,
//!   `ProbeOutcome`)

mod card;
mod probe;

// Re-export everything at the models level
pub use card::{CardValue, QuotaCard};
pub use probe::{CandidateAttempt, ProbeCandidate, ProbeOutcome};
