//! Probe types.
//!
//! A probe pass walks an ordered list of [`ProbeCandidate`]s and ends in a
//! terminal [`ProbeOutcome`]: either the first candidate that answered with
//! a 2xx, or the full attempt log when every candidate failed.

use serde::{Deserialize, Serialize};
use url::Url;

// ============================================================================
// Candidate
// ============================================================================

/// One (endpoint, model) pair tried during a probe.
///
/// Ordering among candidates is significant: the first candidate in a set
/// is tried first, and later ones only after the previous failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeCandidate {
    /// API base URL (e.g. `https://api.z.ai/api/paas/v4`).
    pub endpoint: Url,
    /// Model identifier to ping (e.g. `glm-4.7`).
    pub model: String,
}

impl ProbeCandidate {
    /// Creates a new candidate.
    pub fn new(endpoint: Url, model: impl Into<String>) -> Self {
        Self {
            endpoint,
            model: model.into(),
        }
    }

    /// The chat-completions URL for this candidate.
    ///
    /// Joins defensively so bases with and without a trailing slash both
    /// resolve to `<base>/chat/completions`.
    pub fn chat_url(&self) -> String {
        let base = self.endpoint.as_str().trim_end_matches('/');
        format!("{base}/chat/completions")
    }
}

// ============================================================================
// Attempt Log
// ============================================================================

/// Record of one failed candidate attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateAttempt {
    /// The candidate that was tried.
    pub candidate: ProbeCandidate,
    /// Status code when the server answered, else the first line of the
    /// transport error.
    pub error_summary: String,
    /// Numeric status code, when the failure was an HTTP response.
    pub status_code: Option<u16>,
}

impl CandidateAttempt {
    /// Records a non-2xx HTTP response.
    pub fn http_failure(candidate: ProbeCandidate, status: u16) -> Self {
        Self {
            candidate,
            error_summary: status.to_string(),
            status_code: Some(status),
        }
    }

    /// Records a transport-level error (connect failure, timeout).
    ///
    /// Only the first line of the error is kept; reqwest errors can chain
    /// into multi-line dumps.
    pub fn transport_failure(candidate: ProbeCandidate, error: &str) -> Self {
        Self {
            candidate,
            error_summary: error.lines().next().unwrap_or("Error").to_string(),
            status_code: None,
        }
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// Terminal result of one probe pass. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProbeOutcome {
    /// A candidate answered 2xx.
    Success {
        /// The model that answered.
        model: String,
        /// The endpoint that answered.
        endpoint: Url,
        /// Wall-clock round trip of the successful request.
        latency_ms: u64,
        /// Response body as parsed JSON, or `Null` when unparseable.
        raw_body: serde_json::Value,
    },
    /// Every candidate failed.
    Failure {
        /// One entry per attempted candidate, in probe order.
        attempts: Vec<CandidateAttempt>,
    },
}

impl ProbeOutcome {
    /// True when the probe found a working candidate.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The last recorded status code on the failure path, if any.
    pub fn last_status_code(&self) -> Option<u16> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { attempts } => attempts.iter().rev().find_map(|a| a.status_code),
        }
    }

    /// The last recorded error summary on the failure path, if any.
    pub fn last_error_summary(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { attempts } => {
                attempts.last().map(|a| a.error_summary.as_str())
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(model: &str) -> ProbeCandidate {
        ProbeCandidate::new(
            Url::parse("https://api.z.ai/api/paas/v4").unwrap(),
            model,
        )
    }

    #[test]
    fn test_chat_url_joins_cleanly() {
        let c = candidate("glm-4.7");
        assert_eq!(
            c.chat_url(),
            "https://api.z.ai/api/paas/v4/chat/completions"
        );

        let trailing = ProbeCandidate::new(
            Url::parse("https://api.z.ai/api/paas/v4/").unwrap(),
            "glm-4.7",
        );
        assert_eq!(trailing.chat_url(), c.chat_url());
    }

    #[test]
    fn test_transport_failure_keeps_first_line() {
        let attempt = CandidateAttempt::transport_failure(
            candidate("glm-4.7"),
            "connection refused\ncaused by: os error 61",
        );
        assert_eq!(attempt.error_summary, "connection refused");
        assert_eq!(attempt.status_code, None);
    }

    #[test]
    fn test_last_status_code_prefers_latest_http_failure() {
        let outcome = ProbeOutcome::Failure {
            attempts: vec![
                CandidateAttempt::http_failure(candidate("glm-4.7"), 404),
                CandidateAttempt::transport_failure(candidate("glm-4.5"), "timed out"),
            ],
        };
        // The trailing transport failure has no code; fall back to the 404.
        assert_eq!(outcome.last_status_code(), Some(404));
        assert_eq!(outcome.last_error_summary(), Some("timed out"));
    }

    #[test]
    fn test_empty_attempt_log_has_no_summary() {
        let outcome = ProbeOutcome::Failure { attempts: vec![] };
        assert_eq!(outcome.last_status_code(), None);
        assert_eq!(outcome.last_error_summary(), None);
    }
}
