//! The candidate probe loop.
//!
//! Candidates are tried strictly in order, one request each, and the first
//! 2xx wins — not the "best" candidate, the first working one. Everything
//! below a success is recorded into the attempt log and absorbed; only an
//! empty candidate set is an actual error.

use async_trait::async_trait;
use glmprobe_core::{CandidateAttempt, CoreError, ProbeCandidate, ProbeOutcome, SignedToken};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::client::ProbeClient;
use crate::error::ProbeError;

// ============================================================================
// Ping Payload
// ============================================================================

/// The per-run parts of the ping request that do not vary by candidate.
#[derive(Debug, Clone)]
pub struct PayloadTemplate {
    /// User message sent to the model.
    pub prompt: String,
    /// Completion budget; kept tiny so a probe costs next to nothing.
    pub max_tokens: u32,
}

impl Default for PayloadTemplate {
    fn default() -> Self {
        Self {
            prompt: "ping".to_string(),
            max_tokens: 6,
        }
    }
}

impl PayloadTemplate {
    /// Instantiates the template for one candidate's model.
    pub fn for_model(&self, model: &str) -> ChatRequest {
        ChatRequest {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user",
                content: self.prompt.clone(),
            }],
            max_tokens: self.max_tokens,
        }
    }
}

/// A minimal chat-completion request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier.
    pub model: String,
    /// Message list; always a single user message for a probe.
    pub messages: Vec<ChatMessage>,
    /// Completion token cap.
    pub max_tokens: u32,
}

/// One chat message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Message role.
    pub role: &'static str,
    /// Message content.
    pub content: String,
}

// ============================================================================
// Transport
// ============================================================================

/// Status and body of one ping response.
#[derive(Debug, Clone)]
pub struct PingResponse {
    /// HTTP status code.
    pub status: u16,
    /// Parsed JSON body; `Null` when the body was empty or unparseable.
    pub body: serde_json::Value,
}

impl PingResponse {
    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One minimal inference request against a candidate.
///
/// The seam between the probe policy and the wire: [`run_probe`] owns
/// ordering, latency measurement, and the attempt log, while implementors
/// of this trait own a single request. Tests script responses through it.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Sends one chat-completion request to `candidate` with bearer auth.
    ///
    /// # Errors
    ///
    /// Transport-level failures (connect errors, timeouts) surface here;
    /// a served non-2xx response is an `Ok` with that status.
    async fn ping(
        &self,
        candidate: &ProbeCandidate,
        token: &SignedToken,
        request: &ChatRequest,
    ) -> Result<PingResponse, ProbeError>;
}

/// Real transport over the reqwest-backed [`ProbeClient`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: ProbeClient,
}

impl HttpTransport {
    /// Creates a transport over the given client.
    pub fn new(client: ProbeClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn ping(
        &self,
        candidate: &ProbeCandidate,
        token: &SignedToken,
        request: &ChatRequest,
    ) -> Result<PingResponse, ProbeError> {
        let response = self
            .client
            .post_json(&candidate.chat_url(), token, request)
            .await?;

        let status = response.status().as_u16();
        let body = response
            .json::<serde_json::Value>()
            .await
            .unwrap_or(serde_json::Value::Null);

        Ok(PingResponse { status, body })
    }
}

// ============================================================================
// Probe Loop
// ============================================================================

/// Walks the candidate list in order until one answers 2xx.
///
/// Per-attempt latency is measured wall-clock around the request; the
/// winning attempt's reading is what ends up on the dashboard. Failed
/// attempts are recorded and skipped past, never retried.
///
/// # Errors
///
/// Returns [`CoreError::EmptyCandidateSet`] for an empty list. Candidate
/// failures are not errors; exhaustion yields `Ok(ProbeOutcome::Failure)`.
#[instrument(skip_all, fields(candidates = candidates.len()))]
pub async fn run_probe<T: ChatTransport + ?Sized>(
    transport: &T,
    token: &SignedToken,
    candidates: &[ProbeCandidate],
    template: &PayloadTemplate,
) -> Result<ProbeOutcome, ProbeError> {
    if candidates.is_empty() {
        return Err(CoreError::EmptyCandidateSet.into());
    }

    let mut attempts = Vec::new();

    for candidate in candidates {
        debug!(endpoint = %candidate.endpoint, model = %candidate.model, "Pinging candidate");
        let request = template.for_model(&candidate.model);

        let start = Instant::now();
        let result = transport.ping(candidate, token, &request).await;
        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        match result {
            Ok(response) if response.is_success() => {
                info!(
                    endpoint = %candidate.endpoint,
                    model = %candidate.model,
                    latency_ms,
                    "Candidate reachable"
                );
                return Ok(ProbeOutcome::Success {
                    model: candidate.model.clone(),
                    endpoint: candidate.endpoint.clone(),
                    latency_ms,
                    raw_body: response.body,
                });
            }
            Ok(response) => {
                warn!(
                    endpoint = %candidate.endpoint,
                    model = %candidate.model,
                    status = response.status,
                    "Candidate rejected"
                );
                attempts.push(CandidateAttempt::http_failure(
                    candidate.clone(),
                    response.status,
                ));
            }
            Err(error) => {
                warn!(
                    endpoint = %candidate.endpoint,
                    model = %candidate.model,
                    error = %error,
                    "Candidate unreachable"
                );
                attempts.push(CandidateAttempt::transport_failure(
                    candidate.clone(),
                    &error.to_string(),
                ));
            }
        }
    }

    warn!("All candidates failed");
    Ok(ProbeOutcome::Failure { attempts })
}

// ============================================================================
// Tests
// ============================================================================
