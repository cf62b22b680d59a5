//! HTTP client abstractions.

use glmprobe_core::SignedToken;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;

use crate::error::ProbeError;

/// Default per-attempt timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// HTTP client for probe and usage requests.
///
/// Thin wrapper over reqwest carrying the per-attempt timeout and the tool's
/// user agent. One client is built per run and owned by that run; there is
/// no pooling across runs.
#[derive(Debug, Clone)]
pub struct ProbeClient {
    inner: Client,
}

impl ProbeClient {
    /// Creates a client with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Client`] if the TLS backend cannot initialize.
    pub fn new() -> Result<Self, ProbeError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a client with a custom per-attempt timeout.
    ///
    /// The timeout bounds each candidate attempt; exceeding it fails that
    /// candidate only, not the whole probe pass.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Client`] if the TLS backend cannot initialize.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ProbeError> {
        let inner = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("glmprobe/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { inner })
    }

    fn auth_headers(token: &SignedToken) -> Result<HeaderMap, ProbeError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let bearer = format!("Bearer {token}");
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&bearer).map_err(|e| ProbeError::InvalidToken(e.to_string()))?,
        );

        Ok(headers)
    }

    /// POSTs a JSON body with bearer auth.
    ///
    /// Returns the raw response regardless of status; the caller decides
    /// what a non-2xx means.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::InvalidToken`] for an unusable token, or
    /// [`ProbeError::Client`] for transport failures (including timeout).
    pub async fn post_json<B: serde::Serialize>(
        &self,
        url: &str,
        token: &SignedToken,
        body: &B,
    ) -> Result<Response, ProbeError> {
        debug!(url = %url, "POST");
        let headers = Self::auth_headers(token)?;
        Ok(self
            .inner
            .post(url)
            .headers(headers)
            .json(body)
            .send()
            .await?)
    }

    /// GETs a URL with bearer auth.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::InvalidToken`] for an unusable token, or
    /// [`ProbeError::Client`] for transport failures (including timeout).
    pub async fn get_with_auth(
        &self,
        url: &str,
        token: &SignedToken,
    ) -> Result<Response, ProbeError> {
        debug!(url = %url, "GET");
        let headers = Self::auth_headers(token)?;
        Ok(self.inner.get(url).headers(headers).send().await?)
    }
}
