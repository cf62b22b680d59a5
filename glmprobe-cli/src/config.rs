//! Credential loading and candidate-set construction.
//!
//! The credential comes from the environment, checked before any other work
//! so a misconfigured scheduler job fails fast with exit 1. The candidate
//! order is whatever the flags say; the defaults reproduce the known-good
//! ranking (coding-plan base first, models in preference order).

use glmprobe_core::{ApiCredential, CoreError, ProbeCandidate};
use url::Url;

/// Environment variable holding the raw API key.
pub const CREDENTIAL_ENV: &str = "ZAI_API_KEY";

/// Default endpoint bases, in fallback order.
pub const DEFAULT_ENDPOINTS: &[&str] = &[
    "https://api.z.ai/api/coding/paas/v4",
    "https://api.z.ai/api/paas/v4",
];

/// Default models, in preference order.
pub const DEFAULT_MODELS: &[&str] = &["glm-4.7", "glm-4.5", "glm-4.5-air"];

/// Default usage-statistics endpoint.
pub const DEFAULT_USAGE_URL: &str = "https://api.z.ai/v1/usage";

/// Reads and parses the credential from the environment.
///
/// # Errors
///
/// Returns [`CoreError::InvalidConfig`] when the variable is unset and
/// [`CoreError::MalformedCredential`] when it does not split into two parts.
pub fn load_credential() -> Result<ApiCredential, CoreError> {
    let raw = std::env::var(CREDENTIAL_ENV).map_err(|_| {
        CoreError::InvalidConfig(format!("{CREDENTIAL_ENV} environment variable not set"))
    })?;
    ApiCredential::parse(&raw)
}

/// Builds the ordered candidate set as the endpoint-major cross product of
/// the two lists: every model on the first endpoint, then every model on
/// the next.
///
/// # Errors
///
/// Returns [`CoreError::InvalidConfig`] for an unparseable endpoint URL and
/// [`CoreError::EmptyCandidateSet`] when either list is empty.
pub fn build_candidates(
    endpoints: &[String],
    models: &[String],
) -> Result<Vec<ProbeCandidate>, CoreError> {
    let mut candidates = Vec::with_capacity(endpoints.len() * models.len());

    for endpoint in endpoints {
        let url = Url::parse(endpoint)
            .map_err(|e| CoreError::InvalidConfig(format!("invalid endpoint {endpoint}: {e}")))?;
        for model in models {
            candidates.push(ProbeCandidate::new(url.clone(), model.clone()));
        }
    }

    if candidates.is_empty() {
        return Err(CoreError::EmptyCandidateSet);
    }

    Ok(candidates)
}
