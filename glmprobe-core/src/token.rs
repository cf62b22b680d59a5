//! Credential parsing and signed token generation.
//!
//! z.ai API keys have the form `<identifier>.<secret>`. Rather than sending
//! the raw key, the API expects a short-lived HS256 JWT derived from it:
//! the identifier is embedded in the claims, the secret half keys the
//! HMAC-SHA256 signature, and the header carries the provider's
//! `sign_type: SIGN` marker alongside the algorithm.
//!
//! Token generation is pure: no network, no ambient clock. [`sign_at`] takes
//! the current time as a parameter; [`ApiCredential::sign`] is the
//! system-clock convenience wrapper.

use base64::prelude::*;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;

use crate::error::CoreError;

type HmacSha256 = Hmac<Sha256>;

// ============================================================================
// Credential
// ============================================================================

/// A two-part z.ai API credential.
///
/// The raw key string is split on the first `.` into an identifier (sent in
/// the clear inside token claims) and a secret (used only as HMAC key).
#[derive(Clone)]
pub struct ApiCredential {
    identifier: String,
    secret: String,
}

impl ApiCredential {
    /// Parses a raw `<identifier>.<secret>` key string.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MalformedCredential`] when the separator is
    /// missing or either half is empty.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let (identifier, secret) = raw
            .split_once('.')
            .ok_or(CoreError::MalformedCredential)?;

        if identifier.is_empty() || secret.is_empty() {
            return Err(CoreError::MalformedCredential);
        }

        Ok(Self {
            identifier: identifier.to_string(),
            secret: secret.to_string(),
        })
    }

    /// The public identifier half of the credential.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Signs a token valid for `ttl_secs`, reading the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Serialization`] if claims encoding fails.
    pub fn sign(&self, ttl_secs: u64) -> Result<SignedToken, CoreError> {
        sign_at(self, ttl_secs, Utc::now().timestamp_millis())
    }
}

// The secret must never end up in logs or debug dumps.
impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredential")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// Claims
// ============================================================================

/// Claims embedded in every signed token.
///
/// Field names on the wire follow the provider's validator (`api_key`,
/// `timestamp`, `exp`), all times in milliseconds since epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// The identifier half of the credential.
    #[serde(rename = "api_key")]
    pub identifier: String,
    /// When the token was issued (ms since epoch).
    #[serde(rename = "timestamp")]
    pub issued_at_ms: i64,
    /// When the token expires (ms since epoch).
    #[serde(rename = "exp")]
    pub expires_at_ms: i64,
}

/// Token header. `sign_type` is the provider's signing-method indicator.
#[derive(Debug, Serialize)]
struct TokenHeader {
    alg: &'static str,
    sign_type: &'static str,
}

const TOKEN_HEADER: TokenHeader = TokenHeader {
    alg: "HS256",
    sign_type: "SIGN",
};

// ============================================================================
// Signed Token
// ============================================================================

/// An opaque signed bearer token.
///
/// Used exactly once per probe pass; never cached across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedToken(String);

impl SignedToken {
    /// The compact token string, suitable for an `Authorization: Bearer`
    /// header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Signing
// ============================================================================

/// Signs a token for `credential` at an explicit clock value.
///
/// Produces a compact `header.payload.signature` JWT where the signature is
/// HMAC-SHA256 over the first two segments, keyed by the secret half of the
/// credential. Deterministic given fixed inputs and `now_ms`.
///
/// # Errors
///
/// Returns [`CoreError::Serialization`] if the header or claims fail to
/// encode, which only happens on allocation failure in practice.
pub fn sign_at(
    credential: &ApiCredential,
    ttl_secs: u64,
    now_ms: i64,
) -> Result<SignedToken, CoreError> {
    let claims = TokenClaims {
        identifier: credential.identifier.clone(),
        issued_at_ms: now_ms,
        expires_at_ms: now_ms + i64::try_from(ttl_secs * 1000).unwrap_or(i64::MAX),
    };

    let header_b64 = BASE64_URL_SAFE_NO_PAD.encode(serde_json::to_vec(&TOKEN_HEADER)?);
    let claims_b64 = BASE64_URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);
    let signing_input = format!("{header_b64}.{claims_b64}");

    // Hmac accepts keys of any length, so new_from_slice cannot fail here.
    let mut mac = HmacSha256::new_from_slice(credential.secret.as_bytes())
        .map_err(|e| CoreError::InvalidConfig(format!("HMAC key error: {e}")))?;
    mac.update(signing_input.as_bytes());
    let signature = BASE64_URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(SignedToken(format!("{signing_input}.{signature}")))
}

/// Decodes the claims segment of a token without verifying the signature.
///
/// Diagnostic helper: the probe never needs to verify its own tokens, but
/// the `token` command and tests want to inspect what was signed.
///
/// # Errors
///
/// Returns [`CoreError::InvalidConfig`] when the token is not a three-part
/// compact JWT, or [`CoreError::Serialization`] when the payload is not
/// valid claims JSON.
pub fn decode_claims(token: &SignedToken) -> Result<TokenClaims, CoreError> {
    let mut segments = token.as_str().split('.');
    let (Some(_header), Some(payload), Some(_sig), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(CoreError::InvalidConfig(
            "token is not a compact three-segment JWT".to_string(),
        ));
    };

    let bytes = BASE64_URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| CoreError::InvalidConfig(format!("token payload is not base64: {e}")))?;

    Ok(serde_json::from_slice(&bytes)?)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn credential() -> ApiCredential {
        ApiCredential::parse("abc123.s3cr3t").unwrap()
    }

    #[test]
    fn test_parse_valid_credential() {
        let cred = credential();
        assert_eq!(cred.identifier(), "abc123");
    }

    #[test]
    fn test_parse_splits_on_first_dot() {
        // Secrets can themselves contain dots.
        let cred = ApiCredential::parse("id.se.cr.et").unwrap();
        assert_eq!(cred.identifier(), "id");
        assert_eq!(cred.secret, "se.cr.et");
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        assert!(matches!(
            ApiCredential::parse("nodothere"),
            Err(CoreError::MalformedCredential)
        ));
    }

    #[test]
    fn test_parse_rejects_empty_halves() {
        assert!(ApiCredential::parse(".secret").is_err());
        assert!(ApiCredential::parse("id.").is_err());
        assert!(ApiCredential::parse(".").is_err());
        assert!(ApiCredential::parse("").is_err());
    }

    #[test]
    fn test_ttl_is_exact() {
        let token = sign_at(&credential(), 3600, 1_700_000_000_000).unwrap();
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.issued_at_ms, 1_700_000_000_000);
        assert_eq!(claims.expires_at_ms - claims.issued_at_ms, 3600 * 1000);
    }

    #[test]
    fn test_identifier_embedded_in_claims() {
        let token = sign_at(&credential(), 60, 0).unwrap();
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.identifier, "abc123");
    }

    #[test]
    fn test_signing_is_deterministic() {
        let a = sign_at(&credential(), 60, 42).unwrap();
        let b = sign_at(&credential(), 60, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_secrets_produce_different_signatures() {
        let other = ApiCredential::parse("abc123.different").unwrap();
        let a = sign_at(&credential(), 60, 42).unwrap();
        let b = sign_at(&other, 60, 42).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_header_carries_sign_type() {
        let token = sign_at(&credential(), 60, 0).unwrap();
        let header_b64 = token.as_str().split('.').next().unwrap();
        let header: serde_json::Value =
            serde_json::from_slice(&BASE64_URL_SAFE_NO_PAD.decode(header_b64).unwrap()).unwrap();
        assert_eq!(header["alg"], "HS256");
        assert_eq!(header["sign_type"], "SIGN");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let dump = format!("{:?}", credential());
        assert!(!dump.contains("s3cr3t"));
        assert!(dump.contains("<redacted>"));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let bad = SignedToken("not-a-jwt".to_string());
        assert!(decode_claims(&bad).is_err());
    }
}
