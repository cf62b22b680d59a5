//! Real-HTTP probe behavior against a local mock server.

use std::time::Duration;

use glmprobe_core::{ApiCredential, ProbeCandidate, ProbeOutcome, SignedToken, token::sign_at};
use glmprobe_fetch::{HttpTransport, PayloadTemplate, ProbeClient, run_probe};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token() -> SignedToken {
    let cred = ApiCredential::parse("abc123.s3cr3t").unwrap();
    sign_at(&cred, 3600, 1_700_000_000_000).unwrap()
}

fn candidate(server: &MockServer, model: &str) -> ProbeCandidate {
    ProbeCandidate::new(Url::parse(&server.uri()).unwrap(), model)
}

fn transport(timeout: Duration) -> HttpTransport {
    HttpTransport::new(ProbeClient::with_timeout(timeout).unwrap())
}

#[tokio::test]
async fn probe_succeeds_and_measures_latency() {
    let server = MockServer::start().await;
    let tok = token();

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", format!("Bearer {tok}").as_str()))
        .and(body_partial_json(json!({
            "model": "glm-4.7",
            "max_tokens": 6
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"choices": [{"message": {"content": "pong"}}]}))
                .set_delay(Duration::from_millis(42)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cands = vec![candidate(&server, "glm-4.7")];
    let outcome = run_probe(
        &transport(Duration::from_secs(5)),
        &tok,
        &cands,
        &PayloadTemplate::default(),
    )
    .await
    .unwrap();

    let ProbeOutcome::Success {
        model,
        latency_ms,
        raw_body,
        ..
    } = outcome
    else {
        panic!("expected success");
    };
    assert_eq!(model, "glm-4.7");
    assert!(latency_ms >= 42, "latency {latency_ms}ms below server delay");
    assert_eq!(raw_body["choices"][0]["message"]["content"], "pong");
}

#[tokio::test]
async fn probe_falls_back_past_rejected_model() {
    let server = MockServer::start().await;

    // First model is rejected, second is served.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"model": "glm-5"})))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "no such model"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"model": "glm-4.7"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "ok"})))
        .mount(&server)
        .await;

    let cands = vec![candidate(&server, "glm-5"), candidate(&server, "glm-4.7")];
    let outcome = run_probe(
        &transport(Duration::from_secs(5)),
        &token(),
        &cands,
        &PayloadTemplate::default(),
    )
    .await
    .unwrap();

    match outcome {
        ProbeOutcome::Success { model, .. } => assert_eq!(model, "glm-4.7"),
        ProbeOutcome::Failure { .. } => panic!("expected fallback success"),
    }
}

#[tokio::test]
async fn probe_reports_exhaustion_with_status_codes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "bad token"})))
        .expect(2)
        .mount(&server)
        .await;

    let cands = vec![candidate(&server, "glm-4.7"), candidate(&server, "glm-4.5")];
    let outcome = run_probe(
        &transport(Duration::from_secs(5)),
        &token(),
        &cands,
        &PayloadTemplate::default(),
    )
    .await
    .unwrap();

    let ProbeOutcome::Failure { attempts } = &outcome else {
        panic!("expected failure");
    };
    assert_eq!(attempts.len(), 2);
    assert!(attempts.iter().all(|a| a.status_code == Some(401)));
    assert_eq!(outcome.last_status_code(), Some(401));
}

#[tokio::test]
async fn timeout_fails_one_candidate_not_the_pass() {
    let slow = MockServer::start().await;
    let fast = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "too late"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&slow)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "ok"})))
        .mount(&fast)
        .await;

    let cands = vec![candidate(&slow, "glm-4.7"), candidate(&fast, "glm-4.7")];
    let outcome = run_probe(
        &transport(Duration::from_millis(250)),
        &token(),
        &cands,
        &PayloadTemplate::default(),
    )
    .await
    .unwrap();

    let ProbeOutcome::Success { endpoint, .. } = outcome else {
        panic!("expected the fast endpoint to win");
    };
    assert_eq!(endpoint.as_str().trim_end_matches('/'), fast.uri());
}

#[tokio::test]
async fn success_with_non_json_body_still_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;

    let cands = vec![candidate(&server, "glm-4.7")];
    let outcome = run_probe(
        &transport(Duration::from_secs(5)),
        &token(),
        &cands,
        &PayloadTemplate::default(),
    )
    .await
    .unwrap();

    let ProbeOutcome::Success { raw_body, .. } = outcome else {
        panic!("expected success");
    };
    assert_eq!(raw_body, serde_json::Value::Null);
}
