use std::time::Duration;

use outreach_engine::{
    Backend, BackendSettings, FailureKind, GenerationRequest, ProbeOutcome, ReqwestBackend,
};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> GenerationRequest {
    GenerationRequest {
        product_url: "https://maker.example.com".to_string(),
        client_url: "https://buyer.example.com".to_string(),
    }
}

fn backend_for(server: &MockServer) -> ReqwestBackend {
    ReqwestBackend::new(BackendSettings::new(server.uri())).expect("client builds")
}

#[tokio::test]
async fn generate_posts_json_and_returns_email_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-email"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({
            "product_url": "https://maker.example.com",
            "client_url": "https://buyer.example.com",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "email_content": "Hi",
        })))
        .mount(&server)
        .await;

    let email = backend_for(&server)
        .generate(&request())
        .await
        .expect("generation ok");
    assert_eq!(email, "Hi");
}

#[tokio::test]
async fn generate_maps_non_2xx_to_bad_status_with_body_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-email"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(serde_json::json!({ "message": "overloaded" })),
        )
        .mount(&server)
        .await;

    let err = backend_for(&server).generate(&request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::BadStatus(503));
    assert!(err.message.contains("overloaded"));
    assert!(err.cause.is_some(), "raw body kept for diagnostics");
}

#[tokio::test]
async fn generate_maps_missing_email_content_to_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let err = backend_for(&server).generate(&request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
    assert!(err.message.contains("email_content"));
}

#[tokio::test]
async fn generate_maps_non_json_body_to_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-email"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = backend_for(&server).generate(&request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
}

#[tokio::test]
async fn generate_maps_connection_refusal_to_unreachable() {
    // Nothing listens on port 1.
    let backend =
        ReqwestBackend::new(BackendSettings::new("http://127.0.0.1:1")).expect("client builds");

    let err = backend.generate(&request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::NetworkUnreachable);
}

#[tokio::test]
async fn generate_maps_timeout_to_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-email"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("late"),
        )
        .mount(&server)
        .await;

    let mut settings = BackendSettings::new(server.uri());
    settings.request_timeout = Duration::from_millis(50);
    let backend = ReqwestBackend::new(settings).expect("client builds");

    let err = backend.generate(&request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::NetworkUnreachable);
}

#[tokio::test]
async fn probe_counts_any_http_response_as_reachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let outcome = backend_for(&server).probe().await;
    assert_eq!(outcome, ProbeOutcome::Reachable { status: 500 });
}

#[tokio::test]
async fn probe_timeout_is_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(250)))
        .mount(&server)
        .await;

    let mut settings = BackendSettings::new(server.uri());
    settings.probe_timeout = Duration::from_millis(50);
    let backend = ReqwestBackend::new(settings).expect("client builds");

    let outcome = backend.probe().await;
    assert!(matches!(outcome, ProbeOutcome::Unreachable { .. }));
}
