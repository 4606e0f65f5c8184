use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::{BackendError, FailureKind, GenerationRequest, ProbeOutcome};

const GENERATE_PATH: &str = "/api/generate-email";
const HEALTH_PATH: &str = "/api/health";

/// Transport settings. The base address is always caller-supplied so the
/// client can be pointed at a mock backend in tests.
#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Generation calls run a full scrape-and-compose pipeline server-side,
    /// so this is deliberately generous.
    pub request_timeout: Duration,
    pub probe_timeout: Duration,
}

impl BackendSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            probe_timeout: Duration::from_secs(5),
        }
    }
}

/// Seam between the engine and the HTTP backend; tests drive the engine with
/// a scripted implementation.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Best-effort liveness check. Never fails the request flow.
    async fn probe(&self) -> ProbeOutcome;

    /// Issues one generation call and returns the email text.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, BackendError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: BackendSettings,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|err| BackendError::new(FailureKind::Unknown, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn probe(&self) -> ProbeOutcome {
        let result = self
            .client
            .get(self.endpoint(HEALTH_PATH))
            .timeout(self.settings.probe_timeout)
            .send()
            .await;
        match result {
            Ok(response) => ProbeOutcome::Reachable {
                status: response.status().as_u16(),
            },
            Err(err) => ProbeOutcome::Unreachable {
                message: err.to_string(),
            },
        }
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, BackendError> {
        let body = serde_json::json!({
            "product_url": request.product_url,
            "client_url": request.client_url,
        });
        let payload = serde_json::to_string(&body)
            .map_err(|err| BackendError::new(FailureKind::Unknown, err.to_string()))?;

        let response = self
            .client
            .post(self.endpoint(GENERATE_PATH))
            .timeout(self.settings.request_timeout)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            return Err(BackendError::new(
                FailureKind::BadStatus(status.as_u16()),
                status_message(&text, status.as_u16()),
            )
            .with_cause(text));
        }

        parse_email_content(&text)
    }
}

/// Validates the success body as an untrusted schema: it must be JSON with a
/// string `email_content` field; anything else is malformed.
fn parse_email_content(body: &str) -> Result<String, BackendError> {
    let value: Value = serde_json::from_str(body).map_err(|err| {
        BackendError::new(
            FailureKind::MalformedResponse,
            format!("response is not valid JSON: {err}"),
        )
        .with_cause(body)
    })?;
    match value.get("email_content").and_then(Value::as_str) {
        Some(email) => Ok(email.to_string()),
        None => Err(
            BackendError::new(FailureKind::MalformedResponse, "response missing email_content")
                .with_cause(body),
        ),
    }
}

/// Prefers the backend's own `message` field for error display, falling back
/// to the bare status line.
fn status_message(body: &str, status: u16) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .map(|message| message.to_string())
        })
        .unwrap_or_else(|| format!("backend returned status {status}"))
}

fn map_transport_error(err: reqwest::Error) -> BackendError {
    let kind = if err.is_timeout() || err.is_connect() || err.is_request() {
        FailureKind::NetworkUnreachable
    } else {
        FailureKind::Unknown
    };
    BackendError::new(kind, err.to_string())
}
