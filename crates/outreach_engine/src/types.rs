use std::fmt;

use thiserror::Error;

/// Attempt id minted by the caller; the engine threads it through unchanged
/// so late responses can be matched against the latest attempt.
pub type AttemptId = u64;

/// Wire payload for one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub product_url: String,
    pub client_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Transport-level failure: connection refused, DNS, timeout.
    NetworkUnreachable,
    /// The backend answered with a non-2xx status.
    BadStatus(u16),
    /// A 2xx response whose body is not the expected shape.
    MalformedResponse,
    Unknown,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::NetworkUnreachable => write!(f, "backend unreachable"),
            FailureKind::BadStatus(code) => write!(f, "http status {code}"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::Unknown => write!(f, "unknown error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct BackendError {
    pub kind: FailureKind,
    pub message: String,
    /// Raw response body or transport error text, for diagnostics.
    pub cause: Option<String>,
}

impl BackendError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    pub(crate) fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }
}

/// Result of the liveness probe. Any HTTP response, success or not, means
/// the backend is reachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Reachable { status: u16 },
    Unreachable { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ProbeFinished {
        attempt: AttemptId,
        outcome: ProbeOutcome,
    },
    GenerationFinished {
        attempt: AttemptId,
        result: Result<String, BackendError>,
    },
}
