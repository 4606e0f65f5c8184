use crate::view_model::AppViewModel;

/// Monotonically increasing id for one generation attempt. Responses carry
/// the id of the attempt that issued them; anything older than the latest
/// attempt is discarded.
pub type AttemptId = u64;

/// How long the "copied" indicator stays visible after a copy action.
pub const COPY_FEEDBACK_MS: u64 = 2000;

/// Payload sent to the backend for one generation attempt. Both URLs are
/// absolute and scheme-prefixed by the time this is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub product_url: String,
    pub client_url: String,
}

/// Opaque email text returned by a successful generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub email_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationFailure {
    pub kind: FailureKind,
    pub message: String,
    /// Raw cause (response body or transport error text) kept for diagnostics.
    pub cause: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    NetworkUnreachable,
    BadStatus(u16),
    MalformedResponse,
    Unknown,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::NetworkUnreachable => write!(f, "backend unreachable"),
            FailureKind::BadStatus(code) => write!(f, "http status {code}"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::Unknown => write!(f, "unknown error"),
        }
    }
}

/// Lifecycle of the single in-flight generation request.
///
/// Exactly one phase is active at a time; transitions happen only inside
/// `update` and every transition is appended to the observable history.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestPhase {
    #[default]
    Idle,
    Probing,
    Requesting,
    Succeeded(GenerationResult),
    Failed(GenerationFailure),
    Retrying,
}

impl RequestPhase {
    pub fn tag(&self) -> PhaseTag {
        match self {
            RequestPhase::Idle => PhaseTag::Idle,
            RequestPhase::Probing => PhaseTag::Probing,
            RequestPhase::Requesting => PhaseTag::Requesting,
            RequestPhase::Succeeded(_) => PhaseTag::Succeeded,
            RequestPhase::Failed(_) => PhaseTag::Failed,
            RequestPhase::Retrying => PhaseTag::Retrying,
        }
    }
}

/// Payload-free mirror of `RequestPhase`, used for the transition history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseTag {
    Idle,
    Probing,
    Requesting,
    Succeeded,
    Failed,
    Retrying,
}

/// Input problems caught before any network activity. These never move the
/// phase machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingProductUrl,
    MissingClientUrl,
    InvalidProductUrl(String),
    InvalidClientUrl(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingProductUrl => write!(f, "product url is required"),
            ValidationError::MissingClientUrl => write!(f, "client url is required"),
            ValidationError::InvalidProductUrl(detail) => {
                write!(f, "product url is not valid: {detail}")
            }
            ValidationError::InvalidClientUrl(detail) => {
                write!(f, "client url is not valid: {detail}")
            }
        }
    }
}

/// Probe result as reported by the transport layer. Any HTTP response counts
/// as reachable; only transport-level failures count as unreachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Reachable { status: u16 },
    Unreachable { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSource {
    Probe,
    Request,
    StaleResponse,
}

/// One diagnostic line. Entries accumulate across attempts within a session
/// and are never dropped by later attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticEntry {
    pub attempt: AttemptId,
    pub source: DiagnosticSource,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    product_input: String,
    client_input: String,
    phase: RequestPhase,
    phase_history: Vec<PhaseTag>,
    attempt_seq: AttemptId,
    active_request: Option<GenerationRequest>,
    diagnostics: Vec<DiagnosticEntry>,
    validation_error: Option<ValidationError>,
    copy_feedback_until: Option<u64>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            phase: self.phase.clone(),
            product_input: self.product_input.clone(),
            client_input: self.client_input.clone(),
            validation_error: self.validation_error.clone(),
            diagnostics: self.diagnostics.clone(),
            phase_history: self.phase_history.clone(),
            copy_feedback: self.copy_feedback_until.is_some(),
            can_retry: matches!(self.phase, RequestPhase::Failed(_)),
            dirty: self.dirty,
        }
    }

    pub fn phase(&self) -> &RequestPhase {
        &self.phase
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    pub(crate) fn set_product_input(&mut self, text: String) {
        self.product_input = text;
        self.validation_error = None;
        self.mark_dirty();
    }

    pub(crate) fn set_client_input(&mut self, text: String) {
        self.client_input = text;
        self.validation_error = None;
        self.mark_dirty();
    }

    /// Builds the request from the current inputs, normalizing each URL.
    pub(crate) fn build_request(&self) -> Result<GenerationRequest, ValidationError> {
        if self.product_input.trim().is_empty() {
            return Err(ValidationError::MissingProductUrl);
        }
        if self.client_input.trim().is_empty() {
            return Err(ValidationError::MissingClientUrl);
        }
        let product_url =
            normalize_url(&self.product_input).map_err(ValidationError::InvalidProductUrl)?;
        let client_url =
            normalize_url(&self.client_input).map_err(ValidationError::InvalidClientUrl)?;
        Ok(GenerationRequest {
            product_url,
            client_url,
        })
    }

    pub(crate) fn set_validation_error(&mut self, error: ValidationError) {
        self.validation_error = Some(error);
        self.mark_dirty();
    }

    /// Registers a new attempt and returns its id. Responses from earlier
    /// attempts become stale once this has been called.
    pub(crate) fn begin_attempt(&mut self, request: GenerationRequest) -> AttemptId {
        self.attempt_seq += 1;
        self.active_request = Some(request);
        self.validation_error = None;
        self.mark_dirty();
        self.attempt_seq
    }

    pub(crate) fn is_latest_attempt(&self, attempt: AttemptId) -> bool {
        attempt == self.attempt_seq
    }

    pub(crate) fn active_request(&self) -> Option<&GenerationRequest> {
        self.active_request.as_ref()
    }

    pub(crate) fn set_phase(&mut self, phase: RequestPhase) {
        self.phase_history.push(phase.tag());
        self.phase = phase;
        self.mark_dirty();
    }

    pub(crate) fn record_probe(&mut self, attempt: AttemptId, outcome: &ProbeOutcome) {
        let detail = match outcome {
            ProbeOutcome::Reachable { status } => {
                format!("probe: backend reachable (status {status})")
            }
            ProbeOutcome::Unreachable { message } => format!("probe: {message}"),
        };
        self.push_diagnostic(attempt, DiagnosticSource::Probe, detail);
    }

    pub(crate) fn record_request_failure(
        &mut self,
        attempt: AttemptId,
        failure: &GenerationFailure,
    ) {
        let mut detail = format!("request: {}: {}", failure.kind, failure.message);
        if let Some(cause) = &failure.cause {
            detail.push_str(&format!(" (cause: {cause})"));
        }
        self.push_diagnostic(attempt, DiagnosticSource::Request, detail);
    }

    pub(crate) fn record_stale_response(&mut self, attempt: AttemptId) {
        let detail = format!(
            "stale response for attempt {attempt} discarded (latest is {})",
            self.attempt_seq
        );
        self.push_diagnostic(attempt, DiagnosticSource::StaleResponse, detail);
    }

    /// Opens the copy-feedback window, or extends the existing one. A repeat
    /// copy inside the window never starts a second indicator lifecycle.
    pub(crate) fn show_copy_feedback(&mut self, now_ms: u64) {
        self.copy_feedback_until = Some(now_ms + COPY_FEEDBACK_MS);
        self.mark_dirty();
    }

    pub(crate) fn expire_copy_feedback(&mut self, now_ms: u64) {
        if let Some(until) = self.copy_feedback_until {
            if now_ms >= until {
                self.copy_feedback_until = None;
                self.mark_dirty();
            }
        }
    }

    fn push_diagnostic(&mut self, attempt: AttemptId, source: DiagnosticSource, detail: String) {
        self.diagnostics.push(DiagnosticEntry {
            attempt,
            source,
            detail,
        });
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

/// Trims the input and prepends `https://` when no scheme is present, then
/// validates the result as an absolute URL.
pub fn normalize_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("url is empty".to_string());
    }
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    url::Url::parse(&candidate).map_err(|err| err.to_string())?;
    Ok(candidate)
}
