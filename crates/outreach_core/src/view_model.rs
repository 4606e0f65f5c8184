use crate::{DiagnosticEntry, GenerationFailure, PhaseTag, RequestPhase, ValidationError};

/// Everything the presenter needs to render one frame. Cheap snapshot of the
/// state; the presenter never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: RequestPhase,
    pub product_input: String,
    pub client_input: String,
    pub validation_error: Option<ValidationError>,
    pub diagnostics: Vec<DiagnosticEntry>,
    pub phase_history: Vec<PhaseTag>,
    pub copy_feedback: bool,
    pub can_retry: bool,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn email_text(&self) -> Option<&str> {
        match &self.phase {
            RequestPhase::Succeeded(result) => Some(&result.email_text),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&GenerationFailure> {
        match &self.phase {
            RequestPhase::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}
