//! Outreach core: pure request-lifecycle state machine, text segmentation,
//! and reveal scheduling.
mod effect;
mod msg;
mod reveal;
mod segment;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use reveal::{
    schedule, RevealPlan, RevealStep, DEFAULT_DURATION_SECS, DEFAULT_STAGGER_SECS,
};
pub use segment::{segment, Line, Paragraph, Word};
pub use state::{
    normalize_url, AppState, AttemptId, DiagnosticEntry, DiagnosticSource, FailureKind,
    GenerationFailure, GenerationRequest, GenerationResult, PhaseTag, ProbeOutcome, RequestPhase,
    ValidationError, COPY_FEEDBACK_MS,
};
pub use update::update;
pub use view_model::AppViewModel;
