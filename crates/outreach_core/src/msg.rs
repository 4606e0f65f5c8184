#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the product URL input box.
    ProductUrlChanged(String),
    /// User edited the client URL input box.
    ClientUrlChanged(String),
    /// User submitted the current inputs for generation.
    SubmitClicked,
    /// User clicked the manual-retry affordance (only meaningful after a
    /// failure).
    RetryClicked,
    /// Transport layer finished the liveness probe for an attempt.
    ProbeFinished {
        attempt: crate::AttemptId,
        outcome: crate::ProbeOutcome,
    },
    /// Transport layer finished the generation call for an attempt.
    GenerationFinished {
        attempt: crate::AttemptId,
        result: Result<crate::GenerationResult, crate::GenerationFailure>,
    },
    /// User clicked copy; `now_ms` is the caller's monotonic clock.
    CopyClicked { now_ms: u64 },
    /// Periodic tick used to expire the copy-feedback window.
    Tick { now_ms: u64 },
    /// Fallback for placeholder wiring.
    NoOp,
}
