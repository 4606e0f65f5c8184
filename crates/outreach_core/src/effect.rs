#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue the liveness probe for an attempt. Best-effort; its outcome is
    /// diagnostic only and the generation call never waits on it.
    StartProbe { attempt: crate::AttemptId },
    /// Issue the generation call for an attempt.
    SendGeneration {
        attempt: crate::AttemptId,
        request: crate::GenerationRequest,
    },
    /// Copy the current email text to the host clipboard.
    CopyToClipboard { text: String },
}
