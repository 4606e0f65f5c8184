use crate::{AppState, Effect, Msg, RequestPhase};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ProductUrlChanged(text) => {
            state.set_product_input(text);
            Vec::new()
        }
        Msg::ClientUrlChanged(text) => {
            state.set_client_input(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // Submit is only valid when no attempt is in flight; restarting
            // from a settled phase is allowed.
            match state.phase() {
                RequestPhase::Idle | RequestPhase::Succeeded(_) | RequestPhase::Failed(_) => {}
                RequestPhase::Probing | RequestPhase::Requesting | RequestPhase::Retrying => {
                    return (state, Vec::new());
                }
            }
            match state.build_request() {
                Err(error) => {
                    // Validation failures never touch the network and never
                    // move the phase machine.
                    state.set_validation_error(error);
                    Vec::new()
                }
                Ok(request) => {
                    let attempt = state.begin_attempt(request.clone());
                    // The probe is initiated first, but the generation call
                    // does not wait on its outcome.
                    state.set_phase(RequestPhase::Probing);
                    state.set_phase(RequestPhase::Requesting);
                    vec![
                        Effect::StartProbe { attempt },
                        Effect::SendGeneration { attempt, request },
                    ]
                }
            }
        }
        Msg::RetryClicked => {
            if !matches!(state.phase(), RequestPhase::Failed(_)) {
                return (state, Vec::new());
            }
            let Some(request) = state.active_request().cloned() else {
                return (state, Vec::new());
            };
            let attempt = state.begin_attempt(request.clone());
            state.set_phase(RequestPhase::Retrying);
            // Manual retry goes straight to the generation call, no probe.
            vec![Effect::SendGeneration { attempt, request }]
        }
        Msg::ProbeFinished { attempt, outcome } => {
            // Diagnostic only; a failed probe never blocks the request.
            state.record_probe(attempt, &outcome);
            Vec::new()
        }
        Msg::GenerationFinished { attempt, result } => {
            if !state.is_latest_attempt(attempt) {
                state.record_stale_response(attempt);
                return (state, Vec::new());
            }
            match state.phase() {
                RequestPhase::Requesting | RequestPhase::Retrying => {}
                _ => return (state, Vec::new()),
            }
            match result {
                Ok(result) => state.set_phase(RequestPhase::Succeeded(result)),
                Err(failure) => {
                    state.record_request_failure(attempt, &failure);
                    state.set_phase(RequestPhase::Failed(failure));
                }
            }
            Vec::new()
        }
        Msg::CopyClicked { now_ms } => {
            let RequestPhase::Succeeded(result) = state.phase() else {
                return (state, Vec::new());
            };
            let text = result.email_text.clone();
            state.show_copy_feedback(now_ms);
            vec![Effect::CopyToClipboard { text }]
        }
        Msg::Tick { now_ms } => {
            state.expire_copy_feedback(now_ms);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
