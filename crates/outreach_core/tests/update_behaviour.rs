use std::sync::Once;

use outreach_core::{
    update, AppState, DiagnosticSource, Effect, FailureKind, GenerationFailure, GenerationResult,
    Msg, PhaseTag, ProbeOutcome, RequestPhase, ValidationError,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(outreach_logging::initialize_for_tests);
}

fn submit(state: AppState, product: &str, client: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::ProductUrlChanged(product.to_string()));
    let (state, _) = update(state, Msg::ClientUrlChanged(client.to_string()));
    update(state, Msg::SubmitClicked)
}

fn generation_ok(attempt: u64, text: &str) -> Msg {
    Msg::GenerationFinished {
        attempt,
        result: Ok(GenerationResult {
            email_text: text.to_string(),
        }),
    }
}

fn generation_err(attempt: u64, kind: FailureKind, message: &str) -> Msg {
    Msg::GenerationFinished {
        attempt,
        result: Err(GenerationFailure {
            kind,
            message: message.to_string(),
            cause: None,
        }),
    }
}

#[test]
fn submit_issues_probe_then_generation() {
    init_logging();
    let state = AppState::new();

    let (mut next, effects) = submit(state, "https://maker.example.com", "https://buyer.example.com");
    let view = next.view();

    assert_eq!(view.phase, RequestPhase::Requesting);
    assert_eq!(
        view.phase_history,
        vec![PhaseTag::Probing, PhaseTag::Requesting]
    );
    assert!(next.consume_dirty());
    match &effects[..] {
        [Effect::StartProbe { attempt: probe }, Effect::SendGeneration { attempt, request }] => {
            assert_eq!(*probe, *attempt);
            assert_eq!(request.product_url, "https://maker.example.com");
            assert_eq!(request.client_url, "https://buyer.example.com");
        }
        other => panic!("unexpected effects: {other:?}"),
    }
}

#[test]
fn submit_with_missing_url_is_validation_only() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = submit(state, "", "https://buyer.example.com");
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.phase, RequestPhase::Idle);
    assert_eq!(
        view.validation_error,
        Some(ValidationError::MissingProductUrl)
    );
    assert!(view.phase_history.is_empty());

    let (state, effects) = submit(state, "https://maker.example.com", "   ");
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.phase, RequestPhase::Idle);
    assert_eq!(view.validation_error, Some(ValidationError::MissingClientUrl));
}

#[test]
fn submit_prepends_default_scheme() {
    init_logging();
    let state = AppState::new();

    let (_state, effects) = submit(state, "maker.example.com/widget", "buyer.example.com");
    let Some(Effect::SendGeneration { request, .. }) = effects.last() else {
        panic!("expected a generation effect");
    };
    assert_eq!(request.product_url, "https://maker.example.com/widget");
    assert_eq!(request.client_url, "https://buyer.example.com");
}

#[test]
fn submit_with_unparsable_url_is_validation_only() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = submit(state, "http://", "https://buyer.example.com");
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.phase, RequestPhase::Idle);
    assert!(matches!(
        view.validation_error,
        Some(ValidationError::InvalidProductUrl(_))
    ));
}

#[test]
fn submit_ignored_while_in_flight() {
    init_logging();
    let state = AppState::new();
    let (state, _) = submit(state, "https://maker.example.com", "https://buyer.example.com");

    let (state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
    assert_eq!(state.view().phase, RequestPhase::Requesting);
    // Still attempt 1: its response is accepted.
    let (state, _) = update(state, generation_ok(1, "Hi"));
    assert_eq!(
        state.view().email_text(),
        Some("Hi"),
        "in-flight attempt must stay live after an ignored submit"
    );
}

#[test]
fn probe_failure_is_diagnostic_only() {
    init_logging();
    let state = AppState::new();
    let (state, _) = submit(state, "https://maker.example.com", "https://buyer.example.com");

    // Probe timed out, the generation call is still in flight.
    let (state, effects) = update(
        state,
        Msg::ProbeFinished {
            attempt: 1,
            outcome: ProbeOutcome::Unreachable {
                message: "health check timed out".to_string(),
            },
        },
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.phase, RequestPhase::Requesting);
    assert_eq!(view.diagnostics.len(), 1);
    assert_eq!(view.diagnostics[0].source, DiagnosticSource::Probe);

    // The generation call still succeeds.
    let (state, _) = update(state, generation_ok(1, "Hi"));
    let view = state.view();
    assert_eq!(view.email_text(), Some("Hi"));
    assert_eq!(view.diagnostics.len(), 1, "probe diagnostic is kept");
}

#[test]
fn bad_status_reaches_failed_with_message() {
    init_logging();
    let state = AppState::new();
    let (state, _) = submit(state, "https://maker.example.com", "https://buyer.example.com");

    let (state, _) = update(
        state,
        generation_err(1, FailureKind::BadStatus(503), "overloaded"),
    );
    let view = state.view();
    let failure = view.failure().expect("failed phase");
    assert_eq!(failure.kind, FailureKind::BadStatus(503));
    assert!(failure.message.contains("overloaded"));
    assert!(view.can_retry);
    assert!(view
        .diagnostics
        .iter()
        .any(|entry| entry.source == DiagnosticSource::Request
            && entry.detail.contains("overloaded")));
}

#[test]
fn malformed_response_reaches_failed() {
    init_logging();
    let state = AppState::new();
    let (state, _) = submit(state, "https://maker.example.com", "https://buyer.example.com");

    let (state, _) = update(
        state,
        generation_err(1, FailureKind::MalformedResponse, "response missing email_content"),
    );
    let failure = state.view().failure().cloned().expect("failed phase");
    assert_eq!(failure.kind, FailureKind::MalformedResponse);
}

#[test]
fn retry_after_failure_keeps_earlier_diagnostics() {
    init_logging();
    let state = AppState::new();
    let (state, _) = submit(state, "https://maker.example.com", "https://buyer.example.com");
    let (state, _) = update(
        state,
        generation_err(1, FailureKind::BadStatus(503), "overloaded"),
    );

    let (state, effects) = update(state, Msg::RetryClicked);
    assert_eq!(state.view().phase, RequestPhase::Retrying);
    match &effects[..] {
        [Effect::SendGeneration { attempt, request }] => {
            assert_eq!(*attempt, 2, "retry is a fresh attempt");
            assert_eq!(request.product_url, "https://maker.example.com");
        }
        other => panic!("retry must re-issue only the generation call: {other:?}"),
    }

    let (state, _) = update(state, generation_ok(2, "Hello again"));
    let view = state.view();
    assert_eq!(view.email_text(), Some("Hello again"));
    // The first attempt's failure stays visible next to the new outcome.
    assert!(view
        .diagnostics
        .iter()
        .any(|entry| entry.attempt == 1 && entry.detail.contains("overloaded")));
}

#[test]
fn retry_ignored_unless_failed() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = update(state, Msg::RetryClicked);
    assert!(effects.is_empty());
    assert_eq!(state.view().phase, RequestPhase::Idle);

    let (state, _) = submit(state, "https://maker.example.com", "https://buyer.example.com");
    let (state, effects) = update(state, Msg::RetryClicked);
    assert!(effects.is_empty());
    assert_eq!(state.view().phase, RequestPhase::Requesting);
}

#[test]
fn stale_response_is_discarded() {
    init_logging();
    let state = AppState::new();
    let (state, _) = submit(state, "https://maker.example.com", "https://buyer.example.com");
    let (state, _) = update(
        state,
        generation_err(1, FailureKind::NetworkUnreachable, "connection refused"),
    );
    let (state, _) = update(state, Msg::RetryClicked);

    // A late duplicate for attempt 1 arrives while attempt 2 is in flight.
    let (state, effects) = update(state, generation_ok(1, "old text"));
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.phase, RequestPhase::Retrying);
    assert!(view
        .diagnostics
        .iter()
        .any(|entry| entry.source == DiagnosticSource::StaleResponse && entry.attempt == 1));

    let (state, _) = update(state, generation_ok(2, "new text"));
    assert_eq!(state.view().email_text(), Some("new text"));
}

#[test]
fn copy_emits_clipboard_effect_with_exact_text() {
    init_logging();
    let state = AppState::new();
    let (state, _) = submit(state, "https://maker.example.com", "https://buyer.example.com");
    let (state, _) = update(state, generation_ok(1, "Hi there,\n\nBest regards"));

    let (state, effects) = update(state, Msg::CopyClicked { now_ms: 1_000 });
    assert_eq!(
        effects,
        vec![Effect::CopyToClipboard {
            text: "Hi there,\n\nBest regards".to_string(),
        }]
    );
    assert!(state.view().copy_feedback);
}

#[test]
fn copy_feedback_window_extends_instead_of_nesting() {
    init_logging();
    let state = AppState::new();
    let (state, _) = submit(state, "https://maker.example.com", "https://buyer.example.com");
    let (state, _) = update(state, generation_ok(1, "Hi"));

    let (state, _) = update(state, Msg::CopyClicked { now_ms: 1_000 });
    let (state, _) = update(state, Msg::Tick { now_ms: 2_500 });
    assert!(state.view().copy_feedback, "window runs until 3000");

    // Second copy inside the window extends the single indicator.
    let (state, _) = update(state, Msg::CopyClicked { now_ms: 2_500 });
    let (state, _) = update(state, Msg::Tick { now_ms: 3_100 });
    assert!(state.view().copy_feedback);

    let (state, _) = update(state, Msg::Tick { now_ms: 4_600 });
    assert!(!state.view().copy_feedback);
}

#[test]
fn copy_outside_succeeded_is_noop() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = update(state, Msg::CopyClicked { now_ms: 500 });
    assert!(effects.is_empty());
    assert!(!state.view().copy_feedback);
}
