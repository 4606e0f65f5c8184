use outreach_core::{Effect, Msg};
use outreach_engine::{BackendSettings, EngineEvent, EngineHandle};
use outreach_logging::outreach_info;

use crate::render;

/// Executes core effects against the engine and translates engine events
/// back into core messages. The engine owns its own runtime thread; this
/// type is the only place that maps between the two crates' types.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(base_url: String) -> anyhow::Result<Self> {
        let engine = EngineHandle::new(BackendSettings::new(base_url))
            .map_err(|err| anyhow::anyhow!("engine failed to start: {err}"))?;
        Ok(Self { engine })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartProbe { attempt } => {
                    outreach_info!("StartProbe attempt={attempt}");
                    self.engine.probe(attempt);
                }
                Effect::SendGeneration { attempt, request } => {
                    outreach_info!(
                        "SendGeneration attempt={} product={} client={}",
                        attempt,
                        request.product_url,
                        request.client_url
                    );
                    self.engine.generate(attempt, map_request(request));
                }
                Effect::CopyToClipboard { text } => {
                    render::print_copy(&text);
                }
            }
        }
    }

    /// Drains one pending engine event, translated to a core message.
    pub fn poll_event(&self) -> Option<Msg> {
        self.engine.try_recv().map(map_event)
    }
}

fn map_request(request: outreach_core::GenerationRequest) -> outreach_engine::GenerationRequest {
    outreach_engine::GenerationRequest {
        product_url: request.product_url,
        client_url: request.client_url,
    }
}

fn map_failure_kind(kind: outreach_engine::FailureKind) -> outreach_core::FailureKind {
    match kind {
        outreach_engine::FailureKind::NetworkUnreachable => {
            outreach_core::FailureKind::NetworkUnreachable
        }
        outreach_engine::FailureKind::BadStatus(code) => outreach_core::FailureKind::BadStatus(code),
        outreach_engine::FailureKind::MalformedResponse => {
            outreach_core::FailureKind::MalformedResponse
        }
        outreach_engine::FailureKind::Unknown => outreach_core::FailureKind::Unknown,
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ProbeFinished { attempt, outcome } => Msg::ProbeFinished {
            attempt,
            outcome: match outcome {
                outreach_engine::ProbeOutcome::Reachable { status } => {
                    outreach_core::ProbeOutcome::Reachable { status }
                }
                outreach_engine::ProbeOutcome::Unreachable { message } => {
                    outreach_core::ProbeOutcome::Unreachable { message }
                }
            },
        },
        EngineEvent::GenerationFinished { attempt, result } => Msg::GenerationFinished {
            attempt,
            result: result
                .map(|email_text| outreach_core::GenerationResult { email_text })
                .map_err(|err| outreach_core::GenerationFailure {
                    kind: map_failure_kind(err.kind),
                    message: err.message,
                    cause: err.cause,
                }),
        },
    }
}
