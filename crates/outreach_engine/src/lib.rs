//! Outreach engine: backend transport and effect execution.
mod client;
mod engine;
mod types;

pub use client::{Backend, BackendSettings, ReqwestBackend};
pub use engine::EngineHandle;
pub use types::{
    AttemptId, BackendError, EngineEvent, FailureKind, GenerationRequest, ProbeOutcome,
};
