use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use outreach_logging::{outreach_debug, outreach_warn};

use crate::client::{Backend, BackendSettings, ReqwestBackend};
use crate::{AttemptId, BackendError, EngineEvent, GenerationRequest};

enum EngineCommand {
    Probe {
        attempt: AttemptId,
    },
    Generate {
        attempt: AttemptId,
        request: GenerationRequest,
    },
}

/// Handle to the engine's background thread. Commands are dispatched in send
/// order, each as its own task, so a probe sent before a generation call is
/// initiated first without the generation call waiting on it.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        let backend = Arc::new(ReqwestBackend::new(settings)?);
        Ok(Self::with_backend(backend))
    }

    /// Builds a handle over any backend implementation; used by tests to
    /// script outcomes without a network.
    pub fn with_backend(backend: Arc<dyn Backend>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    outreach_warn!("engine runtime failed to start: {err}");
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let backend = backend.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(backend.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn probe(&self, attempt: AttemptId) {
        let _ = self.cmd_tx.send(EngineCommand::Probe { attempt });
    }

    pub fn generate(&self, attempt: AttemptId, request: GenerationRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Generate { attempt, request });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    backend: &dyn Backend,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Probe { attempt } => {
            let outcome = backend.probe().await;
            outreach_debug!("probe finished attempt={attempt} outcome={outcome:?}");
            let _ = event_tx.send(EngineEvent::ProbeFinished { attempt, outcome });
        }
        EngineCommand::Generate { attempt, request } => {
            let result = backend.generate(&request).await;
            if let Err(err) = &result {
                outreach_warn!("generation attempt {attempt} failed: {err}");
            }
            let _ = event_tx.send(EngineEvent::GenerationFinished { attempt, result });
        }
    }
}
