use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use outreach_core::{update, AppState, Msg, PhaseTag};
use outreach_logging::outreach_info;

use crate::effects::EffectRunner;
use crate::render;

pub struct AppConfig {
    pub product_url: String,
    pub client_url: String,
    pub base_url: String,
}

pub fn run(config: AppConfig) -> anyhow::Result<()> {
    outreach_info!("starting against {}", config.base_url);
    let runner = EffectRunner::new(config.base_url)?;
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let quit = Arc::new(AtomicBool::new(false));
    let stdin_closed = Arc::new(AtomicBool::new(false));
    let started = Instant::now();

    spawn_tick_thread(msg_tx.clone(), started);
    spawn_input_thread(msg_tx, quit.clone(), stdin_closed.clone(), started);

    let mut state = AppState::new();
    state = dispatch(state, Msg::ProductUrlChanged(config.product_url), &runner);
    state = dispatch(state, Msg::ClientUrlChanged(config.client_url), &runner);
    state = dispatch(state, Msg::SubmitClicked, &runner);
    if let Some(error) = state.view().validation_error {
        anyhow::bail!("{error}");
    }
    println!("Generating your email...");
    state.consume_dirty();
    let mut last_phase = state.phase().tag();
    let mut last_copy_feedback = false;

    loop {
        while let Some(msg) = runner.poll_event() {
            state = dispatch(state, msg, &runner);
        }
        if let Ok(msg) = msg_rx.recv_timeout(Duration::from_millis(50)) {
            state = dispatch(state, msg, &runner);
        }

        if state.consume_dirty() {
            let view = state.view();
            let phase = view.phase.tag();
            if phase != last_phase {
                match phase {
                    PhaseTag::Succeeded => {
                        if let Some(text) = view.email_text() {
                            render::reveal_email(text);
                        }
                        render::print_success_hint(false);
                    }
                    PhaseTag::Failed => render::print_failure(&view),
                    PhaseTag::Retrying => println!("Retrying..."),
                    _ => {}
                }
                last_phase = phase;
            }
            if view.copy_feedback && !last_copy_feedback {
                render::print_success_hint(true);
            }
            last_copy_feedback = view.copy_feedback;
        }

        if quit.load(Ordering::Relaxed) {
            break;
        }
        // Non-interactive runs exit once the attempt settles.
        if stdin_closed.load(Ordering::Relaxed)
            && matches!(last_phase, PhaseTag::Succeeded | PhaseTag::Failed)
        {
            break;
        }
    }
    Ok(())
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (state, effects) = update(state, msg);
    runner.run(effects);
    state
}

fn spawn_tick_thread(msg_tx: mpsc::Sender<Msg>, started: Instant) {
    thread::spawn(move || {
        let interval = Duration::from_millis(250);
        loop {
            let now_ms = started.elapsed().as_millis() as u64;
            if msg_tx.send(Msg::Tick { now_ms }).is_err() {
                break;
            }
            thread::sleep(interval);
        }
    });
}

fn spawn_input_thread(
    msg_tx: mpsc::Sender<Msg>,
    quit: Arc<AtomicBool>,
    stdin_closed: Arc<AtomicBool>,
    started: Instant,
) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match line.trim() {
                "copy" => {
                    let now_ms = started.elapsed().as_millis() as u64;
                    let _ = msg_tx.send(Msg::CopyClicked { now_ms });
                }
                "retry" => {
                    let _ = msg_tx.send(Msg::RetryClicked);
                }
                "quit" | "q" => {
                    quit.store(true, Ordering::Relaxed);
                    return;
                }
                "" => {}
                other => println!("Unknown command '{other}' (copy, retry, quit)"),
            }
        }
        stdin_closed.store(true, Ordering::Relaxed);
    });
}
