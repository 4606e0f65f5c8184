//! Terminal rendering of the generated email: staged reveal, diagnostics,
//! and the copy affordance.

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use outreach_core::{
    schedule, segment, AppViewModel, RevealPlan, DEFAULT_DURATION_SECS, DEFAULT_STAGGER_SECS,
};

/// Reveals the email word by word, honoring each word's scheduled delay.
/// The plan's delays are absolute from the start of the reveal.
pub fn reveal_email(text: &str) {
    let paragraphs = segment(text);
    let plan = schedule(&paragraphs, DEFAULT_STAGGER_SECS, DEFAULT_DURATION_SECS);
    let started = Instant::now();
    let mut stdout = io::stdout();

    println!();
    for (paragraph_index, paragraph) in paragraphs.iter().enumerate() {
        if paragraph_index > 0 {
            println!();
        }
        for line in &paragraph.lines {
            for (word_index, word) in line.words.iter().enumerate() {
                wait_until(&plan, word.order, started);
                if word_index > 0 {
                    print!(" ");
                }
                print!("{}", word.text);
                let _ = stdout.flush();
            }
            println!();
        }
    }
    println!();
}

fn wait_until(plan: &RevealPlan, order: usize, started: Instant) {
    let Some(delay_secs) = plan.delay_for(order) else {
        return;
    };
    let target = Duration::from_secs_f32(delay_secs);
    let elapsed = started.elapsed();
    if target > elapsed {
        thread::sleep(target - elapsed);
    }
}

/// Terminal stand-in for a clipboard write: emits the exact email text,
/// unformatted, between markers so it can be selected verbatim.
pub fn print_copy(text: &str) {
    println!("----- copy below -----");
    println!("{text}");
    println!("----- copy above -----");
}

pub fn print_failure(view: &AppViewModel) {
    let Some(failure) = view.failure() else {
        return;
    };
    eprintln!("Generation failed: {}: {}", failure.kind, failure.message);
    if let Some(cause) = &failure.cause {
        eprintln!("  cause: {cause}");
    }
    print_diagnostics(view);
    eprintln!("Type 'retry' to try again, or 'quit' to exit.");
}

/// All accumulated diagnostics, including entries from earlier attempts.
pub fn print_diagnostics(view: &AppViewModel) {
    if view.diagnostics.is_empty() {
        return;
    }
    eprintln!("Diagnostics:");
    for entry in &view.diagnostics {
        eprintln!("  [attempt {}] {}", entry.attempt, entry.detail);
    }
}

pub fn print_success_hint(copy_feedback: bool) {
    if copy_feedback {
        println!("Copied!");
    } else {
        println!("Type 'copy' to print the email for copying, or 'quit' to exit.");
    }
}
