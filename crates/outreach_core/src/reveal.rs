//! Assigns reveal timing to segmented text. Pure and idempotent; the
//! presenter is free to honor the delays with whatever timing mechanism its
//! environment offers.

use crate::segment::Paragraph;

/// Per-word stagger used by the default reveal.
pub const DEFAULT_STAGGER_SECS: f32 = 0.1;
/// Per-word animation duration used by the default reveal.
pub const DEFAULT_DURATION_SECS: f32 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub struct RevealStep {
    pub order: usize,
    pub delay_secs: f32,
    pub duration_secs: f32,
}

/// Timing plan for a whole document, one step per word in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RevealPlan {
    steps: Vec<RevealStep>,
}

impl RevealPlan {
    pub fn steps(&self) -> &[RevealStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Delay for a given word order. Orders are dense, so this is an index
    /// lookup; out-of-range orders yield `None`.
    pub fn delay_for(&self, order: usize) -> Option<f32> {
        self.steps.get(order).map(|step| {
            debug_assert_eq!(step.order, order);
            step.delay_secs
        })
    }
}

/// Builds the reveal plan: each word's delay is its document order times the
/// stagger, and every word shares the same duration. With a stagger of zero
/// all words reveal simultaneously, which is a valid configuration.
pub fn schedule(paragraphs: &[Paragraph], stagger_secs: f32, duration_secs: f32) -> RevealPlan {
    let mut steps = Vec::new();
    for paragraph in paragraphs {
        for line in &paragraph.lines {
            for word in &line.words {
                steps.push(RevealStep {
                    order: word.order,
                    delay_secs: word.order as f32 * stagger_secs,
                    duration_secs,
                });
            }
        }
    }
    RevealPlan { steps }
}
