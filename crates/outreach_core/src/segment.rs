//! Decomposes result text into paragraphs, lines, and words for the staged
//! reveal. Pure; identical input always yields identical output.

/// A single animated unit. `order` is a global zero-based index assigned in
/// document order across the whole text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub order: usize,
}

/// One visual line. A line with no words is kept as vertical spacing and is
/// not animated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub words: Vec<Word>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub lines: Vec<Line>,
}

impl Paragraph {
    pub fn word_count(&self) -> usize {
        self.lines.iter().map(|line| line.words.len()).sum()
    }
}

/// Splits raw text into an ordered paragraph/line/word tree.
///
/// Paragraph boundaries are whitespace runs containing two or more newlines;
/// paragraphs that are empty after trimming are dropped entirely. Single
/// newlines split lines within a paragraph, and single ASCII spaces split
/// words within a line. Splitting happens only on ASCII space and newline,
/// so multi-byte characters inside a word are never split.
pub fn segment(raw: &str) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    let mut order = 0usize;
    for block in paragraph_blocks(raw) {
        if block.trim().is_empty() {
            continue;
        }
        let lines = block
            .split('\n')
            .map(|line| {
                let words = line
                    .split(' ')
                    .filter(|token| !token.is_empty())
                    .map(|token| {
                        let word = Word {
                            text: token.to_string(),
                            order,
                        };
                        order += 1;
                        word
                    })
                    .collect();
                Line { words }
            })
            .collect();
        paragraphs.push(Paragraph { lines });
    }
    paragraphs
}

/// Splits on whitespace runs that contain at least two newlines. Runs with a
/// single newline stay inside their block and become line breaks.
fn paragraph_blocks(raw: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut block_start = 0usize;
    let mut run_start: Option<usize> = None;
    let mut run_newlines = 0usize;

    for (idx, ch) in raw.char_indices() {
        if ch.is_ascii_whitespace() {
            if run_start.is_none() {
                run_start = Some(idx);
                run_newlines = 0;
            }
            if ch == '\n' {
                run_newlines += 1;
            }
        } else if let Some(start) = run_start.take() {
            if run_newlines >= 2 {
                blocks.push(&raw[block_start..start]);
                block_start = idx;
            }
        }
    }

    match run_start {
        // Trailing whitespace with a paragraph break: the whitespace itself
        // belongs to no block.
        Some(start) if run_newlines >= 2 => blocks.push(&raw[block_start..start]),
        _ => blocks.push(&raw[block_start..]),
    }

    blocks
}
