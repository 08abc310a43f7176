//! Line-oriented markdown subset parser.
//!
//! Each line is classified in a fixed precedence order; the first matching
//! rule wins:
//!
//! 1. Code fence (line starts with ```` ``` ````) toggles code-block mode. Inside
//!    a code block every line is kept verbatim.
//! 2. Table row (`| … |`) is accumulated until a non-table line or end of input.
//! 3. Heading `#`, `##`, `###` (a level-1 heading on the first line is the title).
//! 4. Horizontal rule (line starts with `---`).
//! 5. List item (`- `, `* ` or `1. ` after trimming).
//! 6. Any other non-empty line is a paragraph.
//! 7. An empty line is a spacer.

use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Block, Bullet};
use crate::inline::clean_inline;
use crate::table::{build_table, is_table_row};

const FENCE: &str = "```";
const RULE: &str = "---";

static NUMBERED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s+").unwrap());

/// Parse a markdown document into blocks.
///
/// Never fails. Blocks come out in the order of the lines that produced them.
/// Lines are split with [`str::lines`], so a trailing newline does not
/// produce a final empty line (and no trailing `Spacer`).
#[must_use]
pub fn parse(source: &str) -> Vec<Block> {
    let mut parser = LineParser::new();
    for line in source.lines() {
        parser.feed(line);
    }
    parser.finish()
}

/// Parser state between two lines.
///
/// Only one accumulator can be open at a time.
#[derive(Debug, Default)]
enum State {
    #[default]
    Normal,
    /// Raw lines since the opening fence.
    InCodeBlock(Vec<String>),
    /// Raw table rows, in order.
    InTable(Vec<String>),
}

/// Incremental line parser.
///
/// Feed lines one at a time with [`feed`](Self::feed), then call
/// [`finish`](Self::finish) to flush any open accumulator and take the blocks.
#[derive(Debug, Default)]
pub struct LineParser {
    state: State,
    line_index: usize,
    blocks: Vec<Block>,
}

impl LineParser {
    /// Create a parser positioned before the first line.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one source line.
    pub fn feed(&mut self, line: &str) {
        let state = std::mem::take(&mut self.state);
        self.state = step(state, line, self.line_index == 0, &mut self.blocks);
        self.line_index += 1;
    }

    /// Flush open accumulators and return the blocks.
    ///
    /// A table still open at end of input is emitted. An unterminated code
    /// fence is emitted with the lines collected so far.
    #[must_use]
    pub fn finish(mut self) -> Vec<Block> {
        match std::mem::take(&mut self.state) {
            State::Normal => {}
            State::InCodeBlock(lines) => {
                tracing::debug!(lines = lines.len(), "Unterminated code fence at end of input");
                self.blocks.push(Block::CodeBlock {
                    text: lines.join("\n"),
                });
            }
            State::InTable(rows) => self.blocks.extend(build_table(&rows).map(Block::Table)),
        }
        tracing::debug!(
            lines = self.line_index,
            blocks = self.blocks.len(),
            "Parsed markdown"
        );
        self.blocks
    }
}

/// Transition function: consume one line in `state`, push completed blocks
/// to `out` and return the next state.
fn step(state: State, line: &str, first_line: bool, out: &mut Vec<Block>) -> State {
    match state {
        State::InCodeBlock(mut lines) => {
            if line.starts_with(FENCE) {
                out.push(Block::CodeBlock {
                    text: lines.join("\n"),
                });
                State::Normal
            } else {
                lines.push(line.to_owned());
                State::InCodeBlock(lines)
            }
        }
        State::InTable(mut rows) => {
            if is_table_row(line) {
                rows.push(line.to_owned());
                return State::InTable(rows);
            }
            out.extend(build_table(&rows).map(Block::Table));
            step(State::Normal, line, first_line, out)
        }
        State::Normal => {
            if line.starts_with(FENCE) {
                return State::InCodeBlock(Vec::new());
            }
            if is_table_row(line) {
                return State::InTable(vec![line.to_owned()]);
            }
            out.push(classify(line, first_line));
            State::Normal
        }
    }
}

/// Classify a single line outside of any accumulator.
fn classify(line: &str, first_line: bool) -> Block {
    if let Some((level, rest)) = heading(line) {
        let text = clean_inline(rest.trim());
        return if level == 1 && first_line {
            Block::Title { text }
        } else {
            Block::Heading { level, text }
        };
    }

    if line.starts_with(RULE) {
        return Block::Rule;
    }

    let trimmed = line.trim();
    if let Some((bullet, rest)) = list_marker(trimmed) {
        return Block::ListItem {
            bullet,
            indent: line.chars().take_while(|c| c.is_whitespace()).count(),
            text: clean_inline(rest),
        };
    }

    if trimmed.is_empty() {
        Block::Spacer
    } else {
        Block::Paragraph {
            text: clean_inline(trimmed),
        }
    }
}

/// Match `# `, `## ` or `### ` at the very start of the line.
fn heading(line: &str) -> Option<(u8, &str)> {
    [("# ", 1), ("## ", 2), ("### ", 3)]
        .into_iter()
        .find_map(|(marker, level)| line.strip_prefix(marker).map(|rest| (level, rest)))
}

/// Match a list marker at the start of an already trimmed line.
fn list_marker(trimmed: &str) -> Option<(Bullet, &str)> {
    if let Some(rest) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
    {
        return Some((Bullet::Bulleted, rest));
    }
    NUMBERED_ITEM
        .find(trimmed)
        .map(|m| (Bullet::Numbered, &trimmed[m.end()..]))
}
