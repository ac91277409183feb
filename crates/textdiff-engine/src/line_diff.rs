//! Line-level diff: whole lines compared as atomic tokens.
//!
//! Each distinct line (terminator included) is interned to one symbol, the
//! symbol sequences are diffed, and the result is expanded back to line
//! text. A text that does not end with a terminator simply has a final line
//! without one; no empty trailing line is ever fabricated, while a genuine
//! blank final line (`"a\n\n"`) is kept.

use std::collections::HashMap;

use crate::script::{diff_tokens, Tag};

/// A run of consecutive lines sharing one operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineOp {
    pub tag: Tag,
    /// Line contents without their terminators.
    pub lines: Vec<String>,
}

impl LineOp {
    /// Number of lines in this run.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Compute the line-level edit script between two texts.
///
/// Runs appear in document order for both sides. No cleanup is applied at
/// this level.
pub fn line_diff(original: &str, modified: &str) -> Vec<LineOp> {
    let mut interner = LineInterner::default();
    let old: Vec<usize> = original
        .split_inclusive('\n')
        .map(|l| interner.intern(l))
        .collect();
    let new: Vec<usize> = modified
        .split_inclusive('\n')
        .map(|l| interner.intern(l))
        .collect();

    diff_tokens(&old, &new)
        .into_iter()
        .map(|span| LineOp {
            tag: span.tag,
            lines: span
                .tokens
                .iter()
                .map(|&symbol| strip_terminator(interner.line(symbol)).to_string())
                .collect(),
        })
        .collect()
}

fn strip_terminator(line: &str) -> &str {
    line.strip_suffix('\n').unwrap_or(line)
}

/// Maps each distinct line to a dense symbol shared by both texts.
#[derive(Default)]
struct LineInterner<'a> {
    symbols: HashMap<&'a str, usize>,
    lines: Vec<&'a str>,
}

impl<'a> LineInterner<'a> {
    fn intern(&mut self, line: &'a str) -> usize {
        if let Some(&symbol) = self.symbols.get(line) {
            return symbol;
        }
        let symbol = self.lines.len();
        self.symbols.insert(line, symbol);
        self.lines.push(line);
        symbol
    }

    fn line(&self, symbol: usize) -> &'a str {
        self.lines[symbol]
    }
}
