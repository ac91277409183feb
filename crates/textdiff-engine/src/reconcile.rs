//! Modify-pair reconciliation: turn a line-level edit script into two
//! aligned sequences of line records.
//!
//! A deleted line that lines up with an inserted line on the other side is
//! treated as one edited line and broken down character by character.
//! Unpaired deletions and insertions are padded with absent records on the
//! opposite side, so both sequences always have the same length.

use std::iter::Peekable;
use std::vec::IntoIter;

use textdiff_types::{CharDiff, CharKind, CleanupMode, LineKind, LineRecord};
use tracing::debug;

use crate::cleanup;
use crate::line_diff::LineOp;
use crate::script::{diff_chars, Tag};

/// Pair up the lines of `ops` into aligned original/modified records.
///
/// `mode` and `edit_cost` govern the character diff of modified pairs.
pub fn reconcile(
    ops: &[LineOp],
    mode: CleanupMode,
    edit_cost: usize,
) -> (Vec<LineRecord>, Vec<LineRecord>) {
    let (original, modified) = number_lines(ops);
    let capacity = original.len().max(modified.len());
    let mut out_original = Vec::with_capacity(capacity);
    let mut out_modified = Vec::with_capacity(capacity);
    let mut pairs = 0usize;

    let mut original: Peekable<IntoIter<LineRecord>> = original.into_iter().peekable();
    let mut modified: Peekable<IntoIter<LineRecord>> = modified.into_iter().peekable();

    loop {
        let kinds = (
            original.peek().map(|l| l.kind),
            modified.peek().map(|l| l.kind),
        );
        match kinds {
            (None, None) => break,
            (Some(LineKind::Equal), Some(LineKind::Equal)) => {
                out_original.extend(original.next());
                out_modified.extend(modified.next());
            }
            (Some(LineKind::Delete), Some(LineKind::Insert)) => {
                if let (Some(old), Some(new)) = (original.next(), modified.next()) {
                    let (old_diffs, new_diffs) =
                        char_diffs(&old.content, &new.content, mode, edit_cost);
                    out_original.push(old.into_modify(old_diffs));
                    out_modified.push(new.into_modify(new_diffs));
                    pairs += 1;
                }
            }
            (Some(LineKind::Delete), _) => {
                out_original.extend(original.next());
                out_modified.push(LineRecord::absent(LineKind::Insert));
            }
            (_, Some(LineKind::Insert)) => {
                out_original.push(LineRecord::absent(LineKind::Delete));
                out_modified.extend(modified.next());
            }
            _ => {
                // Only one side still has input: emit it unpaired and keep
                // the rows aligned.
                match original.next() {
                    Some(line) => {
                        let kind = line.kind;
                        out_original.push(line);
                        match modified.next() {
                            Some(other) => out_modified.push(other),
                            None => out_modified.push(LineRecord::absent(kind)),
                        }
                    }
                    None => {
                        if let Some(line) = modified.next() {
                            out_original.push(LineRecord::absent(line.kind));
                            out_modified.push(line);
                        }
                    }
                }
            }
        }
    }

    debug!(rows = out_original.len(), pairs, "reconciled line records");
    (out_original, out_modified)
}

/// Character-level breakdown of one modified line pair.
///
/// The original side receives the equal and deleted segments, the modified
/// side the equal and inserted ones.
pub fn char_diffs(
    original: &str,
    modified: &str,
    mode: CleanupMode,
    edit_cost: usize,
) -> (Vec<CharDiff>, Vec<CharDiff>) {
    let script = cleanup::apply(diff_chars(original, modified), mode, edit_cost);
    let mut old = Vec::new();
    let mut new = Vec::new();
    for span in script.iter().filter(|s| !s.is_empty()) {
        let text = span.text();
        match span.tag {
            Tag::Equal => {
                old.push(CharDiff::new(CharKind::Equal, text.clone()));
                new.push(CharDiff::new(CharKind::Equal, text));
            }
            Tag::Delete => old.push(CharDiff::new(CharKind::Delete, text)),
            Tag::Insert => new.push(CharDiff::new(CharKind::Insert, text)),
        }
    }
    (old, new)
}

/// Expand line runs into per-side records with running 1-based numbers.
fn number_lines(ops: &[LineOp]) -> (Vec<LineRecord>, Vec<LineRecord>) {
    let mut original = Vec::new();
    let mut modified = Vec::new();
    for op in ops {
        for line in &op.lines {
            let line = line.as_str();
            match op.tag {
                Tag::Equal => {
                    original.push(LineRecord::new(original.len() + 1, LineKind::Equal, line));
                    modified.push(LineRecord::new(modified.len() + 1, LineKind::Equal, line));
                }
                Tag::Delete => {
                    original.push(LineRecord::new(original.len() + 1, LineKind::Delete, line));
                }
                Tag::Insert => {
                    modified.push(LineRecord::new(modified.len() + 1, LineKind::Insert, line));
                }
            }
        }
    }
    (original, modified)
}
