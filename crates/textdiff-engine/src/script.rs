//! Edit scripts over arbitrary token sequences.
//!
//! Uses the `similar` crate (Myers diff algorithm) with no deadline, then
//! normalizes the raw operations into a canonical script: adjacent spans of
//! the same kind are coalesced, text shared by a paired deletion and
//! insertion is factored out into the surrounding equalities, and single
//! edits sandwiched between equalities are slid sideways when that lets two
//! equalities merge.

use std::hash::Hash;
use std::iter;
use std::mem;

use similar::{capture_diff_slices, Algorithm, DiffTag};

/// Operation of a span in an edit script.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Equal,
    Delete,
    Insert,
}

/// A run of tokens sharing one operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span<T> {
    pub tag: Tag,
    pub tokens: Vec<T>,
}

impl<T> Span<T> {
    pub fn new(tag: Tag, tokens: Vec<T>) -> Self {
        Self { tag, tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Span<char> {
    /// The span's characters as a string.
    pub fn text(&self) -> String {
        self.tokens.iter().collect()
    }
}

/// An ordered list of spans transforming one sequence into another.
pub type EditScript<T> = Vec<Span<T>>;

/// Compute the normalized edit script between two token sequences.
pub fn diff_tokens<T>(old: &[T], new: &[T]) -> EditScript<T>
where
    T: Clone + Eq + Hash + Ord,
{
    let mut raw = Vec::new();
    for op in capture_diff_slices(Algorithm::Myers, old, new) {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => raw.push(Span::new(Tag::Equal, old[old_range].to_vec())),
            DiffTag::Delete => raw.push(Span::new(Tag::Delete, old[old_range].to_vec())),
            DiffTag::Insert => raw.push(Span::new(Tag::Insert, new[new_range].to_vec())),
            DiffTag::Replace => {
                raw.push(Span::new(Tag::Delete, old[old_range].to_vec()));
                raw.push(Span::new(Tag::Insert, new[new_range].to_vec()));
            }
        }
    }
    merge(raw)
}

/// Compute the normalized edit script between two strings, one token per
/// Unicode scalar value.
pub fn diff_chars(old: &str, new: &str) -> EditScript<char> {
    let old: Vec<char> = old.chars().collect();
    let new: Vec<char> = new.chars().collect();
    diff_tokens(&old, &new)
}

/// Bring a script into canonical form.
///
/// Empty spans are dropped. Re-running `merge` on its own output is a no-op.
pub fn merge<T: Clone + PartialEq>(script: EditScript<T>) -> EditScript<T> {
    let mut merged = coalesce(script);
    while shift_single_edits(&mut merged) {
        merged = coalesce(merged);
    }
    merged
}

/// Length of the longest common prefix of `a` and `b`.
pub(crate) fn common_prefix<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Length of the longest common suffix of `a` and `b`.
pub(crate) fn common_suffix<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Length of the longest suffix of `a` that is also a prefix of `b`.
pub(crate) fn common_overlap<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let max = a.len().min(b.len());
    (1..=max)
        .rev()
        .find(|&k| a[a.len() - k..] == b[..k])
        .unwrap_or(0)
}

fn coalesce<T: PartialEq>(script: EditScript<T>) -> EditScript<T> {
    let mut out: EditScript<T> = Vec::with_capacity(script.len());
    let mut deleted: Vec<T> = Vec::new();
    let mut inserted: Vec<T> = Vec::new();

    // The trailing empty equality flushes any pending edits.
    let spans = script
        .into_iter()
        .filter(|span| !span.is_empty())
        .chain(iter::once(Span::new(Tag::Equal, Vec::new())));

    for span in spans {
        match span.tag {
            Tag::Delete => deleted.extend(span.tokens),
            Tag::Insert => inserted.extend(span.tokens),
            Tag::Equal => {
                let mut equal = span.tokens;
                if !deleted.is_empty() && !inserted.is_empty() {
                    let prefix = common_prefix(&deleted, &inserted);
                    if prefix > 0 {
                        deleted.drain(..prefix);
                        let head: Vec<T> = inserted.drain(..prefix).collect();
                        push_equal(&mut out, head);
                    }
                    let suffix = common_suffix(&deleted, &inserted);
                    if suffix > 0 {
                        deleted.truncate(deleted.len() - suffix);
                        let mut tail = inserted.split_off(inserted.len() - suffix);
                        tail.append(&mut equal);
                        equal = tail;
                    }
                }
                if !deleted.is_empty() {
                    out.push(Span::new(Tag::Delete, mem::take(&mut deleted)));
                }
                if !inserted.is_empty() {
                    out.push(Span::new(Tag::Insert, mem::take(&mut inserted)));
                }
                push_equal(&mut out, equal);
            }
        }
    }
    out
}

fn push_equal<T>(out: &mut EditScript<T>, mut tokens: Vec<T>) {
    if tokens.is_empty() {
        return;
    }
    match out.last_mut() {
        Some(last) if last.tag == Tag::Equal => last.tokens.append(&mut tokens),
        _ => out.push(Span::new(Tag::Equal, tokens)),
    }
}

/// Slide single edits surrounded by equalities so that one of the
/// equalities is absorbed, e.g. `A<BA>C` becomes `<AB>AC`.
fn shift_single_edits<T: Clone + PartialEq>(script: &mut EditScript<T>) -> bool {
    let mut changed = false;
    let mut i = 1;
    while i + 1 < script.len() {
        if script[i - 1].tag == Tag::Equal && script[i + 1].tag == Tag::Equal {
            if script[i].tokens.ends_with(&script[i - 1].tokens) {
                let before = script.remove(i - 1).tokens;
                let edit = &mut script[i - 1].tokens;
                edit.truncate(edit.len() - before.len());
                let mut shifted = before.clone();
                shifted.append(edit);
                *edit = shifted;
                let after = &mut script[i].tokens;
                let mut joined = before;
                joined.append(after);
                *after = joined;
                changed = true;
            } else if script[i].tokens.starts_with(&script[i + 1].tokens) {
                let after = script.remove(i + 1).tokens;
                script[i - 1].tokens.extend(after.iter().cloned());
                let edit = &mut script[i].tokens;
                edit.drain(..after.len());
                edit.extend(after);
                changed = true;
            }
        }
        i += 1;
    }
    changed
}
