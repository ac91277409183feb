//! Cleanup transforms for character-level edit scripts.
//!
//! Every transform takes the script by value and returns the cleaned-up
//! script, so callers never observe a half-modified list.

use textdiff_types::CleanupMode;

use crate::script::{common_overlap, common_suffix, merge, EditScript, Span, Tag};

/// Apply the cleanup selected by `mode`.
///
/// `edit_cost` is only consulted by [`CleanupMode::Efficiency`].
pub fn apply(script: EditScript<char>, mode: CleanupMode, edit_cost: usize) -> EditScript<char> {
    match mode {
        CleanupMode::Semantic => cleanup_semantic(script),
        CleanupMode::Efficiency => cleanup_efficiency(script, edit_cost),
        CleanupMode::None => script,
    }
}

/// Trade minimality for readability.
///
/// Equalities no longer than the edits on both sides of them are folded into
/// those edits, the remaining edits are slid onto word and line boundaries,
/// and large overlaps between a deletion and the following insertion are
/// pulled out as equalities.
pub fn cleanup_semantic(mut script: EditScript<char>) -> EditScript<char> {
    if eliminate_short_equalities(&mut script) {
        script = merge(script);
    }
    let mut script = align_to_boundaries(script);
    extract_overlaps(&mut script);
    script.retain(|span| !span.is_empty());
    script
}

/// Minimize the number of operations under an edit cost.
///
/// An equality shorter than `edit_cost` with edits of both kinds on both
/// sides, or shorter than half of `edit_cost` with three of those four, is
/// cheaper to express as a deletion plus an insertion.
pub fn cleanup_efficiency<T: Clone + PartialEq>(
    mut script: EditScript<T>,
    edit_cost: usize,
) -> EditScript<T> {
    let mut changed = false;
    let mut equalities: Vec<usize> = Vec::new();
    let mut candidate: Option<usize> = None;
    let mut before = EditSides::default();
    let mut after = EditSides::default();

    let mut i = 0;
    while i < script.len() {
        if script[i].tag == Tag::Equal {
            let len = script[i].len();
            if len < edit_cost && after.any() {
                equalities.push(i);
                before = after;
                candidate = Some(len);
            } else {
                equalities.clear();
                candidate = None;
            }
            after = EditSides::default();
        } else {
            after.mark(script[i].tag);
            if let (Some(len), Some(&at)) = (candidate, equalities.last()) {
                let sides = before.count() + after.count();
                if sides == 4 || (len * 2 < edit_cost && sides == 3) {
                    split_equality(&mut script, at);
                    equalities.pop();
                    candidate = None;
                    changed = true;
                    if before.insert && before.delete {
                        after = EditSides {
                            insert: true,
                            delete: true,
                        };
                        equalities.clear();
                    } else {
                        equalities.pop();
                        after = EditSides::default();
                        i = equalities.last().map_or(0, |&j| j + 1);
                        continue;
                    }
                }
            }
        }
        i += 1;
    }

    if changed {
        merge(script)
    } else {
        script
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct EditSides {
    insert: bool,
    delete: bool,
}

impl EditSides {
    fn mark(&mut self, tag: Tag) {
        match tag {
            Tag::Insert => self.insert = true,
            Tag::Delete => self.delete = true,
            Tag::Equal => {}
        }
    }

    fn any(&self) -> bool {
        self.insert || self.delete
    }

    fn count(&self) -> usize {
        usize::from(self.insert) + usize::from(self.delete)
    }
}

/// Replace the equality at `at` with a deletion and insertion of its text.
fn split_equality<T: Clone>(script: &mut EditScript<T>, at: usize) {
    let tokens = script[at].tokens.clone();
    script.insert(at, Span::new(Tag::Delete, tokens));
    script[at + 1].tag = Tag::Insert;
}

fn eliminate_short_equalities<T: Clone>(script: &mut EditScript<T>) -> bool {
    let mut changed = false;
    let mut equalities: Vec<usize> = Vec::new();
    let mut candidate: Option<usize> = None;
    // Inserted/deleted lengths before and after the candidate equality.
    let (mut ins_before, mut del_before) = (0usize, 0usize);
    let (mut ins_after, mut del_after) = (0usize, 0usize);

    let mut i = 0;
    while i < script.len() {
        match script[i].tag {
            Tag::Equal => {
                equalities.push(i);
                ins_before = ins_after;
                del_before = del_after;
                ins_after = 0;
                del_after = 0;
                candidate = Some(script[i].len());
            }
            tag => {
                if tag == Tag::Insert {
                    ins_after += script[i].len();
                } else {
                    del_after += script[i].len();
                }
                if let (Some(len), Some(&at)) = (candidate, equalities.last()) {
                    if len <= ins_before.max(del_before) && len <= ins_after.max(del_after) {
                        split_equality(script, at);
                        // Drop the split equality and re-evaluate the one before it.
                        equalities.pop();
                        equalities.pop();
                        ins_before = 0;
                        del_before = 0;
                        ins_after = 0;
                        del_after = 0;
                        candidate = None;
                        changed = true;
                        i = equalities.last().map_or(0, |&j| j + 1);
                        continue;
                    }
                }
            }
        }
        i += 1;
    }
    changed
}

/// Slide single edits between two equalities to the most natural boundary.
fn align_to_boundaries(mut script: EditScript<char>) -> EditScript<char> {
    let mut i = 1;
    while i + 1 < script.len() {
        if script[i - 1].tag == Tag::Equal && script[i + 1].tag == Tag::Equal {
            let mut before = script[i - 1].tokens.clone();
            let mut edit = script[i].tokens.clone();
            let mut after = script[i + 1].tokens.clone();

            // Start from the leftmost position the edit can occupy.
            let offset = common_suffix(&before, &edit);
            if offset > 0 {
                let common = edit.split_off(edit.len() - offset);
                before.truncate(before.len() - offset);
                edit.splice(0..0, common.iter().copied());
                after.splice(0..0, common);
            }

            let mut best_score = boundary_score(&before, &edit) + boundary_score(&edit, &after);
            let mut best = (before.clone(), edit.clone(), after.clone());
            while !edit.is_empty() && edit.first() == after.first() {
                let moved = edit.remove(0);
                before.push(moved);
                edit.push(after.remove(0));
                let score = boundary_score(&before, &edit) + boundary_score(&edit, &after);
                // Ties prefer the rightmost position.
                if score >= best_score {
                    best_score = score;
                    best = (before.clone(), edit.clone(), after.clone());
                }
            }

            let (best_before, best_edit, best_after) = best;
            if script[i - 1].tokens != best_before {
                script[i].tokens = best_edit;
                let after_absorbed = best_after.is_empty();
                if after_absorbed {
                    script.remove(i + 1);
                } else {
                    script[i + 1].tokens = best_after;
                }
                if best_before.is_empty() {
                    script.remove(i - 1);
                    i -= 1;
                } else {
                    script[i - 1].tokens = best_before;
                }
                if after_absorbed {
                    i = i.saturating_sub(1);
                }
            }
        }
        i += 1;
    }
    script
}

/// Score how natural the boundary between `one` and `two` is, from 6 (edge
/// of the text) down to 0 (inside a word).
fn boundary_score(one: &[char], two: &[char]) -> u8 {
    let (Some(&last), Some(&first)) = (one.last(), two.first()) else {
        return 6;
    };
    let non_alnum1 = !last.is_ascii_alphanumeric();
    let non_alnum2 = !first.is_ascii_alphanumeric();
    let space1 = non_alnum1 && last.is_whitespace();
    let space2 = non_alnum2 && first.is_whitespace();
    let break1 = space1 && matches!(last, '\r' | '\n');
    let break2 = space2 && matches!(first, '\r' | '\n');
    let blank1 = break1 && ends_with_blank_line(one);
    let blank2 = break2 && starts_with_blank_line(two);

    if blank1 || blank2 {
        5
    } else if break1 || break2 {
        4
    } else if non_alnum1 && !space1 && space2 {
        // End of a sentence.
        3
    } else if space1 || space2 {
        2
    } else if non_alnum1 || non_alnum2 {
        1
    } else {
        0
    }
}

fn ends_with_blank_line(text: &[char]) -> bool {
    text.ends_with(&['\n', '\n']) || text.ends_with(&['\n', '\r', '\n'])
}

fn starts_with_blank_line(text: &[char]) -> bool {
    let mut rest = text;
    for _ in 0..2 {
        if let Some(tail) = rest.strip_prefix(&['\r']) {
            rest = tail;
        }
        match rest.strip_prefix(&['\n']) {
            Some(tail) => rest = tail,
            None => return false,
        }
    }
    true
}

/// Split `Delete(abcxxx) Insert(xxxdef)` into
/// `Delete(abc) Equal(xxx) Insert(def)` when the overlap is at least half of
/// either side. The reverse overlap is handled symmetrically.
fn extract_overlaps<T: Clone + PartialEq>(script: &mut EditScript<T>) {
    let mut i = 1;
    while i < script.len() {
        if script[i - 1].tag == Tag::Delete && script[i].tag == Tag::Insert {
            let deletion = script[i - 1].tokens.clone();
            let insertion = script[i].tokens.clone();
            let forward = common_overlap(&deletion, &insertion);
            let backward = common_overlap(&insertion, &deletion);
            if forward >= backward {
                if forward * 2 >= deletion.len() || forward * 2 >= insertion.len() {
                    script[i - 1].tokens = deletion[..deletion.len() - forward].to_vec();
                    script[i].tokens = insertion[forward..].to_vec();
                    script.insert(i, Span::new(Tag::Equal, insertion[..forward].to_vec()));
                    i += 1;
                }
            } else if backward * 2 >= deletion.len() || backward * 2 >= insertion.len() {
                script[i - 1] = Span::new(
                    Tag::Insert,
                    insertion[..insertion.len() - backward].to_vec(),
                );
                script[i] = Span::new(Tag::Delete, deletion[backward..].to_vec());
                script.insert(i, Span::new(Tag::Equal, deletion[..backward].to_vec()));
                i += 1;
            }
            i += 1;
        }
        i += 1;
    }
}
