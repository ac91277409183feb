//! Section grouping: split aligned rows into visible runs around changes
//! and collapsible runs of unchanged context.

use textdiff_types::{DisplaySection, ExpandedSections, LineRecord, SectionKey};
use tracing::debug;

/// Unchanged rows kept visible on each side of a change.
pub const DEFAULT_CONTEXT_SIZE: usize = 3;

/// Group the aligned rows of a result into display sections.
///
/// A row is visible when it lies within `context_size` rows of a changed
/// row (one that is not `Equal` or has an absent line number on either
/// side). Consecutive rows with the same visibility form one section.
/// Collapsed sections take their `expanded` flag from `expanded`.
pub fn build_sections(
    original: &[LineRecord],
    modified: &[LineRecord],
    context_size: usize,
    expanded: &ExpandedSections,
) -> Vec<DisplaySection> {
    let len = original.len().max(modified.len());
    let visible = visible_rows(original, modified, len, context_size);

    let mut sections = Vec::new();
    let mut start = 0;
    while start < len {
        let shown = visible[start];
        let end = (start..len)
            .take_while(|&i| visible[i] == shown)
            .last()
            .unwrap_or(start);
        sections.push(if shown {
            DisplaySection::visible(start, end)
        } else {
            let key = SectionKey::new(start, end);
            DisplaySection::collapsed(start, end, expanded.is_expanded(key))
        });
        start = end + 1;
    }

    debug!(rows = len, sections = sections.len(), "built display sections");
    sections
}

fn visible_rows(
    original: &[LineRecord],
    modified: &[LineRecord],
    len: usize,
    context_size: usize,
) -> Vec<bool> {
    let mut visible = vec![false; len];
    let changed = (0..len).filter(|&i| {
        original.get(i).is_some_and(LineRecord::is_changed)
            || modified.get(i).is_some_and(LineRecord::is_changed)
    });
    for i in changed {
        let lo = i.saturating_sub(context_size);
        let hi = i.saturating_add(context_size).min(len - 1);
        visible[lo..=hi].fill(true);
    }
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use textdiff_types::LineKind;

    /// Build aligned rows of `len` lines where the 1-based lines in
    /// `changed` are modified on both sides.
    fn rows(len: usize, changed: &[usize]) -> (Vec<LineRecord>, Vec<LineRecord>) {
        (1..=len)
            .map(|n| {
                let kind = if changed.contains(&n) {
                    LineKind::Modify
                } else {
                    LineKind::Equal
                };
                (
                    LineRecord::new(n, kind, format!("line {n}")),
                    LineRecord::new(n, kind, format!("line {n}")),
                )
            })
            .unzip()
    }

    fn collapsed_counts(sections: &[DisplaySection]) -> Vec<usize> {
        sections
            .iter()
            .filter_map(|s| match s {
                DisplaySection::Collapsed { hidden_count, .. } => Some(*hidden_count),
                DisplaySection::Visible { .. } => None,
            })
            .collect()
    }

    #[test]
    fn three_changes_in_thirty_one_lines() {
        let (old, new) = rows(31, &[1, 16, 31]);
        let sections = build_sections(&old, &new, DEFAULT_CONTEXT_SIZE, &ExpandedSections::new());
        assert_eq!(
            sections,
            vec![
                DisplaySection::visible(0, 3),
                DisplaySection::collapsed(4, 11, false),
                DisplaySection::visible(12, 18),
                DisplaySection::collapsed(19, 26, false),
                DisplaySection::visible(27, 30),
            ]
        );
        assert_eq!(collapsed_counts(&sections), vec![8, 8]);
    }

    #[test]
    fn expanded_flag_follows_key() {
        let (old, new) = rows(31, &[1, 16, 31]);
        let expanded: ExpandedSections = [SectionKey::new(4, 11)].into_iter().collect();
        let sections = build_sections(&old, &new, DEFAULT_CONTEXT_SIZE, &expanded);
        assert_eq!(sections[1], DisplaySection::collapsed(4, 11, true));
        assert_eq!(sections[3], DisplaySection::collapsed(19, 26, false));
    }

    #[test]
    fn stale_keys_do_not_match_new_boundaries() {
        let (old, new) = rows(31, &[1, 31]);
        let expanded: ExpandedSections = [SectionKey::new(4, 11)].into_iter().collect();
        let sections = build_sections(&old, &new, DEFAULT_CONTEXT_SIZE, &expanded);
        assert_eq!(sections[1], DisplaySection::collapsed(4, 26, false));
    }

    #[test]
    fn nearby_changes_merge_into_one_visible_section() {
        let (old, new) = rows(20, &[5, 11]);
        let sections = build_sections(&old, &new, 3, &ExpandedSections::new());
        assert_eq!(
            sections,
            vec![
                DisplaySection::collapsed(0, 0, false),
                DisplaySection::visible(1, 13),
                DisplaySection::collapsed(14, 19, false),
            ]
        );
    }

    #[test]
    fn absent_rows_count_as_changed() {
        let (mut old, new) = rows(10, &[]);
        old[9] = LineRecord::absent(LineKind::Equal);
        let sections = build_sections(&old, &new, 2, &ExpandedSections::new());
        assert_eq!(
            sections,
            vec![DisplaySection::collapsed(0, 6, false), DisplaySection::visible(7, 9)]
        );
    }

    #[test]
    fn zero_context_shows_only_changes() {
        let (old, new) = rows(5, &[3]);
        let sections = build_sections(&old, &new, 0, &ExpandedSections::new());
        assert_eq!(
            sections,
            vec![
                DisplaySection::collapsed(0, 1, false),
                DisplaySection::visible(2, 2),
                DisplaySection::collapsed(3, 4, false),
            ]
        );
    }

    #[test]
    fn no_changes_collapses_everything() {
        let (old, new) = rows(4, &[]);
        let sections = build_sections(&old, &new, 3, &ExpandedSections::new());
        assert_eq!(sections, vec![DisplaySection::collapsed(0, 3, false)]);
    }

    #[test]
    fn empty_document_has_no_sections() {
        assert!(build_sections(&[], &[], 3, &ExpandedSections::new()).is_empty());
    }

    proptest! {
        #[test]
        fn sections_tile_the_document(
            len in 1usize..80,
            changed in prop::collection::vec(1usize..80, 0..6),
            context in 0usize..5,
        ) {
            let changed: Vec<usize> = changed.into_iter().filter(|&n| n <= len).collect();
            let (old, new) = rows(len, &changed);
            let sections = build_sections(&old, &new, context, &ExpandedSections::new());

            let mut next = 0;
            for section in &sections {
                let key = section.key();
                prop_assert_eq!(key.start, next);
                next = key.end + 1;
            }
            prop_assert_eq!(next, len);

            for (a, b) in sections.iter().zip(sections.iter().skip(1)) {
                prop_assert_ne!(a.is_visible(), b.is_visible());
            }

            for i in 0..len {
                let near_change = changed
                    .iter()
                    .any(|&n| (n - 1).abs_diff(i) <= context);
                let shown = sections
                    .iter()
                    .any(|s| s.is_visible() && s.key().contains(i));
                prop_assert_eq!(near_change, shown);
            }
        }
    }
}
