use serde::{Deserialize, Serialize};

use crate::line::{LineKind, LineRecord};

/// The outcome of one comparison that found differences.
///
/// `original_lines` and `modified_lines` always have the same length; index
/// `i` in each is the same visual row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    pub original_lines: Vec<LineRecord>,
    pub modified_lines: Vec<LineRecord>,
    /// Whether the original input ended with a line terminator.
    pub original_trailing_newline: bool,
    /// Whether the modified input ended with a line terminator.
    pub modified_trailing_newline: bool,
}

impl DiffResult {
    /// Number of aligned rows.
    pub fn len(&self) -> usize {
        self.original_lines.len()
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.original_lines.is_empty()
    }

    /// Iterate over aligned `(original, modified)` row pairs.
    pub fn rows(&self) -> impl Iterator<Item = (&LineRecord, &LineRecord)> {
        self.original_lines.iter().zip(&self.modified_lines)
    }

    /// Returns `true` if row `index` differs on either side.
    pub fn is_changed(&self, index: usize) -> bool {
        let original = self.original_lines.get(index);
        let modified = self.modified_lines.get(index);
        original.is_some_and(LineRecord::is_changed) || modified.is_some_and(LineRecord::is_changed)
    }

    /// Number of lines present only in the modified text.
    pub fn additions(&self) -> usize {
        self.modified_lines
            .iter()
            .filter(|l| l.kind == LineKind::Insert && !l.is_absent())
            .count()
    }

    /// Number of lines present only in the original text.
    pub fn deletions(&self) -> usize {
        self.original_lines
            .iter()
            .filter(|l| l.kind == LineKind::Delete && !l.is_absent())
            .count()
    }

    /// Number of rows paired as modified lines.
    pub fn modifications(&self) -> usize {
        self.original_lines
            .iter()
            .filter(|l| l.kind == LineKind::Modify)
            .count()
    }

    /// Returns `true` if exactly one side ends with a line terminator.
    pub fn trailing_newline_differs(&self) -> bool {
        self.original_trailing_newline != self.modified_trailing_newline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DiffResult {
        DiffResult {
            original_lines: vec![
                LineRecord::new(1, LineKind::Equal, "a"),
                LineRecord::new(2, LineKind::Delete, "b"),
                LineRecord::absent(LineKind::Delete),
                LineRecord::new(3, LineKind::Modify, "c"),
            ],
            modified_lines: vec![
                LineRecord::new(1, LineKind::Equal, "a"),
                LineRecord::absent(LineKind::Insert),
                LineRecord::new(2, LineKind::Insert, "x"),
                LineRecord::new(3, LineKind::Modify, "d"),
            ],
            original_trailing_newline: true,
            modified_trailing_newline: false,
        }
    }

    #[test]
    fn counters() {
        let result = sample();
        assert_eq!(result.len(), 4);
        assert_eq!(result.additions(), 1);
        assert_eq!(result.deletions(), 1);
        assert_eq!(result.modifications(), 1);
        assert!(result.trailing_newline_differs());
    }

    #[test]
    fn changed_rows() {
        let result = sample();
        assert!(!result.is_changed(0));
        assert!(result.is_changed(1));
        assert!(result.is_changed(2));
        assert!(result.is_changed(3));
        assert!(!result.is_changed(99));
    }

    #[test]
    fn empty_result() {
        let result = DiffResult::default();
        assert!(result.is_empty());
        assert_eq!(result.rows().count(), 0);
        assert!(!result.trailing_newline_differs());
    }
}
