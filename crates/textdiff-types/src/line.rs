//! Line records and character-level segments.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Line number of a row on one side of the comparison.
///
/// Rows that exist only to keep the two sides aligned (the counterpart of a
/// pure insertion or deletion) carry [`LineNumber::Absent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Option<usize>", into = "Option<usize>")]
pub enum LineNumber {
    /// A real 1-based line number.
    Present(usize),
    /// No corresponding line on this side.
    Absent,
}

impl LineNumber {
    /// Returns `true` for [`LineNumber::Absent`].
    pub fn is_absent(&self) -> bool {
        matches!(self, LineNumber::Absent)
    }

    /// The line number, if present.
    pub fn get(&self) -> Option<usize> {
        match self {
            LineNumber::Present(n) => Some(*n),
            LineNumber::Absent => None,
        }
    }
}

impl From<Option<usize>> for LineNumber {
    fn from(value: Option<usize>) -> Self {
        value.map_or(LineNumber::Absent, LineNumber::Present)
    }
}

impl From<LineNumber> for Option<usize> {
    fn from(value: LineNumber) -> Self {
        value.get()
    }
}

impl fmt::Display for LineNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineNumber::Present(n) => write!(f, "{n}"),
            LineNumber::Absent => Ok(()),
        }
    }
}

/// Classification of a line record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Equal,
    Delete,
    Insert,
    /// One half of a paired delete/insert with a character-level breakdown.
    Modify,
}

/// Classification of a character-level segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharKind {
    Equal,
    Delete,
    Insert,
}

/// A run of characters within a modified line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharDiff {
    pub kind: CharKind,
    pub text: String,
}

impl CharDiff {
    pub fn new(kind: CharKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// One aligned row on one side of a comparison.
///
/// Index `i` of the original side and index `i` of the modified side are
/// rendered as the same visual row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    pub line_number: LineNumber,
    pub kind: LineKind,
    pub content: String,
    /// Present only on [`LineKind::Modify`] records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub char_diffs: Option<Vec<CharDiff>>,
}

impl LineRecord {
    /// A record for a line with the given number and kind.
    pub fn new(line_number: usize, kind: LineKind, content: impl Into<String>) -> Self {
        Self {
            line_number: LineNumber::Present(line_number),
            kind,
            content: content.into(),
            char_diffs: None,
        }
    }

    /// A filler record standing opposite a pure insertion or deletion.
    pub fn absent(kind: LineKind) -> Self {
        Self {
            line_number: LineNumber::Absent,
            kind,
            content: String::new(),
            char_diffs: None,
        }
    }

    /// Turn this record into a [`LineKind::Modify`] record carrying `diffs`.
    pub fn into_modify(self, diffs: Vec<CharDiff>) -> Self {
        Self {
            kind: LineKind::Modify,
            char_diffs: Some(diffs),
            ..self
        }
    }

    /// Returns `true` if this row has no real line on its side.
    pub fn is_absent(&self) -> bool {
        self.line_number.is_absent()
    }

    /// Returns `true` if this record marks a difference in its row.
    pub fn is_changed(&self) -> bool {
        self.kind != LineKind::Equal || self.is_absent()
    }
}
