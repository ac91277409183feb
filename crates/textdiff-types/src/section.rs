//! Display sections: contiguous visible or collapsed runs of rows.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Inclusive row range identifying a section.
///
/// Expand/collapse state is keyed by range rather than by section identity,
/// so a new result with different boundaries naturally resets it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectionKey {
    pub start: usize,
    pub end: usize,
}

impl SectionKey {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of rows covered; never zero.
    pub fn row_count(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

impl FromStr for SectionKey {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypeError::InvalidSectionKey(s.to_string());
        let (start, end) = s.split_once(':').ok_or_else(invalid)?;
        let start: usize = start.trim().parse().map_err(|_| invalid())?;
        let end: usize = end.trim().parse().map_err(|_| invalid())?;
        if end < start {
            return Err(invalid());
        }
        Ok(Self { start, end })
    }
}

/// A contiguous run of rows, either always shown or collapsible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DisplaySection {
    /// Rows at or near a change.
    Visible { start_index: usize, end_index: usize },
    /// Unchanged rows far from any change.
    Collapsed {
        start_index: usize,
        end_index: usize,
        hidden_count: usize,
        expanded: bool,
    },
}

impl DisplaySection {
    pub fn visible(start_index: usize, end_index: usize) -> Self {
        DisplaySection::Visible {
            start_index,
            end_index,
        }
    }

    pub fn collapsed(start_index: usize, end_index: usize, expanded: bool) -> Self {
        DisplaySection::Collapsed {
            start_index,
            end_index,
            hidden_count: SectionKey::new(start_index, end_index).row_count(),
            expanded,
        }
    }

    pub fn key(&self) -> SectionKey {
        match *self {
            DisplaySection::Visible {
                start_index,
                end_index,
            }
            | DisplaySection::Collapsed {
                start_index,
                end_index,
                ..
            } => SectionKey::new(start_index, end_index),
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, DisplaySection::Visible { .. })
    }

    /// Returns `true` if the section's rows should be drawn inline.
    pub fn shows_rows(&self) -> bool {
        match self {
            DisplaySection::Visible { .. } => true,
            DisplaySection::Collapsed { expanded, .. } => *expanded,
        }
    }
}

/// The set of collapsed sections the user has expanded.
///
/// Owned by the presentation layer and kept across re-renders of the same
/// result; the engine only reads it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedSections {
    keys: BTreeSet<SectionKey>,
}

impl ExpandedSections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, key: SectionKey) -> bool {
        self.keys.contains(&key)
    }

    /// Flip the state of `key`, returning the new state.
    pub fn toggle(&mut self, key: SectionKey) -> bool {
        if self.keys.remove(&key) {
            false
        } else {
            self.keys.insert(key);
            true
        }
    }

    /// Forget every expanded key, e.g. when the result they refer to is
    /// discarded.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<SectionKey> for ExpandedSections {
    fn from_iter<I: IntoIterator<Item = SectionKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}
