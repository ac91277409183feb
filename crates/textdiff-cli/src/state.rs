//! Application state for one editing/comparing session.
//!
//! Every action consumes the state and returns the next one; nothing is
//! kept in globals. The diff itself stays a pure function of the texts and
//! options.

use textdiff_engine::{build_sections, compare, CompareError, CompareOptions, Comparison};
use textdiff_types::{DiffResult, DisplaySection, ExpandedSections, SectionKey, Side};
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Edit,
    Compare,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeVariant {
    Error,
    Info,
}

/// A message shown to the user instead of a comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub variant: NoticeVariant,
}

impl Notice {
    fn identical() -> Self {
        Self {
            title: "Identical Content".into(),
            message: "The original and modified content are exactly the same. \
                      There are no differences to display."
                .into(),
            variant: NoticeVariant::Info,
        }
    }

    fn from_error(err: &CompareError) -> Self {
        match err {
            CompareError::JsonParse { side, message } => {
                let title = match side {
                    Side::Original => "JSON Parse Error - Original Text",
                    Side::Modified => "JSON Parse Error - Modified Text",
                };
                Self {
                    title: title.into(),
                    message: format!("Failed to parse the {side} text as JSON:\n\n{message}"),
                    variant: NoticeVariant::Error,
                }
            }
            other => Self {
                title: "Comparison Failed".into(),
                message: other.to_string(),
                variant: NoticeVariant::Error,
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub original_text: String,
    pub modified_text: String,
    pub options: CompareOptions,
    pub view: View,
    pub result: Option<DiffResult>,
    pub expanded: ExpandedSections,
    pub notice: Option<Notice>,
}

impl AppState {
    pub fn new(options: CompareOptions) -> Self {
        Self {
            original_text: String::new(),
            modified_text: String::new(),
            options,
            view: View::Edit,
            result: None,
            expanded: ExpandedSections::new(),
            notice: None,
        }
    }

    pub fn with_texts(self, original: impl Into<String>, modified: impl Into<String>) -> Self {
        Self {
            original_text: original.into(),
            modified_text: modified.into(),
            ..self
        }
    }

    /// Switch between editing and comparing.
    ///
    /// Entering compare mode runs the comparison; identical inputs or a JSON
    /// parse error raise a notice and leave the state in edit mode. Leaving
    /// compare mode discards the result and its expanded sections.
    pub fn toggle_mode(mut self) -> Self {
        self.expanded.clear();
        if self.view == View::Compare {
            self.view = View::Edit;
            self.result = None;
            return self;
        }
        match compare(&self.original_text, &self.modified_text, &self.options) {
            Ok(Comparison::Changed(result)) => {
                info!(
                    rows = result.len(),
                    additions = result.additions(),
                    deletions = result.deletions(),
                    modifications = result.modifications(),
                    "comparison complete"
                );
                self.view = View::Compare;
                self.result = Some(result);
                self.notice = None;
            }
            Ok(Comparison::Identical) => self.notice = Some(Notice::identical()),
            Err(err) => self.notice = Some(Notice::from_error(&err)),
        }
        self
    }

    /// Expand or collapse the section identified by `key`.
    pub fn toggle_section(mut self, key: SectionKey) -> Self {
        if self.view == View::Compare {
            self.expanded.toggle(key);
        }
        self
    }

    /// Expand every currently collapsed section.
    pub fn expand_all(mut self) -> Self {
        for section in self.sections() {
            if let DisplaySection::Collapsed { expanded: false, .. } = section {
                self.expanded.toggle(section.key());
            }
        }
        self
    }

    pub fn dismiss_notice(self) -> Self {
        Self {
            notice: None,
            ..self
        }
    }

    /// Display sections of the current result under the current expanded set.
    pub fn sections(&self) -> Vec<DisplaySection> {
        self.result
            .as_ref()
            .map(|result| {
                build_sections(
                    &result.original_lines,
                    &result.modified_lines,
                    self.options.context_size,
                    &self.expanded,
                )
            })
            .unwrap_or_default()
    }
}
