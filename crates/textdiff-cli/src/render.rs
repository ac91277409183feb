//! Presentation model and terminal output for a comparison.
//!
//! [`rows`] turns a result plus its display sections into the rows a viewer
//! draws; [`format_rows`] lays them out side by side for the terminal.

use colored::{ColoredString, Colorize};
use serde::Serialize;
use textdiff_types::{
    CharKind, DiffResult, DisplaySection, LineKind, LineNumber, LineRecord, SectionKey, Side,
};

const NUMBER_WIDTH: usize = 5;
const MAX_COLUMN_WIDTH: usize = 72;

/// Highlight class of one side of a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineClass {
    Plain,
    Empty,
    Delete,
    Insert,
    ModifyDelete,
    ModifyInsert,
}

/// Highlight class of a character segment inside a modified line.
///
/// Equal text is shown on both sides; on the original side it marks where
/// the insertion lands and on the modified side where the deletion was.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentClass {
    Delete,
    Insert,
    InsertMarker,
    DeleteMarker,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment<'a> {
    pub class: SegmentClass,
    pub text: &'a str,
}

/// One side of a line row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell<'a> {
    pub number: LineNumber,
    pub class: LineClass,
    pub gutter: &'static str,
    pub segments: Vec<Segment<'a>>,
    pub content: &'a str,
}

impl<'a> Cell<'a> {
    fn new(line: &'a LineRecord, side: Side) -> Self {
        let class = match (line.kind, side) {
            _ if line.is_absent() => LineClass::Empty,
            (LineKind::Equal, _) => LineClass::Plain,
            (LineKind::Delete, _) => LineClass::Delete,
            (LineKind::Insert, _) => LineClass::Insert,
            (LineKind::Modify, Side::Original) => LineClass::ModifyDelete,
            (LineKind::Modify, Side::Modified) => LineClass::ModifyInsert,
        };
        let gutter = match class {
            LineClass::Delete | LineClass::ModifyDelete => "-",
            LineClass::Insert | LineClass::ModifyInsert => "+",
            LineClass::Plain | LineClass::Empty => "",
        };
        let segments = line
            .char_diffs
            .iter()
            .flatten()
            .map(|diff| Segment {
                class: segment_class(diff.kind, side),
                text: &diff.text,
            })
            .collect();
        Self {
            number: line.line_number,
            class,
            gutter,
            segments,
            content: &line.content,
        }
    }

    fn width(&self) -> usize {
        if self.segments.is_empty() {
            self.content.chars().count()
        } else {
            self.segments.iter().map(|s| s.text.chars().count()).sum()
        }
    }
}

fn segment_class(kind: CharKind, side: Side) -> SegmentClass {
    match (kind, side) {
        (CharKind::Equal, Side::Original) => SegmentClass::InsertMarker,
        (CharKind::Equal, Side::Modified) => SegmentClass::DeleteMarker,
        (CharKind::Delete, _) => SegmentClass::Delete,
        (CharKind::Insert, _) => SegmentClass::Insert,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Row<'a> {
    Line {
        original: Cell<'a>,
        modified: Cell<'a>,
    },
    /// Header of a collapsible run; its lines follow only when expanded.
    Collapsed {
        key: SectionKey,
        hidden_count: usize,
        expanded: bool,
    },
    TrailingNewline {
        original_present: bool,
        modified_present: bool,
    },
}

/// Build the rows for `result` as grouped by `sections`.
///
/// The trailing-newline row is only emitted when the two sides disagree.
pub fn rows<'a>(result: &'a DiffResult, sections: &[DisplaySection]) -> Vec<Row<'a>> {
    let mut out = Vec::with_capacity(result.len() + sections.len() + 1);
    for section in sections {
        if let DisplaySection::Collapsed {
            hidden_count,
            expanded,
            ..
        } = *section
        {
            out.push(Row::Collapsed {
                key: section.key(),
                hidden_count,
                expanded,
            });
        }
        if !section.shows_rows() {
            continue;
        }
        let key = section.key();
        let lines = result.rows().skip(key.start).take(key.row_count());
        out.extend(lines.map(|(old, new)| Row::Line {
            original: Cell::new(old, Side::Original),
            modified: Cell::new(new, Side::Modified),
        }));
    }
    if result.trailing_newline_differs() {
        out.push(Row::TrailingNewline {
            original_present: result.original_trailing_newline,
            modified_present: result.modified_trailing_newline,
        });
    }
    out
}

pub fn trailing_newline_text(present: bool) -> &'static str {
    if present {
        "New line at end of text"
    } else {
        "No new line at end of text"
    }
}

/// Lay out rows side by side, original on the left.
pub fn format_rows(rows: &[Row<'_>]) -> String {
    let column = rows
        .iter()
        .filter_map(|row| match row {
            Row::Line { original, .. } => Some(original.width()),
            Row::TrailingNewline { .. } => Some(trailing_newline_text(false).len()),
            Row::Collapsed { .. } => None,
        })
        .max()
        .unwrap_or(0)
        .min(MAX_COLUMN_WIDTH);

    let mut out = String::new();
    for row in rows {
        match row {
            Row::Line { original, modified } => {
                out.push_str(&format_cell(original, column));
                out.push_str(&" │ ".dimmed().to_string());
                out.push_str(&format_cell(modified, 0));
            }
            Row::Collapsed {
                key,
                hidden_count,
                expanded,
            } => {
                let noun = if *hidden_count == 1 { "line" } else { "lines" };
                let text = if *expanded {
                    format!("▾ {hidden_count} unchanged {noun} ({key})")
                } else {
                    format!("⋯ {hidden_count} unchanged {noun} hidden (--expand {key})")
                };
                out.push_str(&text.cyan().to_string());
            }
            Row::TrailingNewline {
                original_present,
                modified_present,
            } => {
                let left = trailing_newline_text(*original_present);
                let right = trailing_newline_text(*modified_present);
                let blank = " ".repeat(NUMBER_WIDTH + 3);
                out.push_str(&blank);
                out.push_str(&left.italic().to_string());
                out.push_str(&pad(left.chars().count(), column));
                out.push_str(&" │ ".dimmed().to_string());
                out.push_str(&blank);
                out.push_str(&right.italic().to_string());
            }
        }
        out.push('\n');
    }
    out
}

fn format_cell(cell: &Cell<'_>, column: usize) -> String {
    let mut out = format!("{:>width$} ", cell.number.to_string(), width = NUMBER_WIDTH)
        .dimmed()
        .to_string();
    let gutter = format!("{:1} ", cell.gutter);
    out.push_str(&match cell.class {
        LineClass::Delete | LineClass::ModifyDelete => gutter.red().to_string(),
        LineClass::Insert | LineClass::ModifyInsert => gutter.green().to_string(),
        LineClass::Plain | LineClass::Empty => gutter,
    });
    if cell.segments.is_empty() {
        out.push_str(&paint_line(cell.class, cell.content).to_string());
    } else {
        for segment in &cell.segments {
            out.push_str(&paint_segment(segment).to_string());
        }
    }
    out.push_str(&pad(cell.width(), column));
    out
}

fn paint_line(class: LineClass, text: &str) -> ColoredString {
    match class {
        LineClass::Delete | LineClass::ModifyDelete => text.red(),
        LineClass::Insert | LineClass::ModifyInsert => text.green(),
        LineClass::Plain | LineClass::Empty => text.normal(),
    }
}

fn paint_segment(segment: &Segment<'_>) -> ColoredString {
    match segment.class {
        SegmentClass::Delete => segment.text.red().bold().underline(),
        SegmentClass::Insert => segment.text.green().bold().underline(),
        SegmentClass::InsertMarker => segment.text.red(),
        SegmentClass::DeleteMarker => segment.text.green(),
    }
}

fn pad(width: usize, column: usize) -> String {
    " ".repeat(column.saturating_sub(width))
}

/// One-line change summary.
pub fn summary(result: &DiffResult) -> String {
    let plural = |n: usize, word: &str| {
        if n == 1 {
            format!("{n} {word}")
        } else {
            format!("{n} {word}s")
        }
    };
    format!(
        "{}, {}, {}",
        plural(result.additions(), "addition"),
        plural(result.deletions(), "deletion"),
        plural(result.modifications(), "modification"),
    )
}

/// Machine-readable comparison report.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub identical: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<&'a DiffResult>,
    pub sections: Vec<DisplaySection>,
}

impl<'a> Report<'a> {
    pub fn identical() -> Self {
        Self {
            identical: true,
            result: None,
            sections: Vec::new(),
        }
    }

    pub fn changed(result: &'a DiffResult, sections: Vec<DisplaySection>) -> Self {
        Self {
            identical: false,
            result: Some(result),
            sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textdiff_engine::{build_sections, compare, CompareOptions};
    use textdiff_types::ExpandedSections;

    fn diff(original: &str, modified: &str) -> DiffResult {
        compare(original, modified, &CompareOptions::default())
            .unwrap()
            .into_result()
            .unwrap()
    }

    fn all_rows(result: &DiffResult) -> Vec<Row<'_>> {
        let sections = build_sections(
            &result.original_lines,
            &result.modified_lines,
            3,
            &ExpandedSections::new(),
        );
        rows(result, &sections)
    }

    #[test]
    fn modify_row_classes_and_gutters() {
        let result = diff("a\ncat\n", "a\nmat\n");
        let line_rows = all_rows(&result);
        let Row::Line { original, modified } = &line_rows[1] else {
            panic!("expected line row");
        };
        assert_eq!(original.class, LineClass::ModifyDelete);
        assert_eq!(modified.class, LineClass::ModifyInsert);
        assert_eq!(original.gutter, "-");
        assert_eq!(modified.gutter, "+");
        assert_eq!(
            original.segments[0],
            Segment {
                class: SegmentClass::Delete,
                text: "c",
            }
        );
        assert_eq!(
            modified.segments[0],
            Segment {
                class: SegmentClass::Insert,
                text: "m",
            }
        );
        assert_eq!(original.segments[1].class, SegmentClass::InsertMarker);
        assert_eq!(modified.segments[1].class, SegmentClass::DeleteMarker);
    }

    #[test]
    fn pure_insert_has_empty_opposite_cell() {
        let result = diff("a\n", "a\nb\n");
        let line_rows = all_rows(&result);
        let Row::Line { original, modified } = &line_rows[1] else {
            panic!("expected line row");
        };
        assert_eq!(original.class, LineClass::Empty);
        assert_eq!(original.gutter, "");
        assert_eq!(original.number.to_string(), "");
        assert_eq!(modified.class, LineClass::Insert);
        assert_eq!(modified.gutter, "+");
    }

    #[test]
    fn trailing_newline_row_only_when_flags_differ() {
        let result = diff("Line 1\n", "Line 1");
        let line_rows = all_rows(&result);
        assert_eq!(
            line_rows.last(),
            Some(&Row::TrailingNewline {
                original_present: true,
                modified_present: false,
            })
        );

        let result = diff("a\n", "b\n");
        assert!(!all_rows(&result).iter().any(|r| matches!(r, Row::TrailingNewline { .. })));
    }

    #[test]
    fn collapsed_sections_hide_their_lines() {
        let original: Vec<String> = (1..=20).map(|n| format!("line {n}")).collect();
        let mut modified = original.clone();
        modified[19] = "last".into();
        let result = diff(&original.join("\n"), &modified.join("\n"));
        let collapsed_rows = all_rows(&result);
        assert_eq!(
            collapsed_rows[0],
            Row::Collapsed {
                key: SectionKey::new(0, 15),
                hidden_count: 16,
                expanded: false,
            }
        );
        assert_eq!(collapsed_rows.len(), 1 + 4);

        let expanded: ExpandedSections = [SectionKey::new(0, 15)].into_iter().collect();
        let sections = build_sections(&result.original_lines, &result.modified_lines, 3, &expanded);
        assert_eq!(rows(&result, &sections).len(), 1 + 20);
    }

    #[test]
    fn formatted_output_mentions_markers() {
        let result = diff("Line 1\n", "Line 2");
        let text = format_rows(&all_rows(&result));
        assert!(text.contains("New line at end of text"));
        assert!(text.contains("No new line at end of text"));
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn summary_counts() {
        let result = diff("a\nb\nc\n", "a\nB\nc\nd\n");
        assert_eq!(summary(&result), "1 addition, 0 deletions, 1 modification");
    }

    #[test]
    fn report_json_shape() {
        let result = diff("a\n", "b\n");
        let report = Report::changed(&result, vec![DisplaySection::visible(0, 0)]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["identical"], false);
        assert_eq!(json["sections"][0]["kind"], "visible");
        assert_eq!(json["result"]["original_lines"][0]["kind"], "modify");

        let json = serde_json::to_value(Report::identical()).unwrap();
        assert_eq!(json["identical"], true);
        assert!(json.get("result").is_none());
    }
}
