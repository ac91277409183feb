//! Presentation-model types for TextDiff.
//!
//! This crate holds the data shared between the diff engine and whatever
//! renders its output. Nothing here computes a diff; the engine produces
//! these values and the presentation layer only maps them to rows.
//!
//! # Key Types
//!
//! - [`LineRecord`] — One aligned row on one side of the comparison
//! - [`LineNumber`] — 1-based line number, or [`LineNumber::Absent`] for filler rows
//! - [`CharDiff`] — Character-level segment of a modified line
//! - [`DiffResult`] — The two parallel line sequences plus trailing-newline flags
//! - [`DisplaySection`] — Visible or collapsed run of rows
//! - [`ExpandedSections`] — Externally owned expand/collapse state
//! - [`CleanupMode`] — Character-diff cleanup policy

pub mod error;
pub mod line;
pub mod mode;
pub mod result;
pub mod section;

pub use error::TypeError;
pub use line::{CharDiff, CharKind, LineKind, LineNumber, LineRecord};
pub use mode::{CleanupMode, Side};
pub use result::DiffResult;
pub use section::{DisplaySection, ExpandedSections, SectionKey};
