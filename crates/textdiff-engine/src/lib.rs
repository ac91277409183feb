//! Diff reconciliation engine for TextDiff.
//!
//! Turns two texts (or two JSON documents) into the aligned presentation
//! model defined in `textdiff-types`. The pipeline is a pure function of its
//! inputs:
//!
//! 1. [`canonical`] -- order-insensitive JSON rendering (JSON mode only)
//! 2. [`line_diff`] -- whole-line edit script between the two texts
//! 3. [`reconcile`] -- pairs deleted/inserted lines into modified rows with
//!    character-level diffs under a [`CleanupMode`](textdiff_types::CleanupMode)
//! 4. [`newline`] -- trailing line terminator flags
//! 5. [`sections`] -- visible and collapsed runs of rows for display
//!
//! [`compare()`] runs steps 1-4; the presentation layer calls
//! [`build_sections`] with its own expanded-section state.

pub mod canonical;
pub mod cleanup;
pub mod compare;
pub mod config;
pub mod error;
pub mod line_diff;
pub mod newline;
pub mod reconcile;
pub mod script;
pub mod sections;

pub use canonical::{canonicalize, canonicalize_str};
pub use compare::{compare, Comparison};
pub use config::CompareOptions;
pub use error::{CompareError, CompareResult};
pub use line_diff::{line_diff, LineOp};
pub use newline::has_trailing_newline;
pub use reconcile::{char_diffs, reconcile};
pub use script::{diff_chars, diff_tokens, EditScript, Span, Tag};
pub use sections::{build_sections, DEFAULT_CONTEXT_SIZE};
