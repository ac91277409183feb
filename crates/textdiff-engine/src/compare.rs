//! The comparison pipeline: canonicalize, short-circuit identical inputs,
//! diff lines, reconcile modified pairs, and record trailing terminators.

use std::borrow::Cow;

use textdiff_types::{DiffResult, Side};
use tracing::debug;

use crate::canonical::canonicalize_str;
use crate::config::CompareOptions;
use crate::error::CompareResult;
use crate::line_diff::line_diff;
use crate::newline::has_trailing_newline;
use crate::reconcile::reconcile;

/// Outcome of a successful comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Comparison {
    /// The compared texts are byte-identical; there is nothing to show.
    Identical,
    /// The texts differ.
    Changed(DiffResult),
}

impl Comparison {
    pub fn is_identical(&self) -> bool {
        matches!(self, Comparison::Identical)
    }

    /// The diff, unless the inputs were identical.
    pub fn into_result(self) -> Option<DiffResult> {
        match self {
            Comparison::Identical => None,
            Comparison::Changed(result) => Some(result),
        }
    }
}

/// Compare two texts.
///
/// In JSON mode both sides are parsed and canonicalized first; the original
/// is parsed before the modified side and a failure on either aborts the
/// comparison. Identity is checked on the texts actually compared, before
/// any diffing. Trailing-terminator flags are only recorded in text mode.
pub fn compare(
    original: &str,
    modified: &str,
    options: &CompareOptions,
) -> CompareResult<Comparison> {
    let (left, right): (Cow<'_, str>, Cow<'_, str>) = if options.json_mode {
        let left = canonicalize_str(original, Side::Original)?;
        let right = canonicalize_str(modified, Side::Modified)?;
        (Cow::Owned(left), Cow::Owned(right))
    } else {
        (Cow::Borrowed(original), Cow::Borrowed(modified))
    };

    if left == right {
        debug!(json = options.json_mode, "inputs identical");
        return Ok(Comparison::Identical);
    }

    let ops = line_diff(&left, &right);
    debug!(ops = ops.len(), "computed line diff");
    let (original_lines, modified_lines) = reconcile(&ops, options.cleanup, options.edit_cost);

    let (original_trailing_newline, modified_trailing_newline) = if options.json_mode {
        (false, false)
    } else {
        (has_trailing_newline(original), has_trailing_newline(modified))
    };

    Ok(Comparison::Changed(DiffResult {
        original_lines,
        modified_lines,
        original_trailing_newline,
        modified_trailing_newline,
    }))
}
