//! Trailing line terminator detection.

/// Returns `true` if `text` is non-empty and ends with a line terminator.
///
/// Only meaningful for raw input; canonical JSON never ends with one.
pub fn has_trailing_newline(text: &str) -> bool {
    text.ends_with('\n')
}
