//! Length ceilings for bounded check run fields.
//!
//! Ceilings count Unicode scalar values, so truncation never splits a
//! multi-byte character.

/// Ceiling for check run and operation descriptions.
pub const MAX_DESCRIPTION_CHARS: usize = 255;

/// Ceiling for the check run text and HTML text bodies.
pub const MAX_TEXT_CHARS: usize = 65_535;

/// Ceiling for every details or target URL.
pub const MAX_URL_CHARS: usize = 1024;

/// Ceiling for annotation and operation identifiers.
pub const MAX_IDENTIFIER_CHARS: usize = 64;

/// Ceiling for annotation messages.
pub const MAX_ANNOTATION_MESSAGE_CHARS: usize = 2048;

/// Ceiling for operation button labels.
pub const MAX_OPERATION_LABEL_CHARS: usize = 32;

/// Maximum number of operations kept on a single annotation.
pub const MAX_ANNOTATION_OPERATIONS: usize = 8;

/// Truncates `value` in place to at most `max_chars` characters.
///
/// Returns `true` when characters were dropped.
pub fn truncate_chars(value: &mut String, max_chars: usize) -> bool {
    match value.char_indices().nth(max_chars) {
        Some((byte_index, _)) => {
            value.truncate(byte_index);
            true
        }
        None => false,
    }
}

/// Applies [`truncate_chars`] to an optional value.
pub fn truncate_optional_chars(value: &mut Option<String>, max_chars: usize) -> bool {
    value
        .as_mut()
        .is_some_and(|inner| truncate_chars(inner, max_chars))
}

/// Returns an owned copy of `value` truncated to `max_chars` characters.
#[must_use]
pub fn truncated(value: impl Into<String>, max_chars: usize) -> String {
    let mut owned = value.into();
    truncate_chars(&mut owned, max_chars);
    owned
}

/// Returns `true` when `value` is longer than `max_chars` characters.
#[must_use]
pub fn exceeds_chars(value: &str, max_chars: usize) -> bool {
    value.chars().nth(max_chars).is_some()
}
