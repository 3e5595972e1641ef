//! Source-location annotations attached to a check run.

use super::{
    AnnotationLevel, Operation,
    limits::{
        MAX_ANNOTATION_MESSAGE_CHARS, MAX_ANNOTATION_OPERATIONS, MAX_IDENTIFIER_CHARS,
        MAX_URL_CHARS, truncate_chars, truncate_optional_chars, truncated,
    },
};

/// A message pinned to a line range in a file.
///
/// Builders truncate on assignment and keep at most
/// [`MAX_ANNOTATION_OPERATIONS`] operations. Writing the public fields
/// directly bypasses that; call [`Annotation::apply_truncation`] afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Identifier; must be present whenever `operations` is non-empty.
    pub id: Option<String>,
    /// Repository-relative file path.
    pub path: String,
    /// First annotated line.
    pub start_line: u32,
    /// First annotated column on `start_line`.
    pub start_column: Option<u32>,
    /// Last annotated line.
    pub end_line: u32,
    /// Last annotated column on `end_line`.
    pub end_column: Option<u32>,
    /// Severity.
    pub level: AnnotationLevel,
    /// Message body. Empty when unset.
    pub message: String,
    /// Link to more detail.
    pub details_url: Option<String>,
    /// Buttons shown with the annotation, in display order.
    pub operations: Vec<Operation>,
    /// Whether the annotation starts folded. `None` leaves it to the viewer.
    pub folded: Option<bool>,
}

impl Annotation {
    /// Creates an annotation over `start_line..=end_line` in `path`.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        start_line: u32,
        end_line: u32,
        level: AnnotationLevel,
    ) -> Self {
        Self {
            id: None,
            path: path.into(),
            start_line,
            start_column: None,
            end_line,
            end_column: None,
            level,
            message: String::new(),
            details_url: None,
            operations: Vec::new(),
            folded: None,
        }
    }

    /// Sets the identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(truncated(id, MAX_IDENTIFIER_CHARS));
        self
    }

    /// Narrows the annotation to a column range.
    #[must_use]
    pub const fn with_columns(mut self, start_column: u32, end_column: u32) -> Self {
        self.start_column = Some(start_column);
        self.end_column = Some(end_column);
        self
    }

    /// Sets the message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = truncated(message, MAX_ANNOTATION_MESSAGE_CHARS);
        self
    }

    /// Sets the details link.
    #[must_use]
    pub fn with_details_url(mut self, details_url: impl Into<String>) -> Self {
        self.details_url = Some(truncated(details_url, MAX_URL_CHARS));
        self
    }

    /// Replaces the operations, keeping the first
    /// [`MAX_ANNOTATION_OPERATIONS`] in order.
    #[must_use]
    pub fn with_operations(mut self, operations: impl IntoIterator<Item = Operation>) -> Self {
        self.operations = operations
            .into_iter()
            .take(MAX_ANNOTATION_OPERATIONS)
            .map(|mut operation| {
                operation.apply_truncation();
                operation
            })
            .collect();
        self
    }

    /// Sets the fold hint.
    #[must_use]
    pub const fn with_folded(mut self, folded: bool) -> Self {
        self.folded = Some(folded);
        self
    }

    /// Returns the identifier, or an empty string when none is set.
    #[must_use]
    pub fn id_or_empty(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    /// Returns `true` when the annotation carries buttons.
    #[must_use]
    pub fn has_operations(&self) -> bool {
        !self.operations.is_empty()
    }

    /// Cuts every bounded field and the operation list down to its ceiling.
    pub fn apply_truncation(&mut self) {
        truncate_optional_chars(&mut self.id, MAX_IDENTIFIER_CHARS);
        truncate_chars(&mut self.message, MAX_ANNOTATION_MESSAGE_CHARS);
        truncate_optional_chars(&mut self.details_url, MAX_URL_CHARS);
        self.operations.truncate(MAX_ANNOTATION_OPERATIONS);
        for operation in &mut self.operations {
            operation.apply_truncation();
        }
    }
}
