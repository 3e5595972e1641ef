//! Actionable buttons attached to a check run or an annotation.

use super::limits::{
    MAX_DESCRIPTION_CHARS, MAX_IDENTIFIER_CHARS, MAX_OPERATION_LABEL_CHARS, MAX_URL_CHARS,
    truncate_chars, truncate_optional_chars, truncated,
};

/// A button shown next to a check run or an annotation.
///
/// Builders truncate on assignment. Writing the public fields directly
/// bypasses that; call [`Operation::apply_truncation`] afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Identifier echoed back to the producer when the button is pressed.
    pub id: String,
    /// Button text.
    pub label: String,
    /// Short description of what the button does. Empty when unset.
    pub description: String,
    /// Link opened when the button is pressed.
    pub target_url: Option<String>,
}

impl Operation {
    /// Creates an operation with the required identifier and label.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: truncated(id, MAX_IDENTIFIER_CHARS),
            label: truncated(label, MAX_OPERATION_LABEL_CHARS),
            description: String::new(),
            target_url: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = truncated(description, MAX_DESCRIPTION_CHARS);
        self
    }

    /// Sets the target link.
    #[must_use]
    pub fn with_target_url(mut self, target_url: impl Into<String>) -> Self {
        self.target_url = Some(truncated(target_url, MAX_URL_CHARS));
        self
    }

    /// Cuts every bounded field down to its ceiling.
    pub fn apply_truncation(&mut self) {
        truncate_chars(&mut self.id, MAX_IDENTIFIER_CHARS);
        truncate_chars(&mut self.label, MAX_OPERATION_LABEL_CHARS);
        truncate_chars(&mut self.description, MAX_DESCRIPTION_CHARS);
        truncate_optional_chars(&mut self.target_url, MAX_URL_CHARS);
    }
}
