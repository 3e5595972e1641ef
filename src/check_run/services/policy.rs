//! Store-side write policy for check runs.

use serde::Deserialize;

/// Write policy applied by [`super::CheckRunLifecycleService`].
///
/// # Examples
///
/// ```
/// use checkrun::check_run::services::CheckRunPolicy;
///
/// let policy = CheckRunPolicy::default();
/// assert!(policy.allow_mutation_after_completion);
///
/// let strict = CheckRunPolicy::strict();
/// assert!(!strict.allow_mutation_after_completion);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckRunPolicy {
    /// Whether completed check runs may still receive annotations,
    /// operations and output updates.
    pub allow_mutation_after_completion: bool,
    /// Whether every write is validated before it reaches the store.
    pub validate_before_write: bool,
}

impl Default for CheckRunPolicy {
    fn default() -> Self {
        Self {
            allow_mutation_after_completion: true,
            validate_before_write: true,
        }
    }
}

impl CheckRunPolicy {
    /// Creates a policy that locks completed check runs.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            allow_mutation_after_completion: false,
            validate_before_write: true,
        }
    }

    /// Loads a policy from JSON, filling unset fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns the parser error for malformed input or unknown keys.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}
