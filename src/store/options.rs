//! Options of a single lookup.

use std::collections::BTreeMap;

/// Extra lookup options.
///
/// Passing any options to [`TranslationStore::get`](super::TranslationStore::get) bypasses
/// memoization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Text returned (and interpolated) when no translation exists.
    pub default_value: Option<String>,
    /// Values for `{{name}}` placeholders.
    pub vars: BTreeMap<String, String>,
}

impl TranslateOptions {
    /// No default text, no variables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text used when no translation exists.
    #[must_use]
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    /// Adds a `{{name}}` value.
    #[must_use]
    pub fn with_var(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.vars.insert(name.into(), value.to_string());
        self
    }
}
