//! Errors of lookups, caching and export.

use thiserror::Error;

/// Errors surfaced by hashed lookups, the default value cache and the exporter.
///
/// None of these are recovered internally; callers decide what to do with them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// A hashed key was requested without default text to hash.
    #[error(
        "Failed to create hashed translation key for '{namespace}.{key}' as the default translation was missing or blank"
    )]
    Validation {
        /// Namespace of the lookup.
        namespace: String,
        /// Key before hashing.
        key: String,
    },

    /// Two different default texts resolved to the same cache key.
    #[error(
        "Translation cache encountered conflicting default values for key '{namespace}.{key}':\n\"{cached}\"\n\"{incoming}\""
    )]
    Conflict {
        /// Namespace of the record.
        namespace: String,
        /// Hashed key of the record.
        key: String,
        /// Text recorded first.
        cached: String,
        /// Text that was rejected.
        incoming: String,
    },

    /// Export requested while the cache (or the content feeding it) is unavailable, or a
    /// default recorded for a namespace the cache does not know.
    #[error("{0}")]
    State(String),

    /// A key path is used both as a leaf and as a branch.
    #[error("Translation key '{path}' is used both as a value and as a parent of other keys")]
    StructuralConflict {
        /// Dotted path of the colliding node.
        path: String,
    },

    /// The export document could not be rendered.
    #[error("Failed to render exported translations: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    #[googletest::test]
    fn conflict_message_carries_both_values() {
        let err = TranslationError::Conflict {
            namespace: "questlines".to_string(),
            key: "intro.123".to_string(),
            cached: "Hello".to_string(),
            incoming: "Hi".to_string(),
        };

        let message = err.to_string();

        expect_that!(message, contains_substring("'questlines.intro.123'"));
        expect_that!(message, contains_substring("\"Hello\""));
        expect_that!(message, contains_substring("\"Hi\""));
    }
}
