//! Default text cache used to export translatable text.

use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize,
};

use crate::error::TranslationError;

/// Per-namespace record of hashed key → default text observed at lookup time.
///
/// Records are write-once: recording the same text again is a no-op, recording a
/// different text for an existing key is a [`TranslationError::Conflict`].
///
/// Serializes as `{ namespace: { hashedKey: text } }`, which is also the cache dump
/// format read by the `export` command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefaultValueCache {
    /// namespace → hashed key → default text
    namespaces: BTreeMap<String, BTreeMap<String, String>>,
}

impl DefaultValueCache {
    /// Creates a cache with an empty partition for each namespace.
    #[must_use]
    pub fn with_namespaces<I, S>(namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            namespaces: namespaces.into_iter().map(|ns| (ns.into(), BTreeMap::new())).collect(),
        }
    }

    /// Records `value` as the default text of `hashed_key` in `namespace`.
    ///
    /// Only namespaces the cache was created with (or loaded from a dump) accept records,
    /// so a mistyped namespace fails here instead of exporting as its own document.
    ///
    /// # Errors
    /// - [`TranslationError::State`] when `namespace` has no partition
    /// - [`TranslationError::Conflict`] when a different text is already recorded
    pub fn record(
        &mut self,
        namespace: &str,
        hashed_key: &str,
        value: &str,
    ) -> Result<(), TranslationError> {
        let Some(entries) = self.namespaces.get_mut(namespace) else {
            return Err(TranslationError::State(format!(
                "Translation namespace '{namespace}' is not registered for default caching"
            )));
        };

        match entries.get(hashed_key) {
            Some(cached) if cached == value => Ok(()),
            Some(cached) => Err(TranslationError::Conflict {
                namespace: namespace.to_string(),
                key: hashed_key.to_string(),
                cached: cached.clone(),
                incoming: value.to_string(),
            }),
            None => {
                tracing::trace!(namespace, key = hashed_key, "Caching default translation");
                entries.insert(hashed_key.to_string(), value.to_string());
                Ok(())
            }
        }
    }

    /// Returns the recorded entries of `namespace`, if it has a partition.
    #[must_use]
    pub fn namespace(&self, namespace: &str) -> Option<&BTreeMap<String, String>> {
        self.namespaces.get(namespace)
    }

    /// Returns the recorded default text of a single key.
    #[must_use]
    pub fn get(&self, namespace: &str, hashed_key: &str) -> Option<&str> {
        self.namespaces.get(namespace)?.get(hashed_key).map(String::as_str)
    }

    /// Iterates over the namespace partitions.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.keys().map(String::as_str)
    }

    /// Total number of recorded entries across all namespaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.namespaces.values().map(BTreeMap::len).sum()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
