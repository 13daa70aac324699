//! Memoized translation lookups keyed by language version.
//!
//! Every completed language change bumps a version counter. [`Translated`] handles
//! remember the version their text was computed for and recompute on the first read
//! after the counter moves.

/// Loaded locale documents and their sources
pub mod catalog;
/// Per-lookup options
mod options;
/// Fallback and interpolation rules
pub mod resolver;

use std::cell::{
    Cell,
    Ref,
    RefCell,
};
use std::collections::HashMap;
use std::rc::Rc;

pub use options::TranslateOptions;
use serde_json::Value;

use self::catalog::{
    Catalog,
    LocaleBackend,
};
use self::resolver::Resolver;
use crate::cache::DefaultValueCache;
use crate::config::I18nSettings;
use crate::error::TranslationError;
use crate::export::{
    self,
    ExportOptions,
};
use crate::hash::hashed_key;

/// State shared between the store and the handles it hands out.
#[derive(Debug)]
struct Shared {
    /// Fixed for the lifetime of the store.
    settings: I18nSettings,
    /// Every language/namespace loaded so far.
    catalog: RefCell<Catalog>,
    /// Current language code.
    language: RefCell<String>,
    /// Completed language changes.
    version: Cell<u64>,
}

/// Translation lookups for the running application.
#[derive(Debug)]
pub struct TranslationStore {
    /// State read by every handle.
    shared: Rc<Shared>,
    /// Handles for option-less lookups, keyed by `(namespace, key)`.
    memo: RefCell<HashMap<(String, String), Translated>>,
    /// Present only when default caching was enabled at startup.
    defaults: Option<RefCell<DefaultValueCache>>,
}

impl TranslationStore {
    /// Creates a store using the fallback language as the initial language.
    #[must_use]
    pub fn new(settings: I18nSettings) -> Self {
        let defaults = settings
            .cache_enabled()
            .then(|| RefCell::new(DefaultValueCache::with_namespaces(settings.namespaces.iter())));
        tracing::debug!(cache_enabled = defaults.is_some(), "Creating translation store");

        let language = settings.fallback_language.clone();
        Self {
            shared: Rc::new(Shared {
                settings,
                catalog: RefCell::new(Catalog::new()),
                language: RefCell::new(language),
                version: Cell::new(0),
            }),
            memo: RefCell::new(HashMap::new()),
            defaults,
        }
    }

    /// Settings the store was created with.
    #[must_use]
    pub fn settings(&self) -> &I18nSettings {
        &self.shared.settings
    }

    /// Current language code.
    #[must_use]
    pub fn language(&self) -> String {
        self.shared.language.borrow().clone()
    }

    /// Number of completed language changes.
    #[must_use]
    pub fn language_version(&self) -> u64 {
        self.shared.version.get()
    }

    /// Adds a locale document without touching the language version.
    ///
    /// Resources added this way are seen by handles computed afterwards; add them before
    /// the language change that should pick them up.
    pub fn add_resources(&self, language: &str, namespace: &str, document: &Value) {
        self.shared.catalog.borrow_mut().add_document(language, namespace, document);
    }

    /// Switches to `language`, loading any namespaces not yet loaded for it and for the
    /// fallback language, then bumps the language version once.
    pub fn change_language(&self, language: &str, backend: &dyn LocaleBackend) {
        let settings = &self.shared.settings;
        let mut languages = vec![language];
        if settings.fallback_language != language {
            languages.push(&settings.fallback_language);
        }

        {
            let mut catalog = self.shared.catalog.borrow_mut();
            for lng in languages {
                for namespace in &settings.namespaces {
                    if catalog.has_namespace(lng, namespace) {
                        continue;
                    }
                    match backend.load(lng, namespace) {
                        Some(document) => catalog.add_document(lng, namespace, &document),
                        // Remember the miss so the namespace is not fetched again.
                        None => catalog.add_keys(lng, namespace, HashMap::new()),
                    }
                }
            }
        }

        *self.shared.language.borrow_mut() = language.to_string();
        let version = self.shared.version.get() + 1;
        self.shared.version.set(version);
        tracing::info!(language, version, "Language changed");
    }

    /// Returns a handle to the translation of `key` in `namespace`.
    ///
    /// Option-less calls with the same `(key, namespace)` share one handle. Calls with
    /// options always get a fresh handle, since options are not compared for caching.
    pub fn get(&self, key: &str, namespace: &str, options: Option<TranslateOptions>) -> Translated {
        if let Some(options) = options {
            return Translated::new(Rc::clone(&self.shared), key, namespace, options);
        }

        self.memo
            .borrow_mut()
            .entry((namespace.to_string(), key.to_string()))
            .or_insert_with(|| {
                tracing::trace!(key, namespace, "Memoizing translation");
                Translated::new(Rc::clone(&self.shared), key, namespace, TranslateOptions::new())
            })
            .clone()
    }

    /// Looks up `key` suffixed with a hash of `default_value`.
    ///
    /// Changing the default text changes the key, so stale translations are dropped
    /// instead of shown. With default caching enabled the text is recorded for export.
    ///
    /// # Errors
    /// - [`TranslationError::Validation`] if `default_value` is empty
    /// - [`TranslationError::State`] if caching is enabled and `namespace` is not configured
    /// - [`TranslationError::Conflict`] if another text was recorded under the same key
    pub fn get_hashed(
        &self,
        key: &str,
        namespace: &str,
        default_value: &str,
        options: Option<TranslateOptions>,
    ) -> Result<Translated, TranslationError> {
        if default_value.is_empty() {
            return Err(TranslationError::Validation {
                namespace: namespace.to_string(),
                key: key.to_string(),
            });
        }

        let hashed = hashed_key(key, default_value);
        if let Some(defaults) = &self.defaults {
            defaults.borrow_mut().record(namespace, &hashed, default_value)?;
        }

        let options = options.unwrap_or_default().with_default(default_value);
        Ok(self.get(&hashed, namespace, Some(options)))
    }

    /// Whether hashed lookups record their default text.
    #[must_use]
    pub const fn cache_enabled(&self) -> bool {
        self.defaults.is_some()
    }

    /// Default texts recorded so far, if caching is enabled.
    #[must_use]
    pub fn default_values(&self) -> Option<Ref<'_, DefaultValueCache>> {
        self.defaults.as_ref().map(RefCell::borrow)
    }

    /// Exports the recorded defaults of `namespace` as a translation document.
    ///
    /// # Errors
    /// See [`export::export_namespace`].
    pub fn export(
        &self,
        namespace: &str,
        options: &ExportOptions,
    ) -> Result<String, TranslationError> {
        let defaults = self.default_values();
        export::export_namespace(defaults.as_deref(), namespace, options)
    }
}

/// Handle to a translated text that follows language changes.
#[derive(Debug, Clone)]
pub struct Translated {
    /// Shared by clones of a memoized handle.
    cell: Rc<TranslatedCell>,
}

/// Lookup inputs and the last computed text of a handle.
#[derive(Debug)]
struct TranslatedCell {
    /// Store state the text is computed from.
    shared: Rc<Shared>,
    /// Key as requested, possibly `namespace::key`.
    key: String,
    /// Namespace used when the key carries none.
    namespace: String,
    /// Fixed at creation.
    options: TranslateOptions,
    /// Text and the language version it was computed for.
    computed: RefCell<Option<(u64, String)>>,
}

impl Translated {
    /// Creates a handle that computes its text on first read.
    fn new(shared: Rc<Shared>, key: &str, namespace: &str, options: TranslateOptions) -> Self {
        Self {
            cell: Rc::new(TranslatedCell {
                shared,
                key: key.to_string(),
                namespace: namespace.to_string(),
                options,
                computed: RefCell::new(None),
            }),
        }
    }

    /// Current text, recomputed if the language changed since the last read.
    #[must_use]
    pub fn value(&self) -> String {
        let cell = &self.cell;
        let version = cell.shared.version.get();

        if let Some((computed_for, text)) = cell.computed.borrow().as_ref()
            && *computed_for == version
        {
            return text.clone();
        }

        let text = {
            let catalog = cell.shared.catalog.borrow();
            let language = cell.shared.language.borrow();
            Resolver::new(&catalog, &cell.shared.settings, &language).translate(
                &cell.key,
                &cell.namespace,
                &cell.options,
            )
        };
        *cell.computed.borrow_mut() = Some((version, text.clone()));
        text
    }

    /// Key looked up by this handle (hashed, for hashed lookups).
    #[must_use]
    pub fn key(&self) -> &str {
        &self.cell.key
    }

    /// Whether two handles are the same memoized cell.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}
