//! Translation lookup with namespace/language fallback and interpolation.

use std::sync::LazyLock;

use regex::{
    Captures,
    Regex,
};

use super::catalog::Catalog;
use super::options::TranslateOptions;
use crate::config::{
    I18nSettings,
    NAMESPACE_SEPARATOR,
};

/// `{{name}}` or `{{name, format}}`
#[allow(clippy::expect_used)]
static VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([^{}]+?)\s*\}\}").expect("valid variable pattern"));

/// `[[key]]` or `[[namespace::key]]`
#[allow(clippy::expect_used)]
static NESTING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[\s*(.+?)\s*\]\]").expect("valid nesting pattern"));

/// Splits a fully-qualified `namespace::key` into its parts.
#[must_use]
pub fn split_namespace(key: &str) -> Option<(&str, &str)> {
    key.split_once(NAMESPACE_SEPARATOR).filter(|(namespace, rest)| !namespace.is_empty() && !rest.is_empty())
}

/// Resolves keys against a [`Catalog`] for one language.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    /// Loaded translations.
    catalog: &'a Catalog,
    /// Fallbacks, namespaces and nesting depth.
    settings: &'a I18nSettings,
    /// Language tried before the fallback language.
    language: &'a str,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver for `language`.
    #[must_use]
    pub const fn new(catalog: &'a Catalog, settings: &'a I18nSettings, language: &'a str) -> Self {
        Self { catalog, settings, language }
    }

    /// Translates `key` in `namespace`.
    ///
    /// Missing keys resolve to the default text when one is given, otherwise to the key.
    #[must_use]
    pub fn translate(&self, key: &str, namespace: &str, options: &TranslateOptions) -> String {
        self.translate_at_depth(key, namespace, options, 0)
    }

    /// [`Self::translate`] inside `depth` levels of `[[...]]` nesting.
    fn translate_at_depth(
        &self,
        key: &str,
        namespace: &str,
        options: &TranslateOptions,
        depth: usize,
    ) -> String {
        let (namespace, key) = split_namespace(key).unwrap_or((namespace, key));

        let text = match self.find(key, namespace) {
            Some(found) => found.to_string(),
            None => {
                tracing::trace!(key, namespace, language = self.language, "Missing translation");
                options.default_value.clone().unwrap_or_else(|| key.to_string())
            }
        };

        self.interpolate(&text, namespace, options, depth)
    }

    /// Looks `key` up in the requested then fallback namespace, for the current then
    /// fallback language. Empty strings count as missing.
    fn find(&self, key: &str, namespace: &str) -> Option<&'a str> {
        let mut languages = vec![self.language];
        if self.settings.fallback_language != self.language {
            languages.push(&self.settings.fallback_language);
        }

        let mut namespaces = vec![namespace];
        if let Some(fallback) = self.settings.fallback_namespace.as_deref()
            && fallback != namespace
        {
            namespaces.push(fallback);
        }

        languages.iter().find_map(|language| {
            namespaces.iter().find_map(|namespace| {
                self.catalog.get(language, namespace, key).filter(|text| !text.is_empty())
            })
        })
    }

    /// Expands variables, then nested keys while `depth` is below the nesting limit.
    fn interpolate(
        &self,
        text: &str,
        namespace: &str,
        options: &TranslateOptions,
        depth: usize,
    ) -> String {
        let text = VARIABLE.replace_all(text, |caps: &Captures<'_>| self.variable(caps, options));

        if depth >= self.settings.nesting_depth {
            return text.into_owned();
        }

        NESTING
            .replace_all(&text, |caps: &Captures<'_>| {
                let nested = caps.get(1).map_or("", |m| m.as_str());
                // Nested keys never inherit the outer default text.
                let nested_options =
                    TranslateOptions { default_value: None, vars: options.vars.clone() };
                self.translate_at_depth(nested, namespace, &nested_options, depth + 1)
            })
            .into_owned()
    }

    /// Expands one `{{...}}` match. Unknown variables are left verbatim.
    fn variable(&self, caps: &Captures<'_>, options: &TranslateOptions) -> String {
        let whole = caps.get(0).map_or("", |m| m.as_str());
        let inner = caps.get(1).map_or("", |m| m.as_str());
        let (name, format) = match inner.split_once(',') {
            Some((name, format)) => (name.trim(), Some(format.trim())),
            None => (inner, None),
        };

        let Some(value) = options.vars.get(name) else {
            return whole.to_string();
        };

        match format {
            // A namespace used as a format translates the value in that namespace.
            Some(format) if self.settings.namespaces.iter().any(|ns| ns == format) => self
                .find(value, format)
                .map_or_else(|| value.clone(), str::to_string),
            _ => value.clone(),
        }
    }
}
