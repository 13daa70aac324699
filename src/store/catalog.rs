//! Loaded locale resources and the backend that fetches them.

use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;

/// Flatten nested JSON object into dot-separated key map.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use hashed_i18n::store::catalog::flatten_json;
///
/// let json = json!({
///     "intro": {
///         "displayName": "Intro",
///         "description.1825715479": "Welcome to the Kanto region."
///     }
/// });
///
/// let flattened = flatten_json(&json, None);
/// assert_eq!(flattened.get("intro.displayName"), Some(&"Intro".to_string()));
/// assert!(flattened.contains_key("intro.description.1825715479"));
/// ```
#[must_use]
pub fn flatten_json(json: &Value, prefix: Option<&str>) -> HashMap<String, String> {
    let mut result = HashMap::new();
    flatten_json_value(json, prefix, &mut result);
    result
}

/// Recursive step of [`flatten_json`].
fn flatten_json_value(json: &Value, prefix: Option<&str>, result: &mut HashMap<String, String>) {
    match json {
        Value::Object(map) => {
            for (key, value) in map {
                let full_key = prefix.map_or_else(|| key.clone(), |p| format!("{p}.{key}"));
                flatten_json_value(value, Some(&full_key), result);
            }
        }
        Value::Array(arr) => {
            for (index, value) in arr.iter().enumerate() {
                let full_key =
                    prefix.map_or_else(|| format!("[{index}]"), |p| format!("{p}[{index}]"));
                flatten_json_value(value, Some(&full_key), result);
            }
        }
        Value::String(s) => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), s.clone());
            }
        }
        _ => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), json.to_string());
            }
        }
    }
}

/// Translations loaded so far: language → namespace → flat key map.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// language → namespace → flat key → text
    resources: HashMap<String, HashMap<String, HashMap<String, String>>>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a nested locale document, merging over keys already loaded.
    pub fn add_document(&mut self, language: &str, namespace: &str, document: &Value) {
        self.add_keys(language, namespace, flatten_json(document, None));
    }

    /// Adds already-flattened keys, merging over keys already loaded.
    pub fn add_keys(&mut self, language: &str, namespace: &str, keys: HashMap<String, String>) {
        self.resources
            .entry(language.to_string())
            .or_default()
            .entry(namespace.to_string())
            .or_default()
            .extend(keys);
    }

    /// Whether `namespace` has been loaded (possibly empty) for `language`.
    #[must_use]
    pub fn has_namespace(&self, language: &str, namespace: &str) -> bool {
        self.resources.get(language).is_some_and(|namespaces| namespaces.contains_key(namespace))
    }

    /// Raw translation of `key`, without any fallback.
    #[must_use]
    pub fn get(&self, language: &str, namespace: &str, key: &str) -> Option<&str> {
        self.resources.get(language)?.get(namespace)?.get(key).map(String::as_str)
    }
}

/// Source of locale documents.
pub trait LocaleBackend {
    /// Fetches the document for `language`/`namespace`.
    ///
    /// `None` means no source could provide it; the lookup then falls back to other
    /// namespaces, languages, or the default text.
    fn load(&self, language: &str, namespace: &str) -> Option<Value>;
}

/// Reads `locales/{language}/{namespace}.json` from an ordered list of roots.
///
/// The first root that yields a parseable document wins; failures fall through to the
/// next root.
#[derive(Debug, Clone)]
pub struct FsBackend {
    /// Tried first to last.
    roots: Vec<PathBuf>,
}

impl FsBackend {
    /// Creates a backend over `roots`, in priority order.
    #[must_use]
    pub const fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Location of a locale document under `root`.
    #[must_use]
    pub fn locale_path(root: &Path, language: &str, namespace: &str) -> PathBuf {
        root.join("locales").join(language).join(format!("{namespace}.json"))
    }

    /// Reads and parses one document; the error is only logged.
    fn read_document(path: &Path) -> Result<Value, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read locale file: {e}"))?;
        serde_json::from_str(&content).map_err(|e| format!("Failed to parse JSON: {e}"))
    }
}

impl LocaleBackend for FsBackend {
    fn load(&self, language: &str, namespace: &str) -> Option<Value> {
        for root in &self.roots {
            let path = Self::locale_path(root, language, namespace);
            match Self::read_document(&path) {
                Ok(document) => {
                    tracing::debug!(path = %path.display(), "Loaded locale document");
                    return Some(document);
                }
                Err(err) => {
                    tracing::debug!(path = %path.display(), %err, "Locale source unavailable");
                }
            }
        }

        tracing::warn!(language, namespace, "No locale source provided the namespace");
        None
    }
}
