//! Export of cached default texts as translator-facing documents.
//!
//! The flat `hashedKey → text` cache of a namespace is split into a tree, condensed,
//! and written as JSON with a deterministic key order.

/// Name → reference rewriting
pub mod linker;
/// Sibling key order
pub mod order;
/// Ordered JSON rendering
pub mod serialize;
/// Key splitting, tree building and condensation
pub mod tree;

use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};

pub use self::linker::ReferenceLinker;
pub use self::order::KeyOrder;
use self::serialize::OrderedTree;
pub use self::tree::{
    TranslationTree,
    TreeNode,
};
use crate::cache::DefaultValueCache;
use crate::error::TranslationError;

/// Caller-supplied snapshot used while exporting.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Keys placed first, in this order, wherever they appear as siblings.
    pub reference_order: Vec<String>,
    /// Rewrites default texts before export.
    pub linker: Option<ReferenceLinker>,
}

/// Exports the cached defaults of `namespace` as a JSON document.
///
/// Only texts that went through a hashed lookup are in the cache; callers should make
/// sure every translatable text was requested before exporting.
///
/// # Errors
/// - [`TranslationError::State`] if caching is disabled or `namespace` has no cache
/// - [`TranslationError::StructuralConflict`] if keys collide as value and parent
/// - [`TranslationError::Serialize`] if rendering the document fails
pub fn export_namespace(
    defaults: Option<&DefaultValueCache>,
    namespace: &str,
    options: &ExportOptions,
) -> Result<String, TranslationError> {
    let defaults = defaults.ok_or_else(|| {
        TranslationError::State(
            "The translation cache is disabled. Set \"cacheDefaults\": true in .hashed-i18n.json (it is only enabled by default in debug builds) and restart.".to_string(),
        )
    })?;
    let entries = defaults.namespace(namespace).ok_or_else(|| {
        TranslationError::State(format!(
            "Could not find cache for translation namespace '{namespace}'"
        ))
    })?;

    let texts: BTreeMap<String, String> = entries
        .iter()
        .map(|(key, text)| {
            let text = options.linker.as_ref().map_or_else(|| text.clone(), |l| l.link(text));
            (key.clone(), text)
        })
        .collect();

    let tree = TranslationTree::build(&texts)?.condense()?;
    let order = KeyOrder::new(options.reference_order.iter().map(String::as_str));
    let document = OrderedTree::new(&tree, &order)
        .to_json()
        .map_err(|e| TranslationError::Serialize(e.to_string()))?;

    tracing::info!(namespace, entries = texts.len(), "Exported translation defaults");
    Ok(document)
}

/// Writes an exported document to `{dir}/{namespace}.json`.
///
/// # Errors
/// Returns the IO error if the file cannot be written.
pub fn write_export(dir: &Path, namespace: &str, document: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(format!("{namespace}.json"));
    std::fs::write(&path, document)?;
    tracing::debug!(path = %path.display(), "Wrote export file");
    Ok(path)
}
