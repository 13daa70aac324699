//! Nested translation tree built from flat dotted keys.

use std::collections::BTreeMap;

use crate::error::TranslationError;

/// Number of digits that marks a trailing key segment as a content hash.
const HASH_DIGITS: usize = 10;

/// A node of the translation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// Translatable text.
    Leaf(String),
    /// Never empty.
    Branch(BTreeMap<String, TreeNode>),
}

/// Splits a flat key into tree segments.
///
/// A `.` separates segments unless it touches a space (it is then part of the text) or
/// everything after it is a ten digit hash, which stays attached to the last segment.
///
/// Hashes are written without padding, so shorter ones (`99162322`) become a segment of
/// their own. [`TranslationTree::condense`] joins a lone short hash back onto its key, but
/// two short hashes under the same key export as a nested object of hash → text.
///
/// # Examples
/// ```
/// use hashed_i18n::export::tree::split_key;
///
/// assert_eq!(split_key("quest.step 1.1825715479"), vec!["quest", "step 1.1825715479"]);
/// assert_eq!(split_key("Go to Mt. Moon.intro"), vec!["Go to Mt. Moon", "intro"]);
/// assert_eq!(split_key("quest.step 1.99162322"), vec!["quest", "step 1", "99162322"]);
/// ```
#[must_use]
pub fn split_key(key: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;

    for (index, _) in key.match_indices('.') {
        let (head, tail) = key.split_at(index);
        let rest = tail.strip_prefix('.').unwrap_or(tail);
        if head.ends_with(' ') || rest.starts_with(' ') || is_hash(rest) {
            continue;
        }
        if let Some(segment) = key.get(start..index) {
            segments.push(segment);
        }
        start = index + 1;
    }

    segments.push(key.get(start..).unwrap_or_default());
    segments
}

/// Whether `rest` is exactly a ten digit hash.
fn is_hash(rest: &str) -> bool {
    rest.len() == HASH_DIGITS && rest.bytes().all(|b| b.is_ascii_digit())
}

/// Translation tree of one namespace. The root may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTree {
    /// Top-level entries.
    root: BTreeMap<String, TreeNode>,
}

impl TranslationTree {
    /// Builds the tree for a flat key → value map.
    ///
    /// # Errors
    /// [`TranslationError::StructuralConflict`] if a key is both a value and a parent of
    /// other keys.
    pub fn build(flat: &BTreeMap<String, String>) -> Result<Self, TranslationError> {
        let mut root = BTreeMap::new();
        for (key, value) in flat {
            insert(&mut root, &split_key(key), value)?;
        }
        Ok(Self { root })
    }

    /// Merges every branch that has a single child into that child, joining the two
    /// segment names with `.`.
    ///
    /// # Errors
    /// [`TranslationError::StructuralConflict`] if a merged name collides with a sibling.
    pub fn condense(self) -> Result<Self, TranslationError> {
        Ok(Self { root: condense_children(self.root, None)? })
    }

    /// Flattens the tree back into dotted keys.
    #[must_use]
    pub fn flatten(&self) -> BTreeMap<String, String> {
        let mut flat = BTreeMap::new();
        flatten_into(&self.root, None, &mut flat);
        flat
    }

    /// Top-level entries.
    #[must_use]
    pub const fn root(&self) -> &BTreeMap<String, TreeNode> {
        &self.root
    }

    /// Whether the tree has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

/// Inserts `value` at the path `segments`, creating branches on the way.
fn insert(
    root: &mut BTreeMap<String, TreeNode>,
    segments: &[&str],
    value: &str,
) -> Result<(), TranslationError> {
    let Some((last, parents)) = segments.split_last() else {
        return Ok(());
    };
    let conflict = |depth: usize| TranslationError::StructuralConflict {
        path: segments.get(..depth).unwrap_or(segments).join("."),
    };

    let mut current = root;
    for (depth, segment) in parents.iter().enumerate() {
        let node = current
            .entry((*segment).to_string())
            .or_insert_with(|| TreeNode::Branch(BTreeMap::new()));
        current = match node {
            TreeNode::Branch(children) => children,
            TreeNode::Leaf(_) => return Err(conflict(depth + 1)),
        };
    }

    if matches!(current.get(*last), Some(TreeNode::Branch(_))) {
        return Err(conflict(segments.len()));
    }
    current.insert((*last).to_string(), TreeNode::Leaf(value.to_string()));
    Ok(())
}

/// Condenses bottom-up: once children are condensed, a single remaining child can
/// no longer be a single-child branch, so one merge per entry suffices.
fn condense_children(
    children: BTreeMap<String, TreeNode>,
    parent: Option<&str>,
) -> Result<BTreeMap<String, TreeNode>, TranslationError> {
    let mut condensed = BTreeMap::new();

    for (name, node) in children {
        let path = parent.map_or_else(|| name.clone(), |p| format!("{p}.{name}"));
        let (name, node) = match node {
            TreeNode::Leaf(value) => (name, TreeNode::Leaf(value)),
            TreeNode::Branch(grandchildren) => {
                let mut grandchildren = condense_children(grandchildren, Some(&path))?;
                if grandchildren.len() == 1
                    && let Some((child_name, child)) = grandchildren.pop_first()
                {
                    (format!("{name}.{child_name}"), child)
                } else {
                    (name, TreeNode::Branch(grandchildren))
                }
            }
        };

        if condensed.contains_key(&name) {
            let path = parent.map_or_else(|| name.clone(), |p| format!("{p}.{name}"));
            return Err(TranslationError::StructuralConflict { path });
        }
        condensed.insert(name, node);
    }

    Ok(condensed)
}

/// Appends the leaves under `children` to `flat`, prefixed with `prefix`.
fn flatten_into(
    children: &BTreeMap<String, TreeNode>,
    prefix: Option<&str>,
    flat: &mut BTreeMap<String, String>,
) {
    for (name, node) in children {
        let key = prefix.map_or_else(|| name.clone(), |p| format!("{p}.{name}"));
        match node {
            TreeNode::Leaf(value) => {
                flat.insert(key, value.clone());
            }
            TreeNode::Branch(grandchildren) => flatten_into(grandchildren, Some(&key), flat),
        }
    }
}
