//! Sibling key ordering for exported documents.

use std::cmp::Ordering;
use std::collections::HashMap;

/// Orders sibling keys of an exported document.
///
/// 1. Keys of the reference sequence (e.g. questline names in game order) come first,
///    in sequence order.
/// 2. `displayName…` keys sort right before `description…` keys.
/// 3. `step <N>` keys sort by `N` numerically.
/// 4. Everything else sorts by the raw key.
///
/// The order is total, so it can be handed to any sort. Keeping it total means rules 1
/// and 2 also apply to pairs they do not name, overriding the raw key order of rule 4:
///
/// - a reference key sorts before every key outside the sequence (`"beta"` before
///   `"alpha"` when only `"beta"` is referenced);
/// - `displayName…` keys sort as if they were `description…` keys, so they also precede
///   keys that fall between the two in raw order (`"displayName"` before `"dialog"`).
#[derive(Debug, Clone, Default)]
pub struct KeyOrder {
    /// Reference key → position in the sequence.
    reference: HashMap<String, usize>,
}

/// What a key sorts by. Variant order puts reference keys first.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey<'k> {
    /// Position in the reference sequence.
    Reference(usize),
    /// Group, position within the group, then the key itself.
    Natural {
        /// Group name; `displayName…` and `description…` share one.
        primary: &'k str,
        /// `0`/`1` for display name/description, `N` for `step N`.
        rank: u64,
        /// Tie-breaker.
        raw: &'k str,
    },
}

/// Prefix sorted right before [`DESCRIPTION`].
const DISPLAY_NAME: &str = "displayName";
/// Prefix of description keys; also the group shared with [`DISPLAY_NAME`].
const DESCRIPTION: &str = "description";
/// Prefix of numbered step keys.
const STEP: &str = "step ";

impl KeyOrder {
    /// Creates an order with `reference` as the leading sequence. Duplicates keep their
    /// first position.
    #[must_use]
    pub fn new<I, S>(reference: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut positions = HashMap::new();
        for (index, key) in reference.into_iter().enumerate() {
            positions.entry(key.into()).or_insert(index);
        }
        Self { reference: positions }
    }

    /// Compares two sibling keys.
    #[must_use]
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.sort_key(a).cmp(&self.sort_key(b))
    }

    /// Sorts `keys` in place.
    pub fn sort<S: AsRef<str>>(&self, keys: &mut [S]) {
        keys.sort_by(|a, b| self.compare(a.as_ref(), b.as_ref()));
    }

    /// Maps `key` to what it sorts by.
    fn sort_key<'k>(&self, key: &'k str) -> SortKey<'k> {
        if let Some(&index) = self.reference.get(key) {
            return SortKey::Reference(index);
        }

        if key.starts_with(DISPLAY_NAME) {
            return SortKey::Natural { primary: DESCRIPTION, rank: 0, raw: key };
        }
        if key.starts_with(DESCRIPTION) {
            return SortKey::Natural { primary: DESCRIPTION, rank: 1, raw: key };
        }
        if let Some(step) = step_number(key) {
            return SortKey::Natural { primary: STEP, rank: step, raw: key };
        }

        SortKey::Natural { primary: key, rank: 0, raw: key }
    }
}

/// `N` of a key starting with `step <N>`.
fn step_number(key: &str) -> Option<u64> {
    let rest = key.strip_prefix(STEP)?;
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    rest.get(..digits).filter(|n| !n.is_empty())?.parse().ok()
}
