//! Rewrites known names in exported text into nested translation references.

use regex::Regex;

use crate::config::NAMESPACE_SEPARATOR;

/// Wraps known names (e.g. Pokémon names) in `[[namespace::Name]]` references so
/// translators get the translated name substituted at runtime.
///
/// A name is linked only when it is not adjacent to a word character and not already
/// inside a reference. Longer names win over names they start with.
#[derive(Debug, Clone)]
pub struct ReferenceLinker {
    /// Namespace written into each reference.
    namespace: String,
    /// Longest first.
    names: Vec<String>,
    /// Alternation of all names; `None` without names.
    pattern: Option<Regex>,
}

impl ReferenceLinker {
    /// Creates a linker for `names`, resolved in `namespace`. Empty names are ignored.
    ///
    /// # Errors
    /// Fails if the combined name pattern exceeds the regex size limit.
    pub fn new<I, S>(namespace: &str, names: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> =
            names.into_iter().map(Into::into).filter(|name| !name.is_empty()).collect();
        names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        names.dedup();

        let pattern = if names.is_empty() {
            None
        } else {
            let alternation =
                names.iter().map(|name| regex::escape(name)).collect::<Vec<_>>().join("|");
            Some(Regex::new(&format!("(?:{alternation})"))?)
        };

        Ok(Self { namespace: namespace.to_string(), names, pattern })
    }

    /// Returns `text` with every linkable name wrapped in a reference.
    #[must_use]
    pub fn link(&self, text: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return text.to_string();
        };

        let opening = format!("[[{}{NAMESPACE_SEPARATOR}", self.namespace);
        let mut linked = String::with_capacity(text.len());
        let mut copied = 0;
        let mut search_from = 0;

        while let Some(found) = pattern.find_at(text, search_from) {
            let start = found.start();
            let (before, after) = text.split_at(start);

            match self.linkable_name(before, after, &opening) {
                Some(name) => {
                    linked.push_str(before.get(copied..).unwrap_or_default());
                    linked.push_str(&opening);
                    linked.push_str(name);
                    linked.push_str("]]");
                    copied = start + name.len();
                    search_from = copied;
                }
                None => {
                    search_from = start + after.chars().next().map_or(1, char::len_utf8);
                }
            }
        }

        linked.push_str(text.get(copied..).unwrap_or_default());
        linked
    }

    /// Longest name starting `after` that can be linked at this position.
    fn linkable_name(&self, before: &str, after: &str, opening: &str) -> Option<&str> {
        if before.chars().next_back().is_some_and(is_word_char) || before.ends_with(opening) {
            return None;
        }

        self.names.iter().map(String::as_str).find(|name| {
            after.strip_prefix(*name).is_some_and(|rest| {
                !rest.chars().next().is_some_and(is_word_char) && !rest.starts_with("]]")
            })
        })
    }
}

/// ASCII letters, digits and `_`; a name touching one is part of a longer word.
const fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
