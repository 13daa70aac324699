//! Content hashing for translation keys.

/// Hashes `text` to a stable non-negative integer.
///
/// 31-multiplier rolling hash over UTF-16 code units with 32-bit wrapping arithmetic,
/// reinterpreted as unsigned. The result only busts caches; collisions are tolerated.
///
/// # Examples
/// ```
/// use hashed_i18n::hash::hash_text;
///
/// assert_eq!(hash_text("hello"), 99_162_322);
/// assert_eq!(hash_text(""), 0);
/// ```
#[must_use]
pub fn hash_text(text: &str) -> u32 {
    text.encode_utf16()
        .fold(0_u32, |hash, unit| hash.wrapping_mul(31).wrapping_add(u32::from(unit)))
}

/// Builds the hashed form of `key` for the given default text: `<key>.<hash>`.
#[must_use]
pub fn hashed_key(key: &str, default_value: &str) -> String {
    format!("{key}.{}", hash_text(default_value))
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::empty("", 0)]
    #[case::single_char("a", 97)]
    #[case::lowercase("hello", 99_162_322)]
    #[case::capitalized("Hello", 69_609_650)]
    #[case::wraps_to_sign_bit("polygenelubricants", 2_147_483_648)]
    #[case::sentence("Welcome to the Kanto region.", 1_825_715_479)]
    #[case::surrogate_pair("😀", 1_772_899)]
    fn hash_text_known_values(#[case] text: &str, #[case] expected: u32) {
        assert_that!(hash_text(text), eq(expected));
    }

    #[googletest::test]
    fn hash_text_is_deterministic() {
        let text = "Pikachu is here. Catch it!";

        expect_that!(hash_text(text), eq(hash_text(text)));
        expect_that!(hash_text(text), eq(4_199_161_944));
    }

    #[googletest::test]
    fn hashed_key_appends_hash_segment() {
        expect_that!(hashed_key("greeting", "hello"), eq("greeting.99162322"));
    }

    #[googletest::test]
    fn different_text_changes_the_key() {
        expect_that!(hashed_key("greeting", "hello"), not(eq(&hashed_key("greeting", "Hello"))));
    }
}
