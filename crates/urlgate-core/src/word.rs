//! Forbidden-word normalization and validity rule.
//!
//! A word is valid when it is non-empty and made only of Unicode letters
//! (general category L), Unicode digits (category N) and the apostrophe.
//! Callers normalize first (trim, then lower-case) and validate the
//! normalized form.

use regex::Regex;
use std::sync::OnceLock;

fn word_pattern() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"^[\p{L}\p{N}']+$").expect("static word pattern"))
}

/// Trim surrounding whitespace and lower-case.
pub fn normalize_word(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// True if `word` (already normalized) is non-empty and contains only
/// letters, digits and `'`.
pub fn is_valid_word(word: &str) -> bool {
    word_pattern().is_match(word)
}
