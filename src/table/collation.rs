//! Locale-aware string ordering for table sorting.
//!
//! The ordering approximates root collation in three levels:
//!
//! 1. base letters, with accents removed and case folded;
//! 2. accents, when the base letters are equal;
//! 3. case, lowercase before uppercase.
//!
//! Letters such as `ł` or `ø` carry no decomposable accent, so they are
//! folded to their base letters explicitly. A final comparison on the
//! canonically decomposed string keeps the ordering total: two keys compare
//! equal only when their strings are canonically equivalent.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Precomputed sort key for one string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: String,
    secondary: String,
    tertiary: Vec<bool>,
    decomposed: String,
}

impl CollationKey {
    /// Builds the key for `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            primary: base_letters(text).flat_map(char::to_lowercase).collect(),
            secondary: text.nfd().flat_map(char::to_lowercase).collect(),
            tertiary: base_letters(text).map(char::is_uppercase).collect(),
            decomposed: text.nfd().collect(),
        }
    }
}

fn base_letters(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(fold_letter)
}

/// Maps letters with a built-in stroke or ligature to their base letters.
fn fold_letter(ch: char) -> impl Iterator<Item = char> {
    let (first, second) = match ch {
        '\u{142}' => ('l', None),
        '\u{141}' => ('L', None),
        '\u{111}' | '\u{f0}' => ('d', None),
        '\u{110}' | '\u{d0}' => ('D', None),
        '\u{f8}' => ('o', None),
        '\u{d8}' => ('O', None),
        '\u{127}' => ('h', None),
        '\u{126}' => ('H', None),
        '\u{167}' => ('t', None),
        '\u{166}' => ('T', None),
        '\u{131}' => ('i', None),
        '\u{df}' => ('s', Some('s')),
        '\u{1e9e}' => ('S', Some('S')),
        '\u{e6}' => ('a', Some('e')),
        '\u{c6}' => ('A', Some('E')),
        '\u{153}' => ('o', Some('e')),
        '\u{152}' => ('O', Some('E')),
        _ => (ch, None),
    };
    std::iter::once(first).chain(second)
}

/// Compares two strings with locale-aware ordering.
#[must_use]
pub fn compare(left: &str, right: &str) -> Ordering {
    CollationKey::new(left).cmp(&CollationKey::new(right))
}
