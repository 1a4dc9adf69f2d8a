use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("BUG: invalid WHITESPACE_RE regex literal"));

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Turn heading text into a URL fragment: accents stripped, whitespace
/// runs collapsed to `-`, lowercased.
///
/// Identical headings produce identical slugs; no de-duplication happens.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c == 'ç' { 'c' } else { c })
        .collect();

    WHITESPACE_RE
        .replace_all(&stripped, "-")
        .to_lowercase()
}
