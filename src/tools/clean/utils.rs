/// Private helper functions for text cleaning
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Decode HTML entities (named and numeric).
pub(super) fn decode_html_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).to_string()
}

/// Normalize Unicode to NFC so composed and decomposed forms compare equal.
pub(super) fn normalize_unicode(text: &str) -> String {
    text.nfc().collect::<String>()
}

/// Remove zero-width characters and control characters.
///
/// Newlines and tabs survive here; whitespace normalization folds them later.
pub(super) fn remove_invisible_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(*c, '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}'))
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

/// Collapse whitespace runs (including non-breaking spaces) and trim.
pub(super) fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_REGEX
        .replace_all(&text.replace('\u{00A0}', " "), " ")
        .trim()
        .to_string()
}
