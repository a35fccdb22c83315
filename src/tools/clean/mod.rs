mod utils;

use utils::*;

/// Clean text scraped from the DOM.
///
/// Performs the following operations in order:
/// 1. Decode HTML entities (`&amp;` → `&`, `&#39;` → `'`)
/// 2. Normalize Unicode to NFC (canonical composition)
/// 3. Remove zero-width and control characters
/// 4. Normalize whitespace (collapse runs, trim)
///
/// # Examples
/// ```
/// use recipe_porter::tools::clean::clean;
///
/// let dirty = "  200g &amp; salmon\n\t fillets ";
/// assert_eq!(clean(dirty), "200g & salmon fillets");
/// ```
pub fn clean(text: &str) -> String {
    let decoded = decode_html_entities(text);
    let normalized = normalize_unicode(&decoded);
    let visible = remove_invisible_chars(&normalized);
    normalize_whitespace(&visible)
}

/// Clean a label for case-insensitive matching: trailing colons dropped, lowercased.
///
/// ```
/// use recipe_porter::tools::clean::clean_label;
///
/// assert_eq!(clean_label(" Calories: "), "calories");
/// ```
pub fn clean_label(text: &str) -> String {
    clean(&text.replace(':', "")).to_lowercase()
}
