//! Shared Selectors

use crate::types::Sel;
use once_cell::sync::Lazy;
use scraper::Selector;

/// Selector for JSON-LD script tags.
pub static JSONLD_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("script[type='application/ld+json']").expect("valid jsonld selector")
});

/// Selector for `<h2>` elements (instruction block boundaries).
pub static H2_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2").expect("valid h2 selector"));

/// Selector for list items inside a captured block.
pub static LIST_ITEM_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("li").expect("valid li selector"));

/// Compile a configured selector, skipping (and logging) invalid ones.
pub fn compile(sel: &Sel) -> Option<Selector> {
    match Selector::parse(&sel.0) {
        Ok(s) => Some(s),
        Err(e) => {
            tracing::warn!(selector = %sel.0, error = %e, "ignoring invalid selector");
            None
        }
    }
}

/// Compile a list of configured selectors, in order.
pub fn compile_all(sels: &[Sel]) -> Vec<Selector> {
    sels.iter().filter_map(compile).collect()
}
