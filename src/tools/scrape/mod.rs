//! Structured-data scraping: every JSON-LD block on the page, in document order.

mod tests;
mod utils;

pub use utils::{has_schema_type, parse_jsonld_block};
use utils::*;

use crate::tools::types::Jsonld;
use scraper::Html;

/// Scrape JSON-LD from HTML.
pub fn scrape_jsonld(html: &str) -> Jsonld {
    scrape_jsonld_doc(&Html::parse_document(html))
}

/// Scrape JSON-LD from an already parsed document.
///
/// Blocks that are not valid JSON are skipped, never fatal.
pub fn scrape_jsonld_doc(doc: &Html) -> Jsonld {
    scrape_jsonld_scripts(doc)
}

/// First JSON-LD object declaring `@type` Recipe, if any.
pub fn find_recipe(jsonld: &Jsonld) -> Option<&serde_json::Value> {
    jsonld.iter().find(|v| has_schema_type(v, "Recipe"))
}
