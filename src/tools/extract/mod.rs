//! The two extraction passes. Each returns a partial candidate; neither fails.

mod dom;
mod instructions;
mod jsonld;
pub mod types;
mod utils;

pub use instructions::{normalize_instructions, split_narrative};
pub use types::*;
pub use utils::parse_duration_text;

use crate::tools::scrape::find_recipe;
use crate::tools::types::Jsonld;
use crate::types::{FallbackSelectors, NormalizeOptions};
use scraper::Html;

/// Structured-data pass over already scraped JSON-LD.
///
/// Uses the first object typed `Recipe`; without one the candidate is empty.
pub fn extract_structured(jsonld: &Jsonld, opts: &NormalizeOptions) -> RecipeCandidate {
    match find_recipe(jsonld) {
        Some(recipe) => jsonld::recipe_from_jsonld(recipe, opts),
        None => {
            tracing::debug!(blocks = jsonld.len(), "no Recipe object in JSON-LD");
            RecipeCandidate::default()
        }
    }
}

/// DOM-fallback pass. Always computed; text is cleaned.
pub fn extract_fallback(doc: &Html, sels: &FallbackSelectors) -> RecipeCandidate {
    dom::recipe_from_dom(doc, sels)
}
