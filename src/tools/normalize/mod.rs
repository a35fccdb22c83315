//! Markup in, canonical [`Recipe`] out.

mod merge;

pub use merge::*;

use crate::error::{RecipeError, Result};
use crate::tools::extract::{extract_fallback, extract_structured, Recipe};
use crate::tools::scrape::scrape_jsonld_doc;
use crate::types::Config;
use scraper::Html;

/// Run both extraction passes over `markup` and merge them.
///
/// Fails with `MalformedInput` when the input is not markup at all, and with
/// `NoRecipeData` when name, ingredients and instructions all stay empty.
pub fn normalize_markup(markup: &str, config: &Config) -> Result<Recipe> {
    if markup.trim().is_empty() {
        return Err(RecipeError::MalformedInput("input is empty".into()));
    }
    if !markup.contains('<') {
        return Err(RecipeError::MalformedInput("input contains no markup".into()));
    }

    let doc = Html::parse_document(markup);
    let jsonld = scrape_jsonld_doc(&doc);
    let structured = extract_structured(&jsonld, &config.normalize);
    let fallback = extract_fallback(&doc, &config.selectors);
    tracing::debug!(
        jsonld_blocks = jsonld.len(),
        structured_name = !structured.name.is_empty(),
        fallback_name = !fallback.name.is_empty(),
        "extraction passes complete"
    );

    let recipe = merge(structured, fallback);
    if recipe.is_empty() {
        return Err(RecipeError::NoRecipeData);
    }
    Ok(recipe)
}
