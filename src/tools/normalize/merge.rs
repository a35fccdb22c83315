//! Per-field precedence: the structured value when non-empty, else the DOM value.

use crate::tools::extract::{Nutrient, Nutrition, Recipe, RecipeCandidate, Step};

fn prefer_text(structured: String, fallback: String) -> String {
    if structured.trim().is_empty() {
        fallback
    } else {
        structured
    }
}

fn prefer_list<T>(structured: Vec<T>, fallback: Vec<T>) -> Vec<T> {
    if structured.is_empty() {
        fallback
    } else {
        structured
    }
}

pub fn resolve_name(structured: String, fallback: String) -> String {
    prefer_text(structured, fallback)
}

pub fn resolve_description(structured: String, fallback: String) -> String {
    prefer_text(structured, fallback)
}

pub fn resolve_image(structured: String, fallback: String) -> String {
    prefer_text(structured, fallback)
}

pub fn resolve_prep_time(structured: String, fallback: String) -> String {
    prefer_text(structured, fallback)
}

pub fn resolve_cook_time(structured: String, fallback: String) -> String {
    prefer_text(structured, fallback)
}

pub fn resolve_total_time(structured: String, fallback: String) -> String {
    prefer_text(structured, fallback)
}

pub fn resolve_serving_size(structured: String, fallback: String) -> String {
    prefer_text(structured, fallback)
}

pub fn resolve_ingredients(structured: Vec<String>, fallback: Vec<String>) -> Vec<String> {
    prefer_list(structured, fallback)
}

pub fn resolve_instructions(structured: Vec<Step>, fallback: Vec<Step>) -> Vec<Step> {
    prefer_list(structured, fallback)
}

/// Each nutrient is resolved on its own; a structured calorie count does not
/// hide a DOM protein value.
pub fn resolve_nutrient(nutrient: Nutrient, structured: &Nutrition, fallback: &Nutrition) -> String {
    prefer_text(
        structured.get(nutrient).to_string(),
        fallback.get(nutrient).to_string(),
    )
}

pub fn resolve_nutrition(structured: Nutrition, fallback: Nutrition) -> Nutrition {
    let mut merged = Nutrition::default();
    for nutrient in Nutrient::ALL {
        merged.set(nutrient, resolve_nutrient(nutrient, &structured, &fallback));
    }
    merged
}

/// Merge the two candidates field by field.
pub fn merge(structured: RecipeCandidate, fallback: RecipeCandidate) -> Recipe {
    Recipe {
        name: resolve_name(structured.name, fallback.name),
        description: resolve_description(structured.description, fallback.description),
        image: resolve_image(structured.image, fallback.image),
        prep_time: resolve_prep_time(structured.prep_time, fallback.prep_time),
        cook_time: resolve_cook_time(structured.cook_time, fallback.cook_time),
        total_time: resolve_total_time(structured.total_time, fallback.total_time),
        serving_size: resolve_serving_size(structured.serving_size, fallback.serving_size),
        ingredients: resolve_ingredients(structured.ingredients, fallback.ingredients),
        instructions: resolve_instructions(structured.instructions, fallback.instructions),
        nutrition: resolve_nutrition(structured.nutrition, fallback.nutrition),
    }
}
