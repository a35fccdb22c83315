use serde_json::Value;

use super::instructions::normalize_instructions;
use super::types::{Nutrient, Nutrition, RecipeCandidate};
use super::utils::{json_first_text, json_image, json_string_list, json_text};
use crate::types::NormalizeOptions;

/// Build a candidate from a schema.org `Recipe` object. Values are kept verbatim.
pub(super) fn recipe_from_jsonld(recipe: &Value, opts: &NormalizeOptions) -> RecipeCandidate {
    let text = |key: &str| recipe.get(key).map(json_text).unwrap_or_default();

    RecipeCandidate {
        name: text("name"),
        description: text("description"),
        image: recipe.get("image").map(json_image).unwrap_or_default(),
        prep_time: text("prepTime"),
        cook_time: text("cookTime"),
        total_time: text("totalTime"),
        serving_size: recipe
            .get("recipeYield")
            .map(json_first_text)
            .unwrap_or_default(),
        ingredients: recipe
            .get("recipeIngredient")
            .or_else(|| recipe.get("ingredients"))
            .map(json_string_list)
            .unwrap_or_default(),
        instructions: recipe
            .get("recipeInstructions")
            .map(|v| normalize_instructions(v, opts))
            .unwrap_or_default(),
        nutrition: recipe
            .get("nutrition")
            .map(nutrition_from_jsonld)
            .unwrap_or_default(),
    }
}

fn nutrition_from_jsonld(value: &Value) -> Nutrition {
    let mut nutrition = Nutrition::default();
    for nutrient in Nutrient::ALL {
        if let Some(v) = value.get(nutrient.schema_property()) {
            nutrition.set(nutrient, json_first_text(v));
        }
    }
    nutrition
}
