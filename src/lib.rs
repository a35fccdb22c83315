#![doc = include_str!("../README.md")]

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod log;
pub mod runtime;
pub mod selectors;
pub mod store;
pub mod tools;
pub mod types;

pub use api::{
    batch_convert, convert_markup, extract_recipe, extract_recipe_blocking, Extractor,
};
pub use error::{RecipeError, Result};
pub use store::{slugify, unique_slug, MemoryStore, RecipeStore, StaticDir};
pub use tools::extract::{Nutrient, Nutrition, Recipe, Step};
pub use tools::fetch::{HttpRenderer, PageRenderer, RendererPool, ScopedRenderer};
#[cfg(feature = "headless")]
pub use tools::fetch::ChromeRenderer;
pub use tools::render::wrap_document;
pub use types::{Config, ExtractedRecipe};
