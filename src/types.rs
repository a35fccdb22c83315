use serde::{Deserialize, Serialize};

pub use crate::error::{RecipeError, Result};

/// CSS selector as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sel(pub String);

impl From<&str> for Sel {
    fn from(s: &str) -> Self {
        Sel(s.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// The one host recipes may be fetched from.
    pub host: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            host: crate::config::DEFAULT_SOURCE_HOST.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Plain HTTP GET, no script execution. Default only without `headless`.
    #[cfg_attr(not(feature = "headless"), default)]
    Http,
    /// Headless Chrome (requires the `headless` feature).
    #[cfg_attr(feature = "headless", default)]
    Headless,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_ms: u64,
    pub user_agent: String,
    /// Skip images, fonts, stylesheets and media while rendering.
    pub block_resources: bool,
    pub renderer: RendererKind,
    /// Number of engine instances kept by the pool.
    pub pool_size: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        crate::config::default_fetch_config()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Split narrative instruction strings at boundary phrases.
    pub split_narrative: bool,
    pub boundary_phrases: Vec<String>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            split_narrative: false,
            boundary_phrases: crate::config::default_boundary_phrases(),
        }
    }
}

/// Selectors for the DOM-fallback pass. An empty list disables that fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackSelectors {
    pub name: Vec<Sel>,
    pub description: Vec<Sel>,
    pub image: Vec<Sel>,
    pub ingredients: Vec<Sel>,
    /// Heading text that opens the labeled instructions block.
    pub instructions_label: String,
    pub instruction_sections: Vec<Sel>,
    pub section_title: Sel,
    pub section_items: Sel,
    pub serving_option: Vec<Sel>,
    pub serving_label: Sel,
    pub info_label: Vec<Sel>,
    pub info_value: Sel,
}

impl Default for FallbackSelectors {
    fn default() -> Self {
        crate::config::default_fallback_selectors()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub fetch: FetchConfig,
    pub normalize: NormalizeOptions,
    pub selectors: FallbackSelectors,
    /// Run the allow-list sanitizer over the rendered fragment.
    pub sanitize: bool,
    /// Append one line per extraction to the activity log.
    pub activity_log: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            fetch: FetchConfig::default(),
            normalize: NormalizeOptions::default(),
            selectors: FallbackSelectors::default(),
            sanitize: true,
            activity_log: true,
        }
    }
}

/// What callers get back: the HTML fragment plus a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecipe {
    pub html: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}
impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}
