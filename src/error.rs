use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecipeError>;

#[derive(Debug, Error)]
pub enum RecipeError {
    /// URL has the wrong shape or points outside the supported source.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("timed out after {timeout_ms}ms rendering {url}")]
    FetchTimeout { url: String, timeout_ms: u64 },

    /// Page was reached but neither pass recovered a name, ingredients or instructions.
    #[error("no recipe data found on page")]
    NoRecipeData,

    #[error("malformed markup: {0}")]
    MalformedInput(String),

    /* Conversions so `?` works smoothly in stores and config loading */
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl RecipeError {
    pub fn fetch(url: &str, reason: impl Into<String>) -> Self {
        RecipeError::Fetch {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    pub fn timeout(url: &str, timeout_ms: u64) -> Self {
        RecipeError::FetchTimeout {
            url: url.to_string(),
            timeout_ms,
        }
    }

    /// Short machine-friendly kind, used by the activity log and CLI envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            RecipeError::InvalidInput(_) => "invalid_input",
            RecipeError::Fetch { .. } => "fetch",
            RecipeError::FetchTimeout { .. } => "fetch_timeout",
            RecipeError::NoRecipeData => "no_recipe_data",
            RecipeError::MalformedInput(_) => "malformed_input",
            RecipeError::Io(_) => "io",
            RecipeError::Json(_) => "json",
        }
    }
}

impl From<reqwest::Error> for RecipeError {
    fn from(e: reqwest::Error) -> Self {
        let url = e.url().map(|u| u.to_string()).unwrap_or_default();
        RecipeError::Fetch {
            url,
            reason: e.to_string(),
        }
    }
}
