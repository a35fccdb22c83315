use crate::{error::*, types::*};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SOURCE_HOST: &str = "www.mindfulchef.com";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36";

pub fn default_fetch_config() -> FetchConfig {
    FetchConfig {
        timeout_ms: DEFAULT_TIMEOUT_MS,
        user_agent: DEFAULT_USER_AGENT.into(),
        block_resources: true,
        renderer: RendererKind::default(),
        pool_size: 1,
    }
}

pub fn default_boundary_phrases() -> Vec<String> {
    ["Meanwhile", "Once", "While", "When", "Finally", "To serve"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn default_fallback_selectors() -> FallbackSelectors {
    FallbackSelectors {
        name: vec!["h1".into()],
        description: vec!["p".into()],
        image: vec!["img[alt]".into()],
        ingredients: vec!["section.ingredients ul li".into()],
        instructions_label: "cooking instructions".into(),
        instruction_sections: vec!["section.instructions .instruction-section".into()],
        section_title: "h3".into(),
        section_items: ".content p, li".into(),
        // Headless rendering mirrors the live checked state into this attribute.
        serving_option: vec![r#"input[type="radio"][checked]"#.into()],
        serving_label: r#"[data-testid$="-label"]"#.into(),
        info_label: vec![r#"span[data-testid="recipe-details-info-name"]"#.into()],
        info_value: r#"span[data-testid="recipe-details-info-value"]"#.into(),
    }
}

/// Location of the optional user config file.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("io", "recipe-porter", "recipe-porter")
        .map(|proj| proj.config_dir().join("config.json"))
}

impl Config {
    /// Load from an explicit JSON file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    /// Explicit path, else the user config file when it exists, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(p) = path {
            return Self::load(p);
        }
        match default_config_path() {
            Some(p) if p.exists() => Self::load(&p),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.source.host.trim().is_empty() {
            return Err(RecipeError::InvalidInput("source host cannot be empty".into()));
        }
        if self.fetch.timeout_ms == 0 {
            return Err(RecipeError::InvalidInput("fetch timeout must be positive".into()));
        }
        if self.fetch.pool_size == 0 {
            return Err(RecipeError::InvalidInput("pool size must be at least 1".into()));
        }
        Ok(())
    }
}
