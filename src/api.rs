use std::time::Instant;

use crate::error::Result;
use crate::log::ActivityLogger;
use crate::tools::batch::batch;
use crate::tools::fetch::{renderer_for, validate_source_url, PageRenderer};
use crate::tools::normalize::normalize_markup;
use crate::tools::render::{render_html, sanitize_html};
use crate::types::{Config, ExtractedRecipe};

// Logging never breaks the main operation
fn log_info(domain: Option<&str>, event: &str, details: Option<&str>) {
    if let Ok(logger) = ActivityLogger::new() {
        let _ = logger.info(domain, event, details);
    }
}

fn log_error(domain: Option<&str>, event: &str, details: Option<&str>) {
    if let Ok(logger) = ActivityLogger::new() {
        let _ = logger.error(domain, event, details);
    }
}

/* ------------ extractor ------------ */

/// URL in, sanitized recipe HTML out, through an injected [`PageRenderer`].
pub struct Extractor<R> {
    renderer: R,
    config: Config,
}

impl<R: PageRenderer> Extractor<R> {
    pub fn new(renderer: R, config: Config) -> Self {
        Self { renderer, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Validate, fetch, normalize, render. The URL is checked before any fetch.
    pub async fn extract_recipe(&self, url: &str) -> Result<ExtractedRecipe> {
        let start_time = Instant::now();
        let domain = validate_source_url(url, &self.config.source)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string));

        let result = self.run(url).await;
        let ms = start_time.elapsed().as_millis() as u64;

        match &result {
            Ok(recipe) => {
                tracing::info!(url, name = %recipe.name, ms, "extracted recipe");
                if self.config.activity_log {
                    let details = format!("succeeded in {ms}ms");
                    log_info(domain.as_deref(), "extract_recipe", Some(&details));
                }
            }
            Err(e) => {
                tracing::warn!(url, error = %e, ms, "extraction failed");
                if self.config.activity_log {
                    let details = format!("{} in {ms}ms", e.kind());
                    log_error(domain.as_deref(), "extract_recipe", Some(&details));
                }
            }
        }
        result
    }

    async fn run(&self, url: &str) -> Result<ExtractedRecipe> {
        let url = validate_source_url(url, &self.config.source)?;
        tracing::debug!(url = %url, renderer = self.renderer.name(), "fetching");
        let markup = self
            .renderer
            .fetch_rendered_markup(url.as_str(), self.config.fetch.timeout_ms)
            .await?;
        convert_markup(&markup, &self.config)
    }

    /// Convert many URLs, at most `concurrency` at a time. Results keep input order.
    pub async fn extract_many(
        &self,
        urls: Vec<String>,
        concurrency: usize,
    ) -> Vec<Result<ExtractedRecipe>> {
        batch(urls, concurrency, |url| async move {
            self.extract_recipe(&url).await
        })
        .await
    }
}

impl Extractor<Box<dyn PageRenderer>> {
    /// Extractor using the renderer named in `config.fetch`.
    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;
        let renderer = renderer_for(&config.fetch)?;
        Ok(Self::new(renderer, config))
    }
}

/* ------------ entrypoints ------------ */

/// Normalize already fetched markup into sanitized (unless disabled) HTML.
pub fn convert_markup(markup: &str, config: &Config) -> Result<ExtractedRecipe> {
    let recipe = normalize_markup(markup, config)?;
    let rendered = render_html(&recipe);
    let html = if config.sanitize {
        sanitize_html(&rendered)
    } else {
        rendered
    };
    Ok(ExtractedRecipe {
        html,
        name: recipe.name,
    })
}

/// Extract one recipe using the user configuration (or defaults).
pub async fn extract_recipe(url: &str) -> Result<ExtractedRecipe> {
    let config = Config::load_or_default(None)?;
    Extractor::from_config(config)?.extract_recipe(url).await
}

/// [`extract_recipe`] on the shared runtime, for synchronous callers.
pub fn extract_recipe_blocking(url: &str) -> Result<ExtractedRecipe> {
    crate::runtime::block_on(extract_recipe(url))
}

/// Extract several recipes with bounded concurrency; one result per URL.
pub async fn batch_convert(
    urls: Vec<String>,
    concurrency: usize,
) -> Result<Vec<Result<ExtractedRecipe>>> {
    let config = Config::load_or_default(None)?;
    let extractor = Extractor::from_config(config)?;
    Ok(extractor.extract_many(urls, concurrency).await)
}
