//! Page fetching: URL validation and the [`PageRenderer`] implementations.

mod client;
mod headers;
#[cfg(feature = "headless")]
mod headless;
mod http;
mod pool;
mod scoped;
mod tests;
mod utils;

pub mod types;

pub use http::HttpRenderer;
pub use pool::RendererPool;
pub use scoped::{Engine, Launcher, ScopedRenderer};
pub use types::*;

#[cfg(feature = "headless")]
pub use headless::{ChromeLauncher, ChromeRenderer, ChromeSession};

use crate::error::{RecipeError, Result};
use crate::types::{FetchConfig, RendererKind, SourceConfig};
use url::Url;

/// Check that `raw` is an `https` URL on the configured source host and the
/// default port.
///
/// Runs before any network activity; every failure is `InvalidInput`.
///
/// # Examples
/// ```
/// use recipe_porter::tools::fetch::validate_source_url;
/// use recipe_porter::types::SourceConfig;
///
/// let source = SourceConfig::default();
/// assert!(validate_source_url("https://www.mindfulchef.com/recipes/x", &source).is_ok());
/// assert!(validate_source_url("https://not-the-source.example.com/x", &source).is_err());
/// ```
pub fn validate_source_url(raw: &str, source: &SourceConfig) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| RecipeError::InvalidInput(format!("not a valid URL ({e}): {raw}")))?;

    if url.scheme() != "https" {
        return Err(RecipeError::InvalidInput(format!(
            "only https URLs are supported, got {}",
            url.scheme()
        )));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(RecipeError::InvalidInput(
            "URLs with credentials are not supported".into(),
        ));
    }

    if let Some(port) = url.port() {
        return Err(RecipeError::InvalidInput(format!(
            "non-default port {port} is not supported"
        )));
    }

    let expected = utils::canonical_host(&source.host).ok_or_else(|| {
        RecipeError::InvalidInput(format!("configured source host is invalid: {}", source.host))
    })?;
    let actual = url.host_str().and_then(utils::canonical_host);
    if actual.as_deref() != Some(expected.as_str()) {
        return Err(RecipeError::InvalidInput(format!(
            "unsupported host {}, expected {expected}",
            url.host_str().unwrap_or("<none>")
        )));
    }

    Ok(url)
}

/// Renderer selected by `config.renderer`.
///
/// Headless is the default whenever the `headless` feature is built. The HTTP
/// renderer sees only server-sent markup and serves as a fallback for pages
/// that carry their recipe without client-side rendering.
pub fn renderer_for(config: &FetchConfig) -> Result<Box<dyn PageRenderer>> {
    match config.renderer {
        RendererKind::Http => Ok(Box::new(HttpRenderer::new(config)?)),
        #[cfg(feature = "headless")]
        RendererKind::Headless => Ok(Box::new(RendererPool::from_fn(config.pool_size, || {
            Ok(ChromeRenderer::new(config))
        })?)),
        #[cfg(not(feature = "headless"))]
        RendererKind::Headless => Err(RecipeError::InvalidInput(
            "headless rendering needs the `headless` feature".into(),
        )),
    }
}
