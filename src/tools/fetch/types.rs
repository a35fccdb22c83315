use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;

/// Something that turns a URL into the markup of the rendered document.
///
/// Implementations make a single attempt and give up after `timeout_ms`
/// with [`RecipeError::FetchTimeout`](crate::error::RecipeError::FetchTimeout).
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    async fn fetch_rendered_markup(&self, url: &str, timeout_ms: u64) -> Result<String>;
}

#[async_trait]
impl<R: PageRenderer + ?Sized> PageRenderer for Box<R> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn fetch_rendered_markup(&self, url: &str, timeout_ms: u64) -> Result<String> {
        (**self).fetch_rendered_markup(url, timeout_ms).await
    }
}

#[async_trait]
impl<R: PageRenderer + ?Sized> PageRenderer for Arc<R> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn fetch_rendered_markup(&self, url: &str, timeout_ms: u64) -> Result<String> {
        (**self).fetch_rendered_markup(url, timeout_ms).await
    }
}
