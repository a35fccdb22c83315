use async_trait::async_trait;
use std::time::Duration;

use super::types::PageRenderer;
use crate::error::{RecipeError, Result};

/// A running rendering engine, owned by one navigation.
#[async_trait]
pub trait Engine: Send + Sync {
    async fn render(&self, url: &str) -> Result<String>;

    /// Shut the engine down. Called exactly once per launch.
    async fn close(&mut self) -> Result<()>;
}

/// Starts a fresh [`Engine`] for each call.
#[async_trait]
pub trait Launcher: Send + Sync {
    type Engine: Engine;

    async fn launch(&self, url: &str) -> Result<Self::Engine>;
}

/// One engine per call, bounded by the timeout and closed whatever the outcome.
#[derive(Debug, Clone)]
pub struct ScopedRenderer<L> {
    launcher: L,
}

impl<L: Launcher> ScopedRenderer<L> {
    pub fn with_launcher(launcher: L) -> Self {
        Self { launcher }
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }
}

#[async_trait]
impl<L: Launcher> PageRenderer for ScopedRenderer<L> {
    fn name(&self) -> &'static str {
        "headless"
    }

    async fn fetch_rendered_markup(&self, url: &str, timeout_ms: u64) -> Result<String> {
        let wait = Duration::from_millis(timeout_ms);
        let mut engine = match tokio::time::timeout(wait, self.launcher.launch(url)).await {
            Ok(launched) => launched?,
            Err(_) => return Err(RecipeError::timeout(url, timeout_ms)),
        };

        let outcome = tokio::time::timeout(wait, engine.render(url)).await;

        if let Err(e) = engine.close().await {
            tracing::debug!(url, error = %e, "engine close failed");
        }

        match outcome {
            Ok(result) => result,
            Err(_) => Err(RecipeError::timeout(url, timeout_ms)),
        }
    }
}
