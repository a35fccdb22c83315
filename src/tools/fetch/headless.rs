use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{EnableParams, SetBlockedUrLsParams};
use chromiumoxide::error::CdpError;
use futures_util::StreamExt;
use tokio::task::JoinHandle;

use super::scoped::{Engine, Launcher, ScopedRenderer};
use crate::error::{RecipeError, Result};
use crate::types::FetchConfig;

/// Sub-resources skipped while rendering. None of them change the DOM.
const BLOCKED_PATTERNS: &[&str] = &[
    "*.png", "*.jpg", "*.jpeg", "*.gif", "*.webp", "*.avif", "*.svg", "*.ico", "*.woff",
    "*.woff2", "*.ttf", "*.otf", "*.css", "*.mp4", "*.webm", "*.mp3",
];

/// Serialized markup only carries attributes, so mirror the live form state
/// (a radio checked by script after load) into `checked` before reading it.
const SYNC_CHECKED_STATE: &str = "document.querySelectorAll('input').forEach(i => i.toggleAttribute('checked', i.checked))";

/// Headless Chrome. Launches one browser per call and always closes it.
pub type ChromeRenderer = ScopedRenderer<ChromeLauncher>;

impl ChromeRenderer {
    pub fn new(config: &FetchConfig) -> Self {
        ScopedRenderer::with_launcher(ChromeLauncher {
            user_agent: config.user_agent.clone(),
            block_resources: config.block_resources,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    user_agent: String,
    block_resources: bool,
}

#[async_trait]
impl Launcher for ChromeLauncher {
    type Engine = ChromeSession;

    async fn launch(&self, url: &str) -> Result<ChromeSession> {
        let config = BrowserConfig::builder()
            .arg(format!("--user-agent={}", self.user_agent))
            .build()
            .map_err(|e| RecipeError::fetch(url, format!("browser config: {e}")))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| RecipeError::fetch(url, format!("launch browser: {e}")))?;
        let events = tokio::spawn(async move { while handler.next().await.is_some() {} });

        Ok(ChromeSession {
            url: url.to_string(),
            browser,
            events,
            block_resources: self.block_resources,
        })
    }
}

pub struct ChromeSession {
    url: String,
    browser: Browser,
    events: JoinHandle<()>,
    block_resources: bool,
}

#[async_trait]
impl Engine for ChromeSession {
    async fn render(&self, url: &str) -> Result<String> {
        let fail = |stage: &str, e: CdpError| RecipeError::fetch(url, format!("{stage}: {e}"));

        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| fail("new page", e))?;

        if self.block_resources {
            page.execute(EnableParams::default())
                .await
                .map_err(|e| fail("enable network", e))?;
            let patterns = BLOCKED_PATTERNS.iter().map(|p| p.to_string()).collect();
            page.execute(SetBlockedUrLsParams::new(patterns))
                .await
                .map_err(|e| fail("block resources", e))?;
        }

        page.goto(url).await.map_err(|e| fail("navigate", e))?;
        page.wait_for_navigation()
            .await
            .map_err(|e| fail("wait for load", e))?;
        page.evaluate(SYNC_CHECKED_STATE)
            .await
            .map_err(|e| fail("read form state", e))?;
        page.content().await.map_err(|e| fail("read content", e))
    }

    async fn close(&mut self) -> Result<()> {
        let closed = self.browser.close().await;
        let _ = self.browser.wait().await;
        self.events.abort();
        closed
            .map(|_| ())
            .map_err(|e| RecipeError::fetch(&self.url, format!("close browser: {e}")))
    }
}
