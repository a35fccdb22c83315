use super::headers::browser_headers;
use crate::error::{RecipeError, Result};
use crate::types::FetchConfig;
use reqwest::{redirect, Client};
use std::time::Duration;

const REDIRECT_LIMIT: usize = 10;
const POOL_IDLE_TIMEOUT_SEC: u64 = 90;

/// Build the reqwest client used by [`HttpRenderer`](super::HttpRenderer).
pub(super) fn build_client(config: &FetchConfig) -> Result<Client> {
    Client::builder()
        .default_headers(browser_headers(&config.user_agent))
        .cookie_store(true)
        .redirect(redirect::Policy::limited(REDIRECT_LIMIT))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .timeout(Duration::from_millis(config.timeout_ms))
        .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SEC))
        .build()
        .map_err(|e| RecipeError::InvalidInput(format!("failed to build HTTP client: {e}")))
}
