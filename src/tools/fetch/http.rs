use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::client::build_client;
use super::types::PageRenderer;
use super::utils::validate_response;
use crate::error::{RecipeError, Result};
use crate::types::FetchConfig;

/// Plain HTTP GET. Sees the server-rendered document only; no scripts run.
///
/// A fallback for builds without `headless`, or for pages whose recipe is in
/// the server response already.
#[derive(Debug, Clone)]
pub struct HttpRenderer {
    client: Client,
}

impl HttpRenderer {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
        })
    }

    async fn get(&self, url: &str, timeout_ms: u64) -> Result<String> {
        let response = self
            .client
            .get(url)
            .timeout(Duration::from_millis(timeout_ms))
            .send()
            .await
            .map_err(|e| send_error(url, timeout_ms, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| send_error(url, timeout_ms, e))?;

        validate_response(status, &body).map_err(|reason| RecipeError::fetch(url, reason))?;
        tracing::debug!(url, status = status.as_u16(), bytes = body.len(), "fetched page");
        Ok(body)
    }
}

fn send_error(url: &str, timeout_ms: u64, e: reqwest::Error) -> RecipeError {
    if e.is_timeout() {
        RecipeError::timeout(url, timeout_ms)
    } else {
        RecipeError::fetch(url, e.to_string())
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch_rendered_markup(&self, url: &str, timeout_ms: u64) -> Result<String> {
        let wait = Duration::from_millis(timeout_ms);
        match tokio::time::timeout(wait, self.get(url, timeout_ms)).await {
            Ok(result) => result,
            Err(_) => Err(RecipeError::timeout(url, timeout_ms)),
        }
    }
}
