use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Mutex, MutexGuard};

use super::types::PageRenderer;
use crate::error::{RecipeError, Result};

/// A fixed set of renderer instances.
///
/// Each instance handles one navigation at a time; different instances run
/// in parallel. Callers pick a free instance, else wait on one round-robin.
pub struct RendererPool<R> {
    slots: Vec<Mutex<R>>,
    next: AtomicUsize,
}

impl<R: PageRenderer> RendererPool<R> {
    pub fn new(renderers: Vec<R>) -> Result<Self> {
        if renderers.is_empty() {
            return Err(RecipeError::InvalidInput(
                "renderer pool needs at least one instance".into(),
            ));
        }
        Ok(Self {
            slots: renderers.into_iter().map(Mutex::new).collect(),
            next: AtomicUsize::new(0),
        })
    }

    /// Build `size` instances with `make`.
    pub fn from_fn(size: usize, mut make: impl FnMut() -> Result<R>) -> Result<Self> {
        let renderers = (0..size).map(|_| make()).collect::<Result<Vec<_>>>()?;
        Self::new(renderers)
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }

    async fn acquire(&self) -> MutexGuard<'_, R> {
        let len = self.slots.len();
        let start = self.next.fetch_add(1, Ordering::Relaxed) % len;
        for offset in 0..len {
            if let Ok(guard) = self.slots[(start + offset) % len].try_lock() {
                return guard;
            }
        }
        self.slots[start].lock().await
    }
}

#[async_trait]
impl<R: PageRenderer> PageRenderer for RendererPool<R> {
    fn name(&self) -> &'static str {
        "pool"
    }

    async fn fetch_rendered_markup(&self, url: &str, timeout_ms: u64) -> Result<String> {
        let renderer = self.acquire().await;
        renderer.fetch_rendered_markup(url, timeout_ms).await
    }
}
