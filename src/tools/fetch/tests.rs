#[cfg(test)]
mod tests {
    use crate::error::{RecipeError, Result};
    use crate::tools::fetch::headers::browser_headers;
    use crate::tools::fetch::utils::{canonical_host, validate_response};
    use crate::tools::fetch::*;
    use crate::types::{FetchConfig, SourceConfig};
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn source() -> SourceConfig {
        SourceConfig::default()
    }

    #[test]
    fn accepts_source_urls() {
        let url = validate_source_url("https://www.mindfulchef.com/recipes/salmon", &source())
            .unwrap();
        assert_eq!(url.path(), "/recipes/salmon");
        assert!(validate_source_url("  https://WWW.MindfulChef.com./x  ", &source()).is_ok());
        assert!(validate_source_url("https://www.mindfulchef.com:443/x", &source()).is_ok());
    }

    #[test]
    fn rejects_other_hosts_and_schemes() {
        for raw in [
            "https://not-the-source.example.com/x",
            "http://www.mindfulchef.com/x",
            "https://mindfulchef.com/x",
            "https://www.mindfulchef.com.evil.example/x",
            "https://user:pw@www.mindfulchef.com/x",
            "https://www.mindfulchef.com:8443/x",
            "ftp://www.mindfulchef.com/x",
            "not a url",
            "",
        ] {
            let err = validate_source_url(raw, &source()).unwrap_err();
            assert!(matches!(err, RecipeError::InvalidInput(_)), "{raw}");
        }
    }

    #[test]
    fn host_comparison_uses_idna() {
        assert_eq!(canonical_host("Bücher.Example"), Some("xn--bcher-kva.example".into()));
        let source = SourceConfig {
            host: "bücher.example".into(),
        };
        assert!(validate_source_url("https://xn--bcher-kva.example/r", &source).is_ok());
        assert_eq!(canonical_host("  "), None);
    }

    #[test]
    fn browser_headers_include_user_agent() {
        let headers = browser_headers("TestAgent/1.0");
        assert_eq!(
            headers.get("user-agent").and_then(|v| v.to_str().ok()),
            Some("TestAgent/1.0")
        );
        assert_eq!(
            headers
                .get("sec-ch-ua-platform")
                .and_then(|v| v.to_str().ok()),
            Some("\"Windows\"")
        );
    }

    #[test]
    fn invalid_user_agent_falls_back() {
        let headers = browser_headers("bad\nagent");
        assert_eq!(
            headers.get("user-agent").and_then(|v| v.to_str().ok()),
            Some("Mozilla/5.0")
        );
    }

    #[test]
    fn non_success_without_body_fails() {
        let err = validate_response(StatusCode::NOT_FOUND, "  ").unwrap_err();
        assert!(err.contains("404"));
    }

    #[test]
    fn non_success_with_body_is_accepted() {
        assert!(validate_response(StatusCode::NOT_FOUND, "<html><h1>Soup</h1></html>").is_ok());
    }

    #[test]
    fn bot_challenge_is_rejected() {
        let html = "<html><body>Checking your browser... cf-browser-verification</body></html>";
        let err = validate_response(StatusCode::OK, html).unwrap_err();
        assert!(err.contains("bot challenge"));
        assert!(err.contains("cf-browser-verification"));
    }

    #[test]
    fn challenge_text_with_jsonld_is_accepted() {
        let html = r#"<script type="application/ld+json">{}</script><p>px-captcha</p>"#;
        assert!(validate_response(StatusCode::OK, html).is_ok());
    }

    /// Serve one canned response per accepted connection.
    fn serve(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}/recipe")
    }

    #[tokio::test]
    async fn http_renderer_returns_body() {
        let url = serve(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 20\r\nConnection: close\r\n\r\n<h1>Pea Risotto</h1>",
        );
        let renderer = HttpRenderer::new(&FetchConfig::default()).unwrap();
        let body = renderer.fetch_rendered_markup(&url, 5_000).await.unwrap();
        assert_eq!(body, "<h1>Pea Risotto</h1>");
    }

    #[tokio::test]
    async fn http_renderer_empty_error_is_fetch_error() {
        let url = serve("HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        let renderer = HttpRenderer::new(&FetchConfig::default()).unwrap();
        let err = renderer.fetch_rendered_markup(&url, 5_000).await.unwrap_err();
        assert!(matches!(err, RecipeError::Fetch { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn http_renderer_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let held: Vec<_> = listener.incoming().take(1).collect();
            std::thread::sleep(Duration::from_secs(5));
            drop(held);
        });

        let renderer = HttpRenderer::new(&FetchConfig::default()).unwrap();
        let err = renderer
            .fetch_rendered_markup(&format!("http://{addr}/slow"), 200)
            .await
            .unwrap_err();
        assert!(matches!(err, RecipeError::FetchTimeout { timeout_ms: 200, .. }), "{err:?}");
    }

    /// Records how many calls are inside any instance at once.
    struct SlowRenderer {
        in_flight: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl PageRenderer for SlowRenderer {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn fetch_rendered_markup(&self, url: &str, _timeout_ms: u64) -> Result<String> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(30)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(url.to_string())
        }
    }

    fn pool_of(size: usize) -> (RendererPool<SlowRenderer>, Arc<AtomicUsize>) {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let pool = RendererPool::from_fn(size, || {
            Ok(SlowRenderer {
                in_flight: in_flight.clone(),
                peak: peak.clone(),
            })
        })
        .unwrap();
        (pool, peak)
    }

    #[tokio::test]
    async fn single_instance_pool_serializes_calls() {
        let (pool, peak) = pool_of(1);
        let calls = (0..4).map(|i| pool.fetch_rendered_markup(if i % 2 == 0 { "a" } else { "b" }, 1_000));
        let results = futures_util::future::join_all(calls).await;
        assert!(results.iter().all(|r| r.is_ok()));
        assert_eq!(peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn pool_runs_instances_in_parallel() {
        let (pool, peak) = pool_of(3);
        let calls = (0..3).map(|_| pool.fetch_rendered_markup("u", 1_000));
        let results = futures_util::future::join_all(calls).await;
        assert_eq!(results.len(), 3);
        assert!(peak.load(Ordering::SeqCst) > 1);
        assert_eq!(pool.size(), 3);
    }

    #[test]
    fn empty_pool_is_rejected() {
        let pool = RendererPool::<SlowRenderer>::new(Vec::new());
        assert!(matches!(pool, Err(RecipeError::InvalidInput(_))));
    }

    #[derive(Default)]
    struct Lifecycle {
        launched: AtomicUsize,
        closed: AtomicUsize,
    }

    /// Launches engines that render `markup`, fail, or stall based on the URL.
    #[derive(Clone, Default)]
    struct CountingLauncher {
        counts: Arc<Lifecycle>,
        fail_launch: bool,
    }

    struct CountingEngine {
        counts: Arc<Lifecycle>,
    }

    #[async_trait]
    impl Launcher for CountingLauncher {
        type Engine = CountingEngine;

        async fn launch(&self, url: &str) -> Result<CountingEngine> {
            if self.fail_launch {
                return Err(RecipeError::fetch(url, "no browser"));
            }
            self.counts.launched.fetch_add(1, Ordering::SeqCst);
            Ok(CountingEngine {
                counts: self.counts.clone(),
            })
        }
    }

    #[async_trait]
    impl Engine for CountingEngine {
        async fn render(&self, url: &str) -> Result<String> {
            if url.contains("broken") {
                return Err(RecipeError::fetch(url, "navigation failed"));
            }
            if url.contains("slow") {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            Ok(format!("<h1>{url}</h1>"))
        }

        async fn close(&mut self) -> Result<()> {
            self.counts.closed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn lifecycle(launcher: &CountingLauncher) -> (usize, usize) {
        (
            launcher.counts.launched.load(Ordering::SeqCst),
            launcher.counts.closed.load(Ordering::SeqCst),
        )
    }

    #[tokio::test]
    async fn scoped_renderer_closes_after_success() {
        let renderer = ScopedRenderer::with_launcher(CountingLauncher::default());
        let body = renderer.fetch_rendered_markup("ok", 1_000).await.unwrap();
        assert_eq!(body, "<h1>ok</h1>");
        assert_eq!(lifecycle(renderer.launcher()), (1, 1));
    }

    #[tokio::test]
    async fn scoped_renderer_closes_after_render_error() {
        let renderer = ScopedRenderer::with_launcher(CountingLauncher::default());
        let err = renderer.fetch_rendered_markup("broken", 1_000).await.unwrap_err();
        assert!(matches!(err, RecipeError::Fetch { .. }), "{err:?}");
        assert_eq!(lifecycle(renderer.launcher()), (1, 1));
    }

    #[tokio::test]
    async fn scoped_renderer_closes_after_timeout() {
        let renderer = ScopedRenderer::with_launcher(CountingLauncher::default());
        let err = renderer.fetch_rendered_markup("slow", 50).await.unwrap_err();
        assert!(matches!(err, RecipeError::FetchTimeout { timeout_ms: 50, .. }), "{err:?}");
        assert_eq!(lifecycle(renderer.launcher()), (1, 1));
    }

    #[tokio::test]
    async fn scoped_renderer_launch_failure_has_nothing_to_close() {
        let renderer = ScopedRenderer::with_launcher(CountingLauncher {
            fail_launch: true,
            ..Default::default()
        });
        let err = renderer.fetch_rendered_markup("ok", 1_000).await.unwrap_err();
        assert!(matches!(err, RecipeError::Fetch { .. }), "{err:?}");
        assert_eq!(lifecycle(renderer.launcher()), (0, 0));
    }

    #[tokio::test]
    async fn pooled_scoped_renderers_release_every_engine() {
        let launcher = CountingLauncher::default();
        let pool = RendererPool::from_fn(2, || Ok(ScopedRenderer::with_launcher(launcher.clone())))
            .unwrap();
        let urls = ["ok", "broken", "slow", "ok"];
        let calls = urls.iter().map(|u| pool.fetch_rendered_markup(u, 50));
        let results = futures_util::future::join_all(calls).await;

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 2);
        assert_eq!(lifecycle(&launcher), (4, 4));
    }

    #[cfg(not(feature = "headless"))]
    #[test]
    fn headless_needs_feature() {
        let config = FetchConfig {
            renderer: crate::types::RendererKind::Headless,
            ..Default::default()
        };
        assert!(matches!(renderer_for(&config), Err(RecipeError::InvalidInput(_))));
    }

    #[cfg(feature = "headless")]
    #[test]
    fn headless_renderer_is_the_default() {
        let renderer = renderer_for(&FetchConfig::default()).unwrap();
        assert_eq!(renderer.name(), "pool");
        let http = FetchConfig {
            renderer: crate::types::RendererKind::Http,
            ..Default::default()
        };
        assert_eq!(renderer_for(&http).unwrap().name(), "http");
    }
}
