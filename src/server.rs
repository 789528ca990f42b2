//! HTTP hosting layer for the dashboard.
//!
//! The axum router is the external presentation surface: every request to
//! `/` triggers one full rendering pass (fetch all sources, extract,
//! render) and answers with the assembled page. `/api/news` runs the same
//! pass and answers with the JSON feed. The fetcher's response cache is the
//! only state shared between requests.

use axum::Router;
use axum::extract::State;
use axum::response::Html as HtmlPage;
use axum::routing::get;
use axum::Json;
use chrono::Local;
use std::error::Error;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use crate::fetch::PageFetcher;
use crate::models::SourceSpec;
use crate::outputs::{html, json};
use crate::pipeline;

/// Shared state behind the router: the fetcher (with its cache) and the
/// configured source set.
pub struct AppState {
    pub fetcher: PageFetcher,
    pub sources: Vec<SourceSpec>,
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/api/news", get(news_feed))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is killed.
pub async fn serve(bind: &str, state: Arc<AppState>) -> Result<(), Box<dyn Error>> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(%bind, "Dashboard listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[instrument(level = "info", skip_all)]
async fn dashboard(State(state): State<Arc<AppState>>) -> HtmlPage<String> {
    let reports = pipeline::run_pass(&state.fetcher, &state.sources).await;
    let generated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    HtmlPage(html::render_page(&reports, &generated_at))
}

#[instrument(level = "info", skip_all)]
async fn news_feed(State(state): State<Arc<AppState>>) -> Json<Vec<json::SourceFeed>> {
    let reports = pipeline::run_pass(&state.fetcher, &state.sources).await;
    Json(json::source_feeds(&reports))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{MemoryCache, NoCache};
    use crate::scrapers::cwcsr;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn listing_server(anchors: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(format!("<html><body>{anchors}</body></html>")),
            )
            .mount(&server)
            .await;
        server
    }

    fn state_with(sources: Vec<SourceSpec>) -> Arc<AppState> {
        Arc::new(AppState {
            fetcher: PageFetcher::new(Arc::new(NoCache)).expect("client builds"),
            sources,
        })
    }

    #[tokio::test]
    async fn test_dashboard_renders_extracted_articles() {
        let server = listing_server(r#"<a href="/article/123">ESG Report</a>"#).await;
        let state = state_with(vec![SourceSpec::new("CSR@天下", server.uri(), cwcsr::extract)]);

        let HtmlPage(page) = dashboard(State(state)).await;
        assert!(page.contains(html::PAGE_TITLE));
        assert!(page.contains("ESG Report"));
        assert!(page.contains("https://csr.cw.com.tw/article/123"));
    }

    #[tokio::test]
    async fn test_news_feed_reports_failures_as_warnings() {
        let state = state_with(vec![SourceSpec::new(
            "Down",
            "http://127.0.0.1:1/",
            cwcsr::extract,
        )]);

        let Json(feeds) = news_feed(State(state)).await;
        assert_eq!(feeds.len(), 1);
        assert!(feeds[0].articles.is_empty());
        assert!(feeds[0].warning.is_some());
    }

    #[tokio::test]
    async fn test_repeat_page_loads_reuse_the_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"<a href="/article/1">Once</a>"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let state = Arc::new(AppState {
            fetcher: PageFetcher::new(Arc::new(MemoryCache::new())).expect("client builds"),
            sources: vec![SourceSpec::new("Cached", server.uri(), cwcsr::extract)],
        });

        let HtmlPage(first) = dashboard(State(state.clone())).await;
        let HtmlPage(second) = dashboard(State(state)).await;
        assert!(first.contains("Once"));
        assert!(second.contains("Once"));
    }
}
