//! The fetch-and-extract rendering pass.
//!
//! One pass fetches every configured source, applies each source's
//! extraction rule to the parsed page, and returns one [`SourceReport`] per
//! source. Fetches run concurrently, but the returned reports always follow
//! the configured source order so the rendered layout is deterministic.
//!
//! A source whose fetch fails yields an empty report carrying the failure;
//! it never blocks the other sources.

use crate::fetch::PageFetcher;
use crate::models::{SourceReport, SourceSpec};
use futures::stream::{self, StreamExt};
use scraper::Html;
use tracing::{info, instrument, warn};

/// How many source fetches may be in flight at once.
const PARALLEL_FETCHES: usize = 4;

/// Run one rendering pass over the configured sources.
///
/// Returns exactly one report per source, in the order given. Parsing and
/// extraction happen synchronously once a body arrives, so rules stay pure
/// functions of their own document.
#[instrument(level = "info", skip_all, fields(sources = sources.len()))]
pub async fn run_pass(fetcher: &PageFetcher, sources: &[SourceSpec]) -> Vec<SourceReport> {
    let start = std::time::Instant::now();

    let reports: Vec<SourceReport> = stream::iter(sources.iter().cloned())
        .map(|spec| async move {
            match fetcher.fetch(&spec.url).await {
                Ok(body) => {
                    let records = {
                        let document = Html::parse_document(&body);
                        (spec.extractor)(&document)
                    };
                    info!(source = %spec.name, count = records.len(), "Extracted articles");
                    SourceReport::fetched(spec, records)
                }
                Err(e) => {
                    warn!(
                        source = %spec.name,
                        url = %e.url(),
                        error = %e,
                        "Fetch failed; source will render as a placeholder"
                    );
                    SourceReport::failed(spec, e)
                }
            }
        })
        .buffered(PARALLEL_FETCHES)
        .collect()
        .await;

    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        articles = reports.iter().map(|r| r.records.len()).sum::<usize>(),
        failures = reports.iter().filter(|r| r.failure.is_some()).count(),
        "Rendering pass complete"
    );
    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::NoCache;
    use crate::scrapers::cwcsr;
    use std::sync::Arc;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> PageFetcher {
        PageFetcher::new(Arc::new(NoCache)).expect("client builds")
    }

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

    #[tokio::test]
    async fn test_reports_follow_configured_order() {
        let first = listing_server(r#"<a href="/article/1">First source</a>"#).await;
        let second = listing_server(r#"<a href="/article/2">Second source</a>"#).await;

        let sources = vec![
            SourceSpec::new("One", first.uri(), cwcsr::extract),
            SourceSpec::new("Two", second.uri(), cwcsr::extract),
        ];
        let reports = run_pass(&fetcher(), &sources).await;

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].spec.name, "One");
        assert_eq!(reports[0].records[0].title, "First source");
        assert_eq!(reports[1].spec.name, "Two");
        assert_eq!(reports[1].records[0].title, "Second source");
    }

    #[tokio::test]
    async fn test_one_failure_does_not_block_other_sources() {
        let healthy = listing_server(
            r#"<a href="/article/10">Alive</a><a href="/article/11">And well</a>"#,
        )
        .await;

        let sources = vec![
            SourceSpec::new("Down", "http://127.0.0.1:1/", cwcsr::extract),
            SourceSpec::new("Up", healthy.uri(), cwcsr::extract),
        ];
        let reports = run_pass(&fetcher(), &sources).await;

        assert_eq!(reports.len(), 2);
        assert!(reports[0].failure.is_some());
        assert!(reports[0].records.is_empty());
        assert!(reports[1].failure.is_none());
        assert_eq!(reports[1].records.len(), 2);
    }

    #[tokio::test]
    async fn test_zero_matches_is_not_a_failure() {
        let empty = listing_server(r#"<a href="/about">Nothing matching</a>"#).await;

        let sources = vec![SourceSpec::new("Quiet", empty.uri(), cwcsr::extract)];
        let reports = run_pass(&fetcher(), &sources).await;

        assert!(reports[0].failure.is_none());
        assert!(reports[0].records.is_empty());
    }
}
