//! JSON feed generation for the API.
//!
//! Serializes a completed pass into the shape served at `/api/news`: one
//! entry per source, in configured order, with the extracted articles and
//! an optional warning string when the fetch failed.

use crate::models::{ArticleRecord, SourceReport};
use serde::Serialize;

/// One source's slice of the JSON feed.
#[derive(Debug, Serialize)]
pub struct SourceFeed {
    /// The source's display name.
    pub source: String,
    /// The listing page that was fetched.
    pub url: String,
    /// Articles in document order; empty on failure or zero matches.
    pub articles: Vec<ArticleRecord>,
    /// Human-readable fetch failure, when the page could not be retrieved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Convert a pass's reports into the JSON feed shape, preserving order.
pub fn source_feeds(reports: &[SourceReport]) -> Vec<SourceFeed> {
    reports
        .iter()
        .map(|report| SourceFeed {
            source: report.spec.name.clone(),
            url: report.spec.url.clone(),
            articles: report.records.clone(),
            warning: report.failure.as_ref().map(|failure| failure.to_string()),
        })
        .collect()
}
