//! Data models for discovered news items and source configuration.
//!
//! This module defines the core data structures used throughout the application:
//! - [`ArticleRecord`]: One discovered news item (title + absolute link)
//! - [`SourceSpec`]: One configured news source (name, URL, extraction rule)
//! - [`SourceReport`]: The outcome of one source within a rendering pass
//!
//! Everything here is created fresh per rendering pass and dropped after the
//! page is rendered; only the fetcher's response cache outlives a pass.

use scraper::Html;
use serde::Serialize;
use url::Url;

use crate::fetch::FetchError;

/// An extraction rule: a pure function from a parsed document to the ordered
/// list of articles found in it.
///
/// Rules live in [`crate::scrapers`], one module per source. Keeping the type
/// a plain `fn` pointer means rules cannot smuggle in hidden state.
pub type Extractor = fn(&Html) -> Vec<ArticleRecord>;

/// A single news item discovered on a listing page.
///
/// Invariants are enforced at construction via [`ArticleRecord::from_parts`]:
/// the title is whitespace-trimmed and non-empty, and the link is a
/// well-formed absolute URL (scheme and host present).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleRecord {
    /// The article headline, trimmed.
    pub title: String,
    /// Absolute URL of the article.
    pub link: String,
}

impl ArticleRecord {
    /// Build a record from raw anchor parts, applying the inclusion rules.
    ///
    /// Returns `None` when the trimmed title is empty or the link is not an
    /// absolute URL with a host. Malformed anchors are skipped silently; the
    /// pages scraped here change markup without notice.
    pub fn from_parts(title: &str, link: &str) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let parsed = Url::parse(link).ok()?;
        if parsed.host_str().is_none() {
            return None;
        }
        Some(Self {
            title: title.to_string(),
            link: link.to_string(),
        })
    }
}

/// One configured news source: display label, page URL, and the extraction
/// rule applied to the fetched page.
///
/// The configured set lives in [`crate::scrapers::all`]. The orchestrator
/// works over any slice of specs, so adding a source is a new scraper module
/// plus one entry in `all()`, with no orchestrator changes.
#[derive(Debug, Clone)]
pub struct SourceSpec {
    /// Human-readable label shown as the section header.
    pub name: String,
    /// The listing page to fetch.
    pub url: String,
    /// The rule that turns the fetched page into article records.
    pub extractor: Extractor,
}

impl SourceSpec {
    pub fn new(name: impl Into<String>, url: impl Into<String>, extractor: Extractor) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            extractor,
        }
    }
}

/// The outcome of one source within a rendering pass.
///
/// A fetch failure is terminal for that source in that pass: `records` is
/// empty and `failure` carries the cause for user-facing reporting. An empty
/// `records` with no failure simply means the rule matched nothing.
#[derive(Debug)]
pub struct SourceReport {
    /// The source this report belongs to.
    pub spec: SourceSpec,
    /// Articles in document order; empty on fetch failure or zero matches.
    pub records: Vec<ArticleRecord>,
    /// The fetch failure, if the page could not be retrieved.
    pub failure: Option<FetchError>,
}

impl SourceReport {
    /// A report for a successfully fetched page (the rule may still have
    /// matched nothing).
    pub fn fetched(spec: SourceSpec, records: Vec<ArticleRecord>) -> Self {
        Self {
            spec,
            records,
            failure: None,
        }
    }

    /// A report for a source whose fetch failed.
    pub fn failed(spec: SourceSpec, failure: FetchError) -> Self {
        Self {
            spec,
            records: Vec::new(),
            failure: Some(failure),
        }
    }
}
