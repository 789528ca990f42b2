//! 中央社永續 (CNA sustainability) listing scraper.
//!
//! Extracts headlines from the [Central News Agency](https://www.cna.com.tw)
//! sustainability listing. Unlike CSR@天下, anchors here already carry
//! absolute URLs, but the page mixes in ad and script anchors, so only
//! `https://` links are kept.

use crate::models::{ArticleRecord, SourceSpec};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

/// The listing page this rule reads.
pub const PAGE_URL: &str = "https://www.cna.com.tw/list/ahel.aspx";

static WRAPPER_ANCHORS: Lazy<Selector> = Lazy::new(|| Selector::parse(".wrapper a").unwrap());

/// The configured source entry for 中央社永續.
pub fn spec() -> SourceSpec {
    SourceSpec::new("中央社永續", PAGE_URL, extract)
}

/// Extract article records from a parsed CNA listing page.
///
/// Selects every anchor nested under an element with class `wrapper` and
/// takes the `href` verbatim as the link. Anchors whose `href` does not
/// start with `https://` (relative paths, `javascript:` handlers) and
/// anchors with whitespace-only titles are skipped. Document order is
/// preserved; nothing is deduplicated.
pub fn extract(document: &Html) -> Vec<ArticleRecord> {
    let mut records = Vec::new();
    for anchor in document.select(&WRAPPER_ANCHORS) {
        if let Some(href) = anchor.value().attr("href") {
            if !href.starts_with("https://") {
                continue;
            }
            let title = anchor.text().collect::<String>();
            if let Some(record) = ArticleRecord::from_parts(&title, href) {
                records.push(record);
            }
        }
    }
    records
}
