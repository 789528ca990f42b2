//! CSR@天下 listing scraper.
//!
//! This module extracts headlines from [CSR@天下](https://csr.cw.com.tw/),
//! CommonWealth Magazine's sustainability portal. Article anchors on the
//! listing page carry site-relative paths under `/article/`, so links are
//! rebuilt by prepending the portal origin.

use crate::models::{ArticleRecord, SourceSpec};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

/// The listing page this rule reads.
pub const PAGE_URL: &str = "https://csr.cw.com.tw/";

/// Origin prepended to the relative article paths found on the page.
const ORIGIN: &str = "https://csr.cw.com.tw";

static ARTICLE_ANCHORS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[href^="/article/"]"#).unwrap());

/// The configured source entry for CSR@天下.
pub fn spec() -> SourceSpec {
    SourceSpec::new("CSR@天下", PAGE_URL, extract)
}

/// Extract article records from a parsed CSR@天下 listing page.
///
/// Selects every anchor whose `href` begins with `/article/`, takes the
/// trimmed text content as the title, and rebuilds the absolute link as
/// origin + path. Anchors with whitespace-only titles are skipped. Document
/// order is preserved; nothing is deduplicated or sorted.
pub fn extract(document: &Html) -> Vec<ArticleRecord> {
    let mut records = Vec::new();
    for anchor in document.select(&ARTICLE_ANCHORS) {
        if let Some(href) = anchor.value().attr("href") {
            let title = anchor.text().collect::<String>();
            let link = format!("{ORIGIN}{href}");
            if let Some(record) = ArticleRecord::from_parts(&title, &link) {
                records.push(record);
            }
        }
    }
    records
}
