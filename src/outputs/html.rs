//! Dashboard page rendering.
//!
//! Pure string rendering of a completed pass: one labeled section per
//! source, laid out as a fixed two-column page with the title, an intro
//! line, and a warning banner for every source whose fetch failed.
//!
//! A section with no records shows a single informational placeholder, the
//! same for "the rule matched nothing" and "the fetch failed"; the failure
//! cause is surfaced in the banner instead.

use crate::models::SourceReport;
use std::fmt::Write;

/// Heading shown at the top of the dashboard.
pub const PAGE_TITLE: &str = "🔍 ESG News Finder";

/// Intro line under the heading.
pub const PAGE_INTRO: &str = "蒐集台灣 ESG 永續新聞網站的最新資訊";

/// Shown in place of the link list when a source produced no records.
pub const EMPTY_PLACEHOLDER: &str = "⚠️ 找不到新聞或無法載入。";

const PAGE_STYLE: &str = "\
body { font-family: sans-serif; margin: 2rem auto; max-width: 72rem; padding: 0 1rem; }\n\
.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; }\n\
.warning { background: #fff3cd; border: 1px solid #ffe69c; padding: .5rem 1rem; margin: .5rem 0; }\n\
.placeholder { color: #555; }\n\
footer { margin-top: 2rem; color: #888; font-size: .85rem; }";

/// Escape text for safe interpolation into HTML body and attribute
/// positions.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render one source's labeled section.
///
/// A non-empty record list becomes a header plus one link entry per record
/// in list order; an empty list becomes the header plus the placeholder
/// message.
pub fn render_section(report: &SourceReport) -> String {
    let mut html = String::new();
    writeln!(html, "<section class=\"source\">").unwrap();
    writeln!(html, "<h2>{}</h2>", escape(&report.spec.name)).unwrap();
    if report.records.is_empty() {
        writeln!(html, "<p class=\"placeholder\">{EMPTY_PLACEHOLDER}</p>").unwrap();
    } else {
        writeln!(html, "<ul>").unwrap();
        for record in &report.records {
            writeln!(
                html,
                "<li><a href=\"{}\">{}</a></li>",
                escape(&record.link),
                escape(&record.title)
            )
            .unwrap();
        }
        writeln!(html, "</ul>").unwrap();
    }
    writeln!(html, "</section>").unwrap();
    html
}

/// Render the full dashboard page for one completed pass.
///
/// Sections appear in report order inside a two-column grid. Every fetch
/// failure additionally gets a warning banner above the columns carrying
/// the offending URL and cause text.
pub fn render_page(reports: &[SourceReport], generated_at: &str) -> String {
    let mut html = String::new();
    writeln!(html, "<!DOCTYPE html>").unwrap();
    writeln!(html, "<html lang=\"zh-Hant\">").unwrap();
    writeln!(html, "<head>").unwrap();
    writeln!(html, "<meta charset=\"utf-8\">").unwrap();
    writeln!(html, "<title>{}</title>", escape(PAGE_TITLE)).unwrap();
    writeln!(html, "<style>\n{PAGE_STYLE}\n</style>").unwrap();
    writeln!(html, "</head>").unwrap();
    writeln!(html, "<body>").unwrap();
    writeln!(html, "<h1>{}</h1>", escape(PAGE_TITLE)).unwrap();
    writeln!(html, "<p>{}</p>", escape(PAGE_INTRO)).unwrap();

    for report in reports {
        if let Some(failure) = &report.failure {
            writeln!(
                html,
                "<div class=\"warning\">⚠️ 無法連線至 {}：{}</div>",
                escape(failure.url()),
                escape(&failure.to_string())
            )
            .unwrap();
        }
    }

    writeln!(html, "<main class=\"columns\">").unwrap();
    for report in reports {
        html.push_str(&render_section(report));
    }
    writeln!(html, "</main>").unwrap();

    writeln!(html, "<footer>更新時間 {}</footer>", escape(generated_at)).unwrap();
    writeln!(html, "</body>").unwrap();
    writeln!(html, "</html>").unwrap();
    html
}
