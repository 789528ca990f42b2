//! # ESG News Finder
//!
//! A small dashboard that collects the latest headlines from Taiwanese ESG
//! news portals and lays them out side by side, one column per source.
//!
//! ## Sources
//!
//! - CSR@天下 (csr.cw.com.tw): CommonWealth Magazine's sustainability portal
//! - 中央社永續 (cna.com.tw): Central News Agency's sustainability listing
//!
//! ## Usage
//!
//! ```sh
//! esg_news_finder --bind 127.0.0.1:3000
//! ```
//!
//! ## Architecture
//!
//! Each page load runs one rendering pass through a short pipeline:
//! 1. **Fetching**: Download every configured listing page (browser
//!    identity, 10 s timeout, memoized per URL for the process lifetime)
//! 2. **Extraction**: Apply each source's selector rule to its parsed page
//! 3. **Rendering**: Assemble the two-column dashboard (or the JSON feed)
//!
//! A source that cannot be fetched renders as a placeholder column with a
//! warning banner; it never takes the rest of the page down with it.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod fetch;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod server;

use cli::Cli;
use fetch::{BodyCache, MemoryCache, NoCache, PageFetcher};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("esg_news_finder starting up");

    let args = Cli::parse();
    debug!(?args.bind, args.no_cache, args.once, "Parsed CLI arguments");

    let cache: Arc<dyn BodyCache> = if args.no_cache {
        Arc::new(NoCache)
    } else {
        Arc::new(MemoryCache::new())
    };
    let fetcher = PageFetcher::new(cache)?;

    let sources = scrapers::all();
    info!(count = sources.len(), "Configured news sources");

    if args.once {
        let reports = pipeline::run_pass(&fetcher, &sources).await;
        let generated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        println!("{}", outputs::html::render_page(&reports, &generated_at));

        let elapsed = start_time.elapsed();
        info!(?elapsed, secs = elapsed.as_secs(), "Execution complete");
        return Ok(());
    }

    let state = Arc::new(server::AppState { fetcher, sources });
    server::serve(&args.bind, state).await
}
