//! Command-line interface definitions for ESG News Finder.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The source set itself is fixed in [`crate::scrapers::all`]; the flags
//! here only tune how the process hosts it.

use clap::Parser;

/// Command-line arguments for the ESG News Finder dashboard.
///
/// # Examples
///
/// ```sh
/// # Serve the dashboard on the default address
/// esg_news_finder
///
/// # Serve on a different address, without response memoization
/// esg_news_finder --bind 0.0.0.0:8080 --no-cache
///
/// # Run one rendering pass and print the page to stdout
/// esg_news_finder --once
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Address to bind the dashboard server on
    #[arg(short, long, default_value = "127.0.0.1:3000")]
    pub bind: String,

    /// Disable response memoization; every page load re-fetches the sources
    #[arg(long)]
    pub no_cache: bool,

    /// Run one rendering pass, print the dashboard HTML to stdout, and exit
    #[arg(long)]
    pub once: bool,
}
