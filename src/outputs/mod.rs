//! Rendering of a completed pass into presentable output.
//!
//! # Submodules
//!
//! - [`html`]: The dashboard page served at `/` (and printed by `--once`)
//! - [`json`]: The machine-readable feed served at `/api/news`
//!
//! Both are pure functions over the pass's [`crate::models::SourceReport`]
//! list; neither touches the network or any global rendering context.

pub mod html;
pub mod json;
