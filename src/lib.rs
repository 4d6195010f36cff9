//! # linkscout
//!
//! For every site in a list, find the single page most relevant to a keyword
//! and, optionally, verify that the page links out to a non-ignored external
//! domain. One result row per site: a chosen URL (or nothing) plus a note —
//! the chosen page's first outbound link, or the reason nothing qualified.
//!
//! ## Design
//!
//! - Four independent content sources per site: the WordPress posts and
//!   generic search REST endpoints, tag/category taxonomy lookup, and the
//!   site's own HTML search page — each best-effort, each contributing at
//!   most one candidate
//! - A keyword expanded once into synonym/hyphenation/combination variants,
//!   scored against titles, snippets, and URL slugs
//! - A streaming external-link probe that reads at most 200 KB per page and
//!   stops at the first qualifying outbound link
//! - A bounded worker pool (one reusable HTTP client per worker) with output
//!   restored to input order
//!
//! ## Failure containment
//!
//! A failing source contributes no candidate; a failing site gets an
//! error-noted row; a failing probe counts as "no external link". Nothing
//! any single site does can abort a run.

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod keywords;
pub mod probe;
pub mod report;
pub mod resolver;
pub mod scoring;
pub mod strategies;
pub mod strategy;
pub mod types;

pub use config::{Mode, RunConfig};
pub use error::{FinderError, Result};
pub use keywords::{ExpandedKeyword, SynonymTable, TermSet};
pub use types::{Candidate, ProbeOutcome, SiteResult, Strategy};

/// Resolve every site in `sites` against `config`, returning one
/// [`SiteResult`] per site in input order.
///
/// # Errors
///
/// Returns [`FinderError::Config`] when the configuration is invalid.
/// Per-site failures never fail the call; they become error-noted rows.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> linkscout::Result<()> {
/// let config = linkscout::RunConfig {
///     keyword: "roof repair".into(),
///     ..Default::default()
/// };
/// let sites = vec!["example.com".to_string(), "other.org".to_string()];
/// let results = linkscout::find_links(&sites, &config).await?;
/// for row in &results {
///     println!("{},{}", row.url, row.notes);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn find_links(sites: &[String], config: &RunConfig) -> Result<Vec<SiteResult>> {
    resolver::runner::run(sites, config).await
}
