//! Core types: candidate pages, per-site results, and strategy identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A candidate page produced by one content-source strategy.
///
/// Candidates live only for the duration of a single site's resolution;
/// the winning candidate's fields are folded into the [`SiteResult`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Absolute URL of the candidate page.
    pub url: String,
    /// Page title (or anchor text for theme-search results).
    pub title: String,
    /// Plain-text snippet, empty when the source provides none.
    pub snippet: String,
    /// Relevance score (higher is better). Non-negative, unbounded above.
    pub score: f64,
    /// Which discovery method produced this candidate: "wp-posts",
    /// "wp-search", "wp-tag", "wp-category", or "theme-search".
    pub method: String,
    /// First qualifying outbound link found on the page, attached by the
    /// external-link probe when `require_external` is enabled.
    pub first_external_link: Option<String>,
}

impl Candidate {
    /// Build an unprobed candidate.
    pub fn new(url: String, title: String, snippet: String, score: f64, method: &str) -> Self {
        Self {
            url,
            title,
            snippet,
            score,
            method: method.to_string(),
            first_external_link: None,
        }
    }
}

/// The outcome for one input site. Exactly one per input line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteResult {
    /// Chosen page URL; empty when no qualifying page was found.
    pub url: String,
    /// Provenance (the chosen page's first external link) or a rejection
    /// reason ("no relevant post", "no external links in candidates",
    /// "below threshold", or an error description).
    pub notes: String,
    /// Position of the site in the input list; output is sorted by this.
    pub index: usize,
}

/// The four content-source strategies a site is queried with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// WordPress posts endpoint with a keyword search.
    WpPosts,
    /// WordPress generic search endpoint.
    WpSearch,
    /// WordPress tag/category term search, then posts per matching term.
    Taxonomy,
    /// The site's own HTML search page, scraped with CSS selectors.
    ThemeSearch,
}

impl Strategy {
    /// Returns the human-readable name of this strategy.
    pub fn name(&self) -> &'static str {
        match self {
            Self::WpPosts => "wp-posts",
            Self::WpSearch => "wp-search",
            Self::Taxonomy => "wp-taxonomy",
            Self::ThemeSearch => "theme-search",
        }
    }

    /// Returns all strategy variants, in the order they are fanned out.
    pub fn all() -> &'static [Strategy] {
        &[
            Self::WpPosts,
            Self::WpSearch,
            Self::Taxonomy,
            Self::ThemeSearch,
        ]
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of probing a page for an outbound link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeOutcome {
    /// Whether a qualifying external link was found.
    pub found: bool,
    /// The first qualifying link, empty when `found` is false.
    pub first_external_link: String,
}

impl ProbeOutcome {
    /// A "no external link" outcome, also used for probe failures.
    pub fn negative() -> Self {
        Self {
            found: false,
            first_external_link: String::new(),
        }
    }

    /// A successful outcome carrying the first qualifying link.
    pub fn hit(link: String) -> Self {
        Self {
            found: true,
            first_external_link: link,
        }
    }
}
