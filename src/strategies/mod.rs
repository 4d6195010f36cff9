//! Content-source strategy implementations.
//!
//! Each module provides a struct implementing
//! [`crate::strategy::ContentStrategy`] that queries one information source
//! for a site and returns its single best candidate.

pub mod taxonomy;
pub mod theme_search;
pub mod wp_posts;
pub mod wp_search;

pub use taxonomy::TaxonomyStrategy;
pub use theme_search::ThemeSearchStrategy;
pub use wp_posts::WpPostsStrategy;
pub use wp_search::WpSearchStrategy;

use scraper::Html;

/// Strip HTML tags from a fragment, returning its text content with
/// whitespace collapsed. WordPress excerpt fields arrive as rendered HTML.
pub(crate) fn html_to_text(fragment: &str) -> String {
    if fragment.is_empty() {
        return String::new();
    }
    let parsed = Html::parse_fragment(fragment);
    let text = parsed.root_element().text().collect::<Vec<_>>().join(" ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep `candidate` only while it beats the current best; first seen wins ties.
pub(crate) fn keep_best(best: &mut Option<crate::types::Candidate>, candidate: crate::types::Candidate) {
    let better = match best {
        Some(current) => candidate.score > current.score,
        None => true,
    };
    if better {
        *best = Some(candidate);
    }
}
