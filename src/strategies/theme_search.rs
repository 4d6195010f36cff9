//! Theme search strategy — scrape the site's own `/?s=` search page.
//!
//! The fallback source for sites whose REST API is disabled. Post-title
//! anchors are located with a prioritized list of selectors matching common
//! theme markup; when none match, the first link inside each `<article>` is
//! taken instead. The anchor's enclosing block supplies a synthetic snippet.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::FinderError;
use crate::keywords::ExpandedKeyword;
use crate::scoring::{score_text, score_url};
use crate::strategy::ContentStrategy;
use crate::types::{Candidate, Strategy};

use super::keep_best;

/// Post-title anchor selectors, most specific theme conventions first.
const TITLE_SELECTORS: &[&str] = &[
    "h1.entry-title a",
    "h2.entry-title a",
    "h3.entry-title a",
    ".entry-title a",
    ".post-title a",
    ".card-title a",
    "article h2 a",
    "article h3 a",
    "article .entry-title a",
];

/// Archive/search paths that are never post candidates.
const EXCLUDED_SEGMENTS: &[&str] = &["/category/", "/tag/", "/author/", "/search/"];

/// At most this many anchors are scored, in the order they were collected.
const MAX_CANDIDATES: usize = 15;
/// Characters of enclosing-block text used as a synthetic snippet.
const SNIPPET_CHARS: usize = 180;
const URL_WEIGHT: f64 = 1.0;
const SNIPPET_WEIGHT: f64 = 0.6;

/// HTML search page scraping strategy.
pub struct ThemeSearchStrategy;

impl ContentStrategy for ThemeSearchStrategy {
    async fn fetch(
        &self,
        client: &reqwest::Client,
        base: &Url,
        query: &ExpandedKeyword,
    ) -> Result<Option<Candidate>, FinderError> {
        tracing::trace!(base = %base, "theme search");

        let response = client
            .get(base.clone())
            .query(&[("s", query.keyword())])
            .send()
            .await
            .map_err(|e| FinderError::Http(format!("theme search request failed: {e}")))?;

        if !response.status().is_success() {
            tracing::trace!(status = %response.status(), "theme search page unavailable");
            return Ok(None);
        }

        let html = response
            .text()
            .await
            .map_err(|e| FinderError::Http(format!("theme search response read failed: {e}")))?;

        best_theme_result(&html, base, query)
    }

    fn strategy_type(&self) -> Strategy {
        Strategy::ThemeSearch
    }
}

/// Parse a search results page and pick the best candidate.
///
/// Extracted as a separate function for testability with mock HTML.
pub(crate) fn best_theme_result(
    html: &str,
    base: &Url,
    query: &ExpandedKeyword,
) -> Result<Option<Candidate>, FinderError> {
    let document = Html::parse_document(html);

    // (resolved href, anchor text, enclosing-block snippet)
    let mut collected: Vec<(String, String, Option<String>)> = Vec::new();

    for selector_str in TITLE_SELECTORS {
        let selector = Selector::parse(selector_str)
            .map_err(|e| FinderError::Parse(format!("invalid selector {selector_str}: {e:?}")))?;
        for anchor in document.select(&selector) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let text = anchor.text().collect::<String>().trim().to_string();
            if href.is_empty() || text.is_empty() {
                continue;
            }
            let Some(resolved) = resolve_href(base, href) else {
                continue;
            };
            if is_excluded(&resolved) {
                continue;
            }
            let snippet = enclosing_block_text(&anchor);
            collected.push((resolved, text, snippet));
        }
    }

    // No title anchors matched; take the first link inside each article block.
    if collected.is_empty() {
        let article_sel = Selector::parse("article")
            .map_err(|e| FinderError::Parse(format!("invalid article selector: {e:?}")))?;
        let anchor_sel = Selector::parse("a[href]")
            .map_err(|e| FinderError::Parse(format!("invalid anchor selector: {e:?}")))?;

        for article in document.select(&article_sel) {
            let Some(anchor) = article.select(&anchor_sel).next() else {
                continue;
            };
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let text = anchor.text().collect::<String>().trim().to_string();
            let Some(resolved) = resolve_href(base, href) else {
                continue;
            };
            if is_excluded(&resolved) {
                continue;
            }
            let snippet = enclosing_block_text(&anchor);
            collected.push((resolved, text, snippet));
        }
    }

    let mut best: Option<Candidate> = None;

    for (href, text, snippet) in collected.into_iter().take(MAX_CANDIDATES) {
        let mut score =
            score_text(&text, "", query.terms()) + URL_WEIGHT * score_url(&href, query.terms());
        let snippet = snippet.unwrap_or_default();
        if !snippet.is_empty() {
            score += SNIPPET_WEIGHT * score_text("", &snippet, query.terms());
        }
        keep_best(
            &mut best,
            Candidate::new(href, text, snippet, score, "theme-search"),
        );
    }

    if let Some(ref cand) = best {
        tracing::debug!(url = %cand.url, score = cand.score, "theme-search best candidate");
    }
    Ok(best)
}

/// Resolve a possibly-relative href against the site root.
fn resolve_href(base: &Url, href: &str) -> Option<String> {
    if href.starts_with("http") {
        Some(href.to_string())
    } else {
        base.join(href).ok().map(|u| u.to_string())
    }
}

fn is_excluded(url: &str) -> bool {
    EXCLUDED_SEGMENTS.iter().any(|seg| url.contains(seg))
}

/// Text of the anchor's nearest `article`/`div`/`li` ancestor, whitespace
/// normalised and truncated, for use as a synthetic snippet.
fn enclosing_block_text(anchor: &ElementRef<'_>) -> Option<String> {
    for node in anchor.ancestors() {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        let name = element.value().name();
        if name == "article" || name == "div" || name == "li" {
            let text = element.text().collect::<Vec<_>>().join(" ");
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                return None;
            }
            return Some(text.chars().take(SNIPPET_CHARS).collect());
        }
    }
    None
}
