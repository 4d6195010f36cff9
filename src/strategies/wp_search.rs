//! WordPress generic search strategy — `/wp/v2/search`.
//!
//! Broader than the posts endpoint (covers pages and other post types) but
//! returns no excerpt, so only the title and URL contribute to the score.

use serde::Deserialize;
use url::Url;

use crate::error::FinderError;
use crate::keywords::ExpandedKeyword;
use crate::scoring::{score_text, score_url};
use crate::strategy::ContentStrategy;
use crate::types::{Candidate, Strategy};

use super::keep_best;

const PER_PAGE: &str = "10";
const URL_WEIGHT: f64 = 0.8;

/// One item from the search endpoint. The canonical link is `url`; some
/// installs expose `link` instead.
#[derive(Debug, Deserialize)]
pub(crate) struct WpSearchItem {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Generic search endpoint strategy.
pub struct WpSearchStrategy;

impl ContentStrategy for WpSearchStrategy {
    async fn fetch(
        &self,
        client: &reqwest::Client,
        base: &Url,
        query: &ExpandedKeyword,
    ) -> Result<Option<Candidate>, FinderError> {
        tracing::trace!(base = %base, "wp-search");

        let endpoint = base
            .join("/wp-json/wp/v2/search")
            .map_err(|e| FinderError::Parse(format!("search endpoint URL: {e}")))?;

        let response = client
            .get(endpoint)
            .query(&[("search", query.keyword()), ("per_page", PER_PAGE)])
            .send()
            .await
            .map_err(|e| FinderError::Http(format!("wp-search request failed: {e}")))?;

        if !response.status().is_success() {
            tracing::trace!(status = %response.status(), "wp-search endpoint unavailable");
            return Ok(None);
        }

        let items: Vec<WpSearchItem> = response
            .json()
            .await
            .map_err(|e| FinderError::Parse(format!("wp-search response: {e}")))?;

        Ok(best_item(&items, query))
    }

    fn strategy_type(&self) -> Strategy {
        Strategy::WpSearch
    }
}

/// Pick the highest-scoring search item. Separated for testability.
pub(crate) fn best_item(items: &[WpSearchItem], query: &ExpandedKeyword) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;

    for item in items {
        let link = match item.url.as_deref().or(item.link.as_deref()) {
            Some(link) if !link.is_empty() => link,
            _ => continue,
        };
        let title = item.title.as_deref().unwrap_or("").trim().to_string();

        let score = score_text(&title, "", query.terms())
            + URL_WEIGHT * score_url(link, query.terms());

        keep_best(
            &mut best,
            Candidate::new(link.to_string(), title, String::new(), score, "wp-search"),
        );
    }

    if let Some(ref cand) = best {
        tracing::debug!(url = %cand.url, score = cand.score, "wp-search best candidate");
    }
    best
}
