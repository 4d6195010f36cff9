//! WordPress posts endpoint strategy — keyword search over `/wp/v2/posts`.
//!
//! The richest source when available: returns rendered titles and excerpts,
//! so both text and URL scoring apply at full strength.

use serde::Deserialize;
use url::Url;

use crate::error::FinderError;
use crate::keywords::ExpandedKeyword;
use crate::scoring::{score_text, score_url};
use crate::strategy::ContentStrategy;
use crate::types::{Candidate, Strategy};

use super::{html_to_text, keep_best};

const PER_PAGE: &str = "10";
/// URL-score weight in the combined score for this strategy.
const URL_WEIGHT: f64 = 0.8;

/// A rendered field as the WordPress REST API returns it.
#[derive(Debug, Deserialize, Default)]
pub(crate) struct Rendered {
    #[serde(default)]
    pub rendered: String,
}

/// One post from the posts endpoint, projected to link/title/excerpt.
#[derive(Debug, Deserialize)]
pub(crate) struct WpPost {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub title: Option<Rendered>,
    #[serde(default)]
    pub excerpt: Option<Rendered>,
}

/// Posts-endpoint search strategy.
pub struct WpPostsStrategy;

impl ContentStrategy for WpPostsStrategy {
    async fn fetch(
        &self,
        client: &reqwest::Client,
        base: &Url,
        query: &ExpandedKeyword,
    ) -> Result<Option<Candidate>, FinderError> {
        tracing::trace!(base = %base, "wp-posts search");

        let endpoint = base
            .join("/wp-json/wp/v2/posts")
            .map_err(|e| FinderError::Parse(format!("posts endpoint URL: {e}")))?;

        let response = client
            .get(endpoint)
            .query(&[
                ("search", query.keyword()),
                ("per_page", PER_PAGE),
                ("_fields", "link,title,excerpt"),
            ])
            .send()
            .await
            .map_err(|e| FinderError::Http(format!("wp-posts request failed: {e}")))?;

        if !response.status().is_success() {
            tracing::trace!(status = %response.status(), "wp-posts endpoint unavailable");
            return Ok(None);
        }

        let posts: Vec<WpPost> = response
            .json()
            .await
            .map_err(|e| FinderError::Parse(format!("wp-posts response: {e}")))?;

        Ok(best_post(&posts, query))
    }

    fn strategy_type(&self) -> Strategy {
        Strategy::WpPosts
    }
}

/// Pick the highest-scoring post. Separated for testability with mock payloads.
pub(crate) fn best_post(posts: &[WpPost], query: &ExpandedKeyword) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;

    for post in posts {
        let link = match post.link.as_deref() {
            Some(link) if !link.is_empty() => link,
            _ => continue,
        };
        let title = post
            .title
            .as_ref()
            .map(|t| t.rendered.trim().to_string())
            .unwrap_or_default();
        let snippet = post
            .excerpt
            .as_ref()
            .map(|e| html_to_text(&e.rendered))
            .unwrap_or_default();

        let score = score_text(&title, &snippet, query.terms())
            + URL_WEIGHT * score_url(link, query.terms());

        keep_best(
            &mut best,
            Candidate::new(link.to_string(), title, snippet, score, "wp-posts"),
        );
    }

    if let Some(ref cand) = best {
        tracing::debug!(url = %cand.url, score = cand.score, "wp-posts best candidate");
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::{ExpandedKeyword, SynonymTable};

    const MOCK_POSTS_JSON: &str = r#"[
        {
            "link": "https://example.com/roof-repair-guide/",
            "title": {"rendered": "Roof Repair Guide"},
            "excerpt": {"rendered": "<p>Everything about fixing a roof.</p>"}
        },
        {
            "link": "https://example.com/kitchen-remodel/",
            "title": {"rendered": "Kitchen Remodel"},
            "excerpt": {"rendered": "<p>New countertops and cabinets.</p>"}
        },
        {
            "title": {"rendered": "Post without a link"},
            "excerpt": {"rendered": ""}
        }
    ]"#;

    fn query() -> ExpandedKeyword {
        ExpandedKeyword::new("roof repair", SynonymTable::builtin())
    }

    fn parse(json: &str) -> Vec<WpPost> {
        serde_json::from_str(json).expect("mock payload should deserialize")
    }

    #[test]
    fn picks_relevant_post() {
        let best = best_post(&parse(MOCK_POSTS_JSON), &query()).expect("a candidate");
        assert_eq!(best.url, "https://example.com/roof-repair-guide/");
        assert_eq!(best.method, "wp-posts");
        assert!(best.score > 0.0);
    }

    #[test]
    fn excerpt_html_is_stripped() {
        let best = best_post(&parse(MOCK_POSTS_JSON), &query()).expect("a candidate");
        assert_eq!(best.snippet, "Everything about fixing a roof.");
        assert!(!best.snippet.contains('<'));
    }

    #[test]
    fn posts_without_links_skipped() {
        let json = r#"[{"title": {"rendered": "No link"}}]"#;
        assert!(best_post(&parse(json), &query()).is_none());
    }

    #[test]
    fn empty_payload_yields_none() {
        assert!(best_post(&[], &query()).is_none());
    }

    #[test]
    fn missing_title_and_excerpt_tolerated() {
        let json = r#"[{"link": "https://example.com/roof/"}]"#;
        let best = best_post(&parse(json), &query()).expect("a candidate");
        assert_eq!(best.title, "");
        assert!(best.score > 0.0, "URL score alone should apply");
    }

    #[test]
    fn strategy_type_is_wp_posts() {
        assert_eq!(WpPostsStrategy.strategy_type(), Strategy::WpPosts);
    }

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WpPostsStrategy>();
    }
}
