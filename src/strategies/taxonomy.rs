//! Taxonomy strategy — find matching tags/categories, then score their posts.
//!
//! Useful on sites whose post titles never mention the keyword but which
//! maintain a tag or category for the niche. Posts reached through a matching
//! term get a fixed bonus on top of their text/URL score.

use serde::Deserialize;
use url::Url;

use crate::error::FinderError;
use crate::keywords::ExpandedKeyword;
use crate::scoring::{score_text, score_url};
use crate::strategy::ContentStrategy;
use crate::types::{Candidate, Strategy};

use super::wp_posts::WpPost;
use super::{html_to_text, keep_best};

const TERMS_PER_PAGE: &str = "5";
const POSTS_PER_PAGE: &str = "10";
/// How many matching terms per taxonomy are followed into their posts.
const TOP_TERMS: usize = 3;
const URL_WEIGHT: f64 = 0.9;
/// Fixed bonus for arriving at a post through a matching term.
const TAXONOMY_BONUS: f64 = 0.8;

/// The two taxonomies queried, in order.
const TAXONOMIES: &[WpTaxonomy] = &[
    WpTaxonomy {
        endpoint: "/wp-json/wp/v2/tags",
        filter_param: "tags",
        method: "wp-tag",
    },
    WpTaxonomy {
        endpoint: "/wp-json/wp/v2/categories",
        filter_param: "categories",
        method: "wp-category",
    },
];

struct WpTaxonomy {
    endpoint: &'static str,
    filter_param: &'static str,
    method: &'static str,
}

/// A taxonomy term as returned by the term-search endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct WpTerm {
    #[serde(default)]
    pub id: Option<u64>,
}

/// Tag/category term-search strategy.
pub struct TaxonomyStrategy;

impl ContentStrategy for TaxonomyStrategy {
    async fn fetch(
        &self,
        client: &reqwest::Client,
        base: &Url,
        query: &ExpandedKeyword,
    ) -> Result<Option<Candidate>, FinderError> {
        tracing::trace!(base = %base, "taxonomy search");

        let mut best: Option<Candidate> = None;

        for taxonomy in TAXONOMIES {
            match search_taxonomy(client, base, query, taxonomy).await {
                Ok(Some(candidate)) => keep_best(&mut best, candidate),
                Ok(None) => {}
                Err(err) => {
                    tracing::debug!(taxonomy = taxonomy.filter_param, error = %err, "taxonomy lookup failed");
                }
            }
        }

        Ok(best)
    }

    fn strategy_type(&self) -> Strategy {
        Strategy::Taxonomy
    }
}

/// Search one taxonomy's terms and score the posts behind the top matches.
async fn search_taxonomy(
    client: &reqwest::Client,
    base: &Url,
    query: &ExpandedKeyword,
    taxonomy: &WpTaxonomy,
) -> Result<Option<Candidate>, FinderError> {
    let terms_endpoint = base
        .join(taxonomy.endpoint)
        .map_err(|e| FinderError::Parse(format!("taxonomy endpoint URL: {e}")))?;

    let response = client
        .get(terms_endpoint)
        .query(&[("search", query.keyword()), ("per_page", TERMS_PER_PAGE)])
        .send()
        .await
        .map_err(|e| FinderError::Http(format!("term search failed: {e}")))?;

    if !response.status().is_success() {
        return Ok(None);
    }

    let terms: Vec<WpTerm> = response
        .json()
        .await
        .map_err(|e| FinderError::Parse(format!("term search response: {e}")))?;

    let posts_endpoint = base
        .join("/wp-json/wp/v2/posts")
        .map_err(|e| FinderError::Parse(format!("posts endpoint URL: {e}")))?;

    let mut best: Option<Candidate> = None;

    for term in terms.iter().take(TOP_TERMS) {
        let Some(term_id) = term.id else { continue };
        let term_id = term_id.to_string();

        let response = client
            .get(posts_endpoint.clone())
            .query(&[
                ("per_page", POSTS_PER_PAGE),
                ("_fields", "link,title,excerpt"),
                (taxonomy.filter_param, term_id.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FinderError::Http(format!("posts-by-term request failed: {e}")))?;

        if !response.status().is_success() {
            continue;
        }

        let posts: Vec<WpPost> = response
            .json()
            .await
            .map_err(|e| FinderError::Parse(format!("posts-by-term response: {e}")))?;

        for post in &posts {
            let Some(link) = post.link.as_deref().filter(|l| !l.is_empty()) else {
                continue;
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
                + URL_WEIGHT * score_url(link, query.terms())
                + TAXONOMY_BONUS;

            keep_best(
                &mut best,
                Candidate::new(link.to_string(), title, snippet, score, taxonomy.method),
            );
        }
    }

    if let Some(ref cand) = best {
        tracing::debug!(url = %cand.url, score = cand.score, method = %cand.method, "taxonomy best candidate");
    }
    Ok(best)
}
