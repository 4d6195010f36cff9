//! Per-site resolution: run every strategy, filter by outbound links,
//! apply the strict/loose selection policy.

use url::Url;

use crate::cache;
use crate::config::{Mode, RunConfig};
use crate::error::FinderError;
use crate::keywords::ExpandedKeyword;
use crate::probe::probe_page;
use crate::strategies::{TaxonomyStrategy, ThemeSearchStrategy, WpPostsStrategy, WpSearchStrategy};
use crate::strategy::ContentStrategy;
use crate::types::{Candidate, ProbeOutcome, Strategy};

/// What one site resolved to; the runner attaches the input index.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Chosen page URL, empty when nothing qualified.
    pub url: String,
    /// Chosen page's first external link, or the rejection reason.
    pub notes: String,
}

impl Resolution {
    fn rejected(notes: &str) -> Self {
        Self {
            url: String::new(),
            notes: notes.to_string(),
        }
    }
}

/// Normalise a site entry to its root origin (scheme + host + port).
///
/// Bare hostnames get an `https://` scheme; paths, queries, and fragments
/// are dropped.
///
/// # Errors
///
/// Returns [`FinderError::InvalidSite`] when the entry cannot be parsed or
/// has no host.
pub fn ensure_root(site: &str) -> Result<Url, FinderError> {
    let trimmed = site.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(FinderError::InvalidSite("empty site entry".into()));
    }
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    let parsed =
        Url::parse(&with_scheme).map_err(|e| FinderError::InvalidSite(format!("{site}: {e}")))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| FinderError::InvalidSite(format!("no host in {site}")))?;

    let mut root = format!("{}://{host}", parsed.scheme());
    if let Some(port) = parsed.port() {
        root.push_str(&format!(":{port}"));
    }
    Url::parse(&root).map_err(|e| FinderError::InvalidSite(format!("{site}: {e}")))
}

/// Resolve one site to its best matching page.
///
/// # Pipeline
///
/// 1. Normalise the site entry to a root origin.
/// 2. Fan out all four strategies concurrently; failures are logged per
///    strategy and contribute no candidate.
/// 3. When `require_external` is set, probe every candidate and keep only
///    pages with a qualifying outbound link.
/// 4. Pick the highest-scoring survivor (first seen wins ties).
/// 5. Apply the strict/loose policy against the threshold.
///
/// # Errors
///
/// Only an unusable site entry is an error here; everything downstream
/// degrades to a rejection [`Resolution`] instead.
pub async fn resolve_site(
    client: &reqwest::Client,
    site: &str,
    query: &ExpandedKeyword,
    config: &RunConfig,
) -> Result<Resolution, FinderError> {
    let base = ensure_root(site)?;
    tracing::debug!(site = %base, "resolving");

    let futures: Vec<_> = Strategy::all()
        .iter()
        .map(|strategy| {
            let base = &base;
            async move {
                let outcome = run_strategy(*strategy, client, base, query).await;
                (*strategy, outcome)
            }
        })
        .collect();

    let outcomes = futures::future::join_all(futures).await;

    let mut candidates: Vec<Candidate> = Vec::new();
    for (strategy, outcome) in outcomes {
        match outcome {
            Ok(Some(candidate)) => {
                tracing::debug!(%strategy, url = %candidate.url, score = candidate.score, "candidate");
                candidates.push(candidate);
            }
            Ok(None) => tracing::debug!(%strategy, "no candidate"),
            Err(err) => tracing::warn!(%strategy, error = %err, "strategy failed"),
        }
    }

    if candidates.is_empty() {
        return Ok(Resolution::rejected("no relevant post"));
    }

    if config.require_external {
        let mut kept = Vec::with_capacity(candidates.len());
        for mut candidate in candidates {
            let outcome = probe_with_cache(client, &candidate.url, config).await;
            if outcome.found {
                candidate.first_external_link = Some(outcome.first_external_link);
                kept.push(candidate);
            }
        }
        candidates = kept;
        if candidates.is_empty() {
            return Ok(Resolution::rejected("no external links in candidates"));
        }
    }

    Ok(select(candidates, config.mode, config.threshold))
}

/// Pick the best candidate and apply the mode policy. `candidates` must be
/// non-empty.
fn select(candidates: Vec<Candidate>, mode: Mode, threshold: f64) -> Resolution {
    let mut best: Option<Candidate> = None;
    for candidate in candidates {
        let better = match best {
            Some(ref current) => candidate.score > current.score,
            None => true,
        };
        if better {
            best = Some(candidate);
        }
    }
    let Some(best) = best else {
        return Resolution::rejected("no relevant post");
    };

    let note = best.first_external_link.clone().unwrap_or_default();

    match mode {
        Mode::Loose => Resolution {
            url: best.url,
            notes: note,
        },
        Mode::Strict => {
            if best.score >= threshold {
                Resolution {
                    url: best.url,
                    notes: note,
                }
            } else {
                Resolution {
                    url: String::new(),
                    notes: if note.is_empty() {
                        "below threshold".to_string()
                    } else {
                        note
                    },
                }
            }
        }
    }
}

/// Dispatch to the concrete strategy implementation.
async fn run_strategy(
    strategy: Strategy,
    client: &reqwest::Client,
    base: &Url,
    query: &ExpandedKeyword,
) -> Result<Option<Candidate>, FinderError> {
    match strategy {
        Strategy::WpPosts => WpPostsStrategy.fetch(client, base, query).await,
        Strategy::WpSearch => WpSearchStrategy.fetch(client, base, query).await,
        Strategy::Taxonomy => TaxonomyStrategy.fetch(client, base, query).await,
        Strategy::ThemeSearch => ThemeSearchStrategy.fetch(client, base, query).await,
    }
}

/// Probe a candidate URL, going through the outcome cache when enabled.
async fn probe_with_cache(
    client: &reqwest::Client,
    url: &str,
    config: &RunConfig,
) -> ProbeOutcome {
    if config.cache_ttl_seconds == 0 {
        return probe_page(client, url).await;
    }
    if let Some(cached) = cache::get(url, config.cache_ttl_seconds).await {
        tracing::trace!(url, "probe cache hit");
        return cached;
    }
    let outcome = probe_page(client, url).await;
    cache::insert(url.to_string(), outcome.clone(), config.cache_ttl_seconds).await;
    outcome
}
