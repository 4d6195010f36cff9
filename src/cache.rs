//! In-memory cache for probe outcomes.
//!
//! Several strategies frequently surface the same URL for one site, and the
//! probe would otherwise stream the same page once per candidate. Outcomes
//! are cached by exact page URL with a TTL; a run with `cache_ttl_seconds`
//! set to 0 never touches the cache.

use std::sync::OnceLock;
use std::time::Duration;

use moka::future::Cache;

use crate::types::ProbeOutcome;

/// Maximum number of cached probe outcomes.
const MAX_CACHE_ENTRIES: u64 = 1024;

/// Global process-wide probe cache.
///
/// Lazily initialised on first access. TTL is set when first created
/// and cannot be changed after initialisation.
static CACHE: OnceLock<Cache<String, ProbeOutcome>> = OnceLock::new();

fn get_or_init_cache(ttl_seconds: u64) -> &'static Cache<String, ProbeOutcome> {
    CACHE.get_or_init(|| {
        Cache::builder()
            .max_capacity(MAX_CACHE_ENTRIES)
            .time_to_live(Duration::from_secs(ttl_seconds))
            .build()
    })
}

/// Look up a cached probe outcome for `url`.
pub async fn get(url: &str, ttl_seconds: u64) -> Option<ProbeOutcome> {
    let cache = get_or_init_cache(ttl_seconds);
    cache.get(url).await
}

/// Insert a probe outcome for `url`.
pub async fn insert(url: String, outcome: ProbeOutcome, ttl_seconds: u64) {
    let cache = get_or_init_cache(ttl_seconds);
    cache.insert(url, outcome).await;
}
