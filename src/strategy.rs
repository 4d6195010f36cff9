//! Trait definition for pluggable content-source strategies.
//!
//! Each discovery method (WordPress posts search, generic search, taxonomy
//! lookup, theme search page) implements [`ContentStrategy`] to provide a
//! uniform interface for querying one site and returning its single best
//! candidate.

use url::Url;

use crate::error::FinderError;
use crate::keywords::ExpandedKeyword;
use crate::types::{Candidate, Strategy};

/// A pluggable content-source strategy.
///
/// Implementors query one information source for a site and return at most
/// one [`Candidate`] — the best-scoring page they found — or `None` when the
/// source has nothing usable. Strategies never select across sources; that is
/// the resolver's job.
///
/// A strategy failure is an `Err`, not a panic: the resolver records it as a
/// diagnostic and carries on with the other strategies.
///
/// All implementations must be `Send + Sync` for concurrent fan-out.
pub trait ContentStrategy: Send + Sync {
    /// Query this strategy's source for the site rooted at `base`.
    ///
    /// # Arguments
    ///
    /// * `client` — The worker's HTTP client.
    /// * `base` — Root origin of the site (scheme + host, no path).
    /// * `query` — The keyword and its expanded term set.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError`] if the request fails or the response cannot
    /// be parsed. A source that responds but has no matching content is
    /// `Ok(None)`, not an error.
    fn fetch(
        &self,
        client: &reqwest::Client,
        base: &Url,
        query: &ExpandedKeyword,
    ) -> impl std::future::Future<Output = Result<Option<Candidate>, FinderError>> + Send;

    /// Returns which [`Strategy`] variant this implementation represents.
    fn strategy_type(&self) -> Strategy;
}
