//! Bounded worker pool over the input site list.
//!
//! One job per site, a fixed number of workers, no inter-job dependencies.
//! Each worker owns its HTTP client for its whole lifetime. Completion order
//! is unconstrained; the collected results are sorted back into input order
//! before being returned — that sort is the only ordering guarantee.

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use crate::config::RunConfig;
use crate::error::FinderError;
use crate::http;
use crate::keywords::{ExpandedKeyword, SynonymTable};
use crate::types::SiteResult;

use super::site::resolve_site;

/// Resolve every site in the list under a bounded worker pool.
///
/// Exactly one [`SiteResult`] per input site is returned, in input order.
/// A site whose resolution fails gets an error-noted row; nothing a single
/// site does can abort the run or disturb other sites' rows.
///
/// # Errors
///
/// Only configuration validation fails the call itself.
pub async fn run(sites: &[String], config: &RunConfig) -> Result<Vec<SiteResult>, FinderError> {
    config.validate()?;

    if sites.is_empty() {
        return Ok(Vec::new());
    }

    // Expanded once, shared read-only by every worker.
    let query = Arc::new(ExpandedKeyword::new(
        &config.keyword,
        SynonymTable::builtin(),
    ));

    let queue: Arc<Mutex<VecDeque<(usize, String)>>> = Arc::new(Mutex::new(
        sites.iter().cloned().enumerate().collect(),
    ));

    let worker_count = config.worker_count.min(sites.len());
    tracing::info!(
        sites = sites.len(),
        workers = worker_count,
        keyword = %config.keyword,
        "starting run"
    );

    let mut handles = Vec::with_capacity(worker_count);
    for worker_id in 0..worker_count {
        let queue = Arc::clone(&queue);
        let query = Arc::clone(&query);
        let config = config.clone();
        handles.push(tokio::spawn(worker_loop(worker_id, queue, query, config)));
    }

    let mut results: Vec<SiteResult> = Vec::with_capacity(sites.len());
    for handle in handles {
        match handle.await {
            Ok(worker_results) => results.extend(worker_results),
            Err(err) => tracing::error!(error = %err, "worker task died"),
        }
    }

    // A dead worker loses the job it was holding; keep one row per site.
    if results.len() < sites.len() {
        let seen: HashSet<usize> = results.iter().map(|r| r.index).collect();
        for index in 0..sites.len() {
            if !seen.contains(&index) {
                results.push(SiteResult {
                    url: String::new(),
                    notes: "site task aborted".into(),
                    index,
                });
            }
        }
    }

    // Restore input order regardless of completion order.
    results.sort_by_key(|r| r.index);
    Ok(results)
}

/// One worker: build a client, then drain the queue.
async fn worker_loop(
    worker_id: usize,
    queue: Arc<Mutex<VecDeque<(usize, String)>>>,
    query: Arc<ExpandedKeyword>,
    config: RunConfig,
) -> Vec<SiteResult> {
    // Worker-scoped client: created here, owned exclusively by this worker,
    // dropped when the queue drains.
    let client = http::build_client(&config);
    if let Err(ref err) = client {
        tracing::error!(worker_id, error = %err, "client construction failed");
    }

    let mut results = Vec::new();
    loop {
        let job = match queue.lock() {
            Ok(mut queue) => queue.pop_front(),
            Err(_) => None,
        };
        let Some((index, site)) = job else { break };

        let result = match &client {
            Ok(client) => match resolve_site(client, &site, &query, &config).await {
                Ok(resolution) => SiteResult {
                    url: resolution.url,
                    notes: resolution.notes,
                    index,
                },
                Err(err) => {
                    tracing::warn!(site = %site, error = %err, "site resolution failed");
                    SiteResult {
                        url: String::new(),
                        notes: err.to_string(),
                        index,
                    }
                }
            },
            Err(err) => SiteResult {
                url: String::new(),
                notes: err.to_string(),
                index,
            },
        };
        results.push(result);
    }

    tracing::debug!(worker_id, resolved = results.len(), "worker finished");
    results
}
