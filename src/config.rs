//! Run configuration with sensible defaults.
//!
//! [`RunConfig`] carries the keyword, selection policy, and resource limits
//! for one batch run. Use [`Default::default()`] and override fields, then
//! call [`RunConfig::validate`] before starting work.

use std::fmt;
use std::str::FromStr;

use crate::error::FinderError;

/// Selection policy applied after the best candidate is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Only return the best candidate when its score reaches the threshold.
    Strict,
    /// Always return the best candidate, regardless of score.
    Loose,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => f.write_str("strict"),
            Self::Loose => f.write_str("loose"),
        }
    }
}

impl FromStr for Mode {
    type Err = FinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "loose" => Ok(Self::Loose),
            other => Err(FinderError::Config(format!(
                "mode must be 'strict' or 'loose', got '{other}'"
            ))),
        }
    }
}

/// Configuration for one batch run over a site list.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// The keyword to find a relevant page for. Must be non-empty.
    pub keyword: String,
    /// Strict or loose selection (see [`Mode`]).
    pub mode: Mode,
    /// Minimum score for a result under strict mode. Ignored in loose mode.
    pub threshold: f64,
    /// Whether the chosen page must contain a qualifying outbound link.
    pub require_external: bool,
    /// Number of parallel workers resolving sites.
    pub worker_count: usize,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// How long probe outcomes are cached, in seconds. 0 disables caching.
    pub cache_ttl_seconds: u64,
    /// Custom User-Agent string. If `None`, rotates through a built-in list.
    pub user_agent: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            mode: Mode::Strict,
            threshold: 2.0,
            require_external: true,
            worker_count: 8,
            timeout_seconds: 14,
            cache_ttl_seconds: 600,
            user_agent: None,
        }
    }
}

impl RunConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `keyword` must be non-empty after trimming
    /// - `threshold` must be a finite, non-negative number
    /// - `worker_count` must be at least 1
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), FinderError> {
        if self.keyword.trim().is_empty() {
            return Err(FinderError::Config("keyword must not be empty".into()));
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(FinderError::Config(
                "threshold must be a non-negative number".into(),
            ));
        }
        if self.worker_count == 0 {
            return Err(FinderError::Config(
                "worker_count must be at least 1".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(FinderError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
