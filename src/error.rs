//! Error types for the linkscout crate.
//!
//! All errors use stable string messages suitable for display to users.
//! Site-level failures end up verbatim in the `notes` column, so messages
//! stay short and free of internal detail.

/// Errors that can occur while resolving sites.
#[derive(Debug, thiserror::Error)]
pub enum FinderError {
    /// An HTTP request failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(String),

    /// A response body could not be parsed (JSON payload or HTML document).
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid run configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A site identifier could not be normalised to a root origin.
    #[error("invalid site: {0}")]
    InvalidSite(String),
}

/// Convenience type alias for linkscout results.
pub type Result<T> = std::result::Result<T, FinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_http() {
        let err = FinderError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_parse() {
        let err = FinderError::Parse("unexpected JSON shape".into());
        assert_eq!(err.to_string(), "parse error: unexpected JSON shape");
    }

    #[test]
    fn display_config() {
        let err = FinderError::Config("keyword must not be empty".into());
        assert_eq!(err.to_string(), "config error: keyword must not be empty");
    }

    #[test]
    fn display_invalid_site() {
        let err = FinderError::InvalidSite("no host in ':::'".into());
        assert_eq!(err.to_string(), "invalid site: no host in ':::'");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FinderError>();
    }
}
