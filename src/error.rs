//! Error types for the commit fetch pipeline.

use thiserror::Error;

/// Failure modes of a commit fetch.
///
/// `Transport` is the only transient variant; the request executor retries it
/// (and retryable server statuses) before letting it surface. Everything else
/// aborts the current repository immediately.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network, TLS, or timeout failure below the HTTP status layer.
    #[error("transport error: {0}")]
    Transport(String),

    /// The API answered with a status the executor will not retry, or a
    /// retryable status after the retry budget ran out.
    #[error("GitHub API error {status} for {url}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    /// The commits endpoint returned something other than a JSON array.
    #[error("unexpected response shape for commits: {repo}")]
    UnexpectedShape { repo: String },

    /// A request URL could not be constructed from the configured pieces.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// The one status the per-repository loop recovers from by skipping.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Status { status: 404, .. })
    }

    /// Retried with exponential backoff until the budget is exhausted.
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Transport(_))
    }
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = FetchError::Status {
            status: 422,
            url: "https://api.github.com/repos/a/b/commits".to_string(),
            body: "{\"message\":\"Validation Failed\"}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "GitHub API error 422 for https://api.github.com/repos/a/b/commits: \
             {\"message\":\"Validation Failed\"}"
        );
    }

    #[test]
    fn test_not_found_recognition() {
        let not_found = FetchError::Status {
            status: 404,
            url: "u".to_string(),
            body: String::new(),
        };
        assert!(not_found.is_not_found());

        let forbidden = FetchError::Status {
            status: 403,
            url: "u".to_string(),
            body: String::new(),
        };
        assert!(!forbidden.is_not_found());
        assert!(!FetchError::Transport("connection reset".to_string()).is_not_found());
    }

    #[test]
    fn test_transient_classification() {
        assert!(FetchError::Transport("timed out".to_string()).is_transient());
        assert!(!FetchError::UnexpectedShape {
            repo: "a/b".to_string()
        }
        .is_transient());
    }
}
