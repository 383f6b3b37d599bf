//! Resilient request execution and the paginated commit fetcher.

use std::thread;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};
use crate::github::pagination::next_page_url;
use crate::github::targets::RepoTarget;
use crate::github::transport::{HttpResponse, Transport};

/// Root of the GitHub REST API.
pub const GITHUB_API: &str = "https://api.github.com";

/// Commits requested per page; the API maximum.
const PER_PAGE: u32 = 100;

/// Statuses retried with backoff, on top of plain network failures.
const RETRYABLE_STATUSES: [u16; 4] = [500, 502, 503, 504];

/// Bounded exponential backoff for transient failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Extra attempts after the first; `max_retries = 5` means six tries total.
    pub max_retries: u32,
    /// Base for the `base * 2^attempt` sleep between tries.
    pub backoff_base_secs: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            backoff_base_secs: 1.0,
        }
    }
}

impl RetryPolicy {
    fn backoff(&self, attempt: u32) -> Duration {
        let secs = self.backoff_base_secs.max(0.0) * 2f64.powi(attempt as i32);
        Duration::from_secs_f64(secs)
    }
}

/// Author filter and optional date bounds applied to every repository.
#[derive(Debug, Clone)]
pub struct CommitQuery {
    pub author: String,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl CommitQuery {
    pub fn new(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            since: None,
            until: None,
        }
    }

    /// URL of the first page for `target`. Later pages come from the
    /// response `Link` header, never from rebuilding the query.
    fn first_page_url(&self, target: &RepoTarget) -> FetchResult<String> {
        let base = format!("{}/repos/{}/commits", GITHUB_API, target.full_name());
        let mut params: Vec<(&str, String)> = vec![
            ("per_page", PER_PAGE.to_string()),
            ("author", self.author.clone()),
        ];
        if let Some(since) = &self.since {
            params.push(("since", since.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        if let Some(until) = &self.until {
            params.push(("until", until.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        let url = Url::parse_with_params(&base, &params)
            .map_err(|e| FetchError::InvalidUrl(format!("{base}: {e}")))?;
        Ok(url.into())
    }
}

/// Commit-listing client over any [`Transport`].
///
/// Owns the retry loop: rate-limit sleeps, bounded exponential backoff for
/// transient failures, immediate failure for everything else.
pub struct GitHubClient<T: Transport> {
    transport: T,
    retry: RetryPolicy,
}

impl<T: Transport> GitHubClient<T> {
    pub fn new(transport: T, retry: RetryPolicy) -> Self {
        Self { transport, retry }
    }

    /// Every commit for `target` matching `query`, across all pages, in page
    /// order. Array elements that are not objects are dropped.
    pub fn commits_for_repo(
        &self,
        target: &RepoTarget,
        query: &CommitQuery,
    ) -> FetchResult<Vec<Value>> {
        let mut commits = Vec::new();
        let mut url = query.first_page_url(target)?;
        loop {
            let response = self.request(&url)?;
            let payload: Value = serde_json::from_str(response.body()).map_err(|_| {
                FetchError::UnexpectedShape {
                    repo: target.full_name(),
                }
            })?;
            let page = payload
                .as_array()
                .ok_or_else(|| FetchError::UnexpectedShape {
                    repo: target.full_name(),
                })?;
            debug!("{}: page of {} commits", target.full_name(), page.len());
            commits.extend(page.iter().filter(|item| item.is_object()).cloned());

            match next_page_url(response.header("link")) {
                Some(next) => url = next,
                None => return Ok(commits),
            }
        }
    }

    /// GET `url`, riding out rate limits and transient failures.
    ///
    /// Rate-limit sleeps never consume the retry budget; network errors and
    /// retryable statuses do, with `base * 2^attempt` backoff in between.
    /// Any other non-2xx status fails on the spot.
    fn request(&self, url: &str) -> FetchResult<HttpResponse> {
        let mut attempt: u32 = 0;
        loop {
            let response = match self.transport.get(url) {
                Ok(response) => response,
                Err(err) => {
                    if !err.is_transient() || attempt >= self.retry.max_retries {
                        return Err(err);
                    }
                    let pause = self.retry.backoff(attempt);
                    warn!(
                        "request to {url} failed ({err}); retrying in {:.1}s",
                        pause.as_secs_f64()
                    );
                    thread::sleep(pause);
                    attempt += 1;
                    continue;
                }
            };

            if response.is_success() {
                return Ok(response);
            }

            let status = response.status();
            if status == 403 {
                if let Some(pause) = rate_limit_wait(&response) {
                    warn!(
                        "rate limit exhausted; sleeping {}s until one second past reset",
                        pause.as_secs()
                    );
                    thread::sleep(pause);
                    continue;
                }
                return Err(status_error(url, &response));
            }

            if RETRYABLE_STATUSES.contains(&status) {
                if attempt >= self.retry.max_retries {
                    return Err(status_error(url, &response));
                }
                let pause = self.retry.backoff(attempt);
                warn!(
                    "HTTP {status} from {url}; retrying in {:.1}s",
                    pause.as_secs_f64()
                );
                thread::sleep(pause);
                attempt += 1;
                continue;
            }

            return Err(status_error(url, &response));
        }
    }
}

/// Sleep length mandated by an exhausted-quota 403: one second past the
/// advertised reset. `None` when the response lacks the rate-limit signal.
fn rate_limit_wait(response: &HttpResponse) -> Option<Duration> {
    if response.header("x-ratelimit-remaining")? != "0" {
        return None;
    }
    let reset: i64 = response.header("x-ratelimit-reset")?.trim().parse().ok()?;
    let now = Utc::now().timestamp();
    Some(Duration::from_secs((reset - now).max(0) as u64 + 1))
}

/// Error carrying the response body: the JSON payload when it parses, the
/// raw text otherwise.
fn status_error(url: &str, response: &HttpResponse) -> FetchError {
    let body = match serde_json::from_str::<Value>(response.body()) {
        Ok(payload) => payload.to_string(),
        Err(_) => response.body().to_string(),
    };
    FetchError::Status {
        status: response.status(),
        url: url.to_string(),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_first_page_url_basic() {
        let url = CommitQuery::new("alice")
            .first_page_url(&RepoTarget::new("octo", "hello"))
            .unwrap();
        assert_eq!(
            url,
            "https://api.github.com/repos/octo/hello/commits?per_page=100&author=alice"
        );
    }

    #[test]
    fn test_first_page_url_carries_bounds() {
        let mut query = CommitQuery::new("alice");
        query.since = Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        query.until = Some(Utc.with_ymd_and_hms(2021, 6, 30, 12, 0, 0).unwrap());

        let url = query
            .first_page_url(&RepoTarget::new("octo", "hello"))
            .unwrap();
        let parsed = Url::parse(&url).unwrap();
        let pairs: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("per_page".to_string(), "100".to_string()),
                ("author".to_string(), "alice".to_string()),
                ("since".to_string(), "2020-01-01T00:00:00Z".to_string()),
                ("until".to_string(), "2021-06-30T12:00:00Z".to_string()),
            ]
        );
    }

    #[test]
    fn test_backoff_doubles_per_attempt() {
        let policy = RetryPolicy {
            max_retries: 5,
            backoff_base_secs: 0.5,
        };
        assert_eq!(policy.backoff(0), Duration::from_millis(500));
        assert_eq!(policy.backoff(1), Duration::from_secs(1));
        assert_eq!(policy.backoff(2), Duration::from_secs(2));
    }

    #[test]
    fn test_backoff_clamps_negative_base() {
        let policy = RetryPolicy {
            max_retries: 5,
            backoff_base_secs: -1.0,
        };
        assert_eq!(policy.backoff(3), Duration::from_secs(0));
    }

    #[test]
    fn test_rate_limit_wait_requires_full_signal() {
        let reset = (Utc::now().timestamp() + 10).to_string();
        let limited = HttpResponse::new(
            403,
            &[("X-RateLimit-Remaining", "0"), ("X-RateLimit-Reset", reset.as_str())],
            "",
        );
        let wait = rate_limit_wait(&limited).unwrap();
        assert!(wait >= Duration::from_secs(9) && wait <= Duration::from_secs(12));

        let quota_left = HttpResponse::new(
            403,
            &[("X-RateLimit-Remaining", "7"), ("X-RateLimit-Reset", reset.as_str())],
            "",
        );
        assert!(rate_limit_wait(&quota_left).is_none());

        let no_reset = HttpResponse::new(403, &[("X-RateLimit-Remaining", "0")], "");
        assert!(rate_limit_wait(&no_reset).is_none());

        let bad_reset = HttpResponse::new(
            403,
            &[("X-RateLimit-Remaining", "0"), ("X-RateLimit-Reset", "soon")],
            "",
        );
        assert!(rate_limit_wait(&bad_reset).is_none());
    }

    #[test]
    fn test_rate_limit_wait_floors_past_reset_at_one_second() {
        let reset = (Utc::now().timestamp() - 100).to_string();
        let response = HttpResponse::new(
            403,
            &[("X-RateLimit-Remaining", "0"), ("X-RateLimit-Reset", reset.as_str())],
            "",
        );
        assert_eq!(rate_limit_wait(&response), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_status_error_prefers_json_body() {
        let response = HttpResponse::new(422, &[], "{\"message\":\"Validation Failed\"}");
        match status_error("https://x/y", &response) {
            FetchError::Status { status, url, body } => {
                assert_eq!(status, 422);
                assert_eq!(url, "https://x/y");
                assert_eq!(body, "{\"message\":\"Validation Failed\"}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_status_error_falls_back_to_raw_text() {
        let response = HttpResponse::new(502, &[], "Bad Gateway");
        match status_error("https://x/y", &response) {
            FetchError::Status { body, .. } => assert_eq!(body, "Bad Gateway"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
