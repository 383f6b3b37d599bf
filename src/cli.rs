//! Command-line interface definition.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{ArgGroup, Parser};

use crate::config::{effective_token, HttpSettings, DEFAULT_USER_AGENT, TOKEN_ENV_VAR};
use crate::github::client::{CommitQuery, RetryPolicy};

/// Retrieve every commit authored by a user across the fixed set of
/// tracked org/repo targets.
#[derive(Debug, Parser)]
#[command(name = "gh-org-commits", version)]
#[command(group(
    ArgGroup::new("output")
        .required(true)
        .multiple(true)
        .args(["jsonl", "csv"])
))]
pub struct Cli {
    /// GitHub username to filter commits by (author=...).
    #[arg(long)]
    pub user: String,

    /// Only commits after this date-time (RFC 3339, e.g. 2020-01-01T00:00:00Z).
    #[arg(long, value_parser = parse_datetime)]
    pub since: Option<DateTime<Utc>>,

    /// Only commits before this date-time (RFC 3339).
    #[arg(long, value_parser = parse_datetime)]
    pub until: Option<DateTime<Utc>>,

    /// Write results to JSONL at this path.
    #[arg(long, value_name = "PATH")]
    pub jsonl: Option<PathBuf>,

    /// Write results to CSV at this path.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// GitHub token (or set the GITHUB_TOKEN environment variable).
    #[arg(long)]
    pub token: Option<String>,

    /// HTTP timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Retries for transient failures.
    #[arg(long, default_value_t = 5)]
    pub max_retries: u32,

    /// Backoff base seconds for retries.
    #[arg(long, default_value_t = 1.0)]
    pub retry_backoff: f64,

    /// User-Agent header value.
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl Cli {
    /// Transport settings from the flags, with the token resolved against
    /// the environment.
    pub fn http_settings(&self) -> HttpSettings {
        let env_token = std::env::var(TOKEN_ENV_VAR).ok();
        HttpSettings {
            timeout_secs: self.timeout,
            user_agent: self.user_agent.clone(),
            token: effective_token(self.token.as_deref(), env_token.as_deref()),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            backoff_base_secs: self.retry_backoff,
        }
    }

    pub fn commit_query(&self) -> CommitQuery {
        let mut query = CommitQuery::new(self.user.clone());
        query.since = self.since;
        query.until = self.until;
        query
    }
}

fn parse_datetime(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("not an RFC 3339 date-time: {e}"))
}
