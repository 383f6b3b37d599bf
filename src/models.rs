//! Flat commit record shared by every output format.

use serde::Serialize;
use serde_json::Value;

use crate::github::targets::RepoTarget;

/// One commit flattened for export. Field declaration order is the JSONL
/// key order and matches [`CommitRow::FIELDS`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitRow {
    pub org: String,
    pub repo: String,
    pub repo_full_name: String,
    pub sha: String,
    pub html_url: String,
    pub api_url: String,
    pub author_login: Option<String>,
    pub committer_login: Option<String>,
    pub commit_author_name: Option<String>,
    pub commit_author_email: Option<String>,
    pub commit_author_date: Option<String>,
    pub commit_committer_name: Option<String>,
    pub commit_committer_email: Option<String>,
    pub commit_committer_date: Option<String>,
    pub message: String,
}

impl CommitRow {
    /// Column order for CSV output; identical to the struct field order.
    pub const FIELDS: [&'static str; 15] = [
        "org",
        "repo",
        "repo_full_name",
        "sha",
        "html_url",
        "api_url",
        "author_login",
        "committer_login",
        "commit_author_name",
        "commit_author_email",
        "commit_author_date",
        "commit_committer_name",
        "commit_committer_email",
        "commit_committer_date",
        "message",
    ];

    /// Flatten one commit payload from the list endpoint.
    ///
    /// Nested metadata fields become `None` when absent; the top-level
    /// `sha`, `html_url` and `url` fields and the message fall back to the
    /// empty string. The top-level `author`/`committer` identities are
    /// `null` for commits whose email maps to no GitHub account, so their
    /// logins are nullable too.
    pub fn from_payload(target: &RepoTarget, payload: &Value) -> Self {
        let meta = &payload["commit"];
        Self {
            org: target.org.to_string(),
            repo: target.name.to_string(),
            repo_full_name: target.full_name(),
            sha: text_or_empty(&payload["sha"]),
            html_url: text_or_empty(&payload["html_url"]),
            api_url: text_or_empty(&payload["url"]),
            author_login: text(&payload["author"]["login"]),
            committer_login: text(&payload["committer"]["login"]),
            commit_author_name: text(&meta["author"]["name"]),
            commit_author_email: text(&meta["author"]["email"]),
            commit_author_date: text(&meta["author"]["date"]),
            commit_committer_name: text(&meta["committer"]["name"]),
            commit_committer_email: text(&meta["committer"]["email"]),
            commit_committer_date: text(&meta["committer"]["date"]),
            message: text_or_empty(&meta["message"]),
        }
    }

    /// Ordering key: author date first (missing dates sort as the empty
    /// string, before any real date), then repository, then sha, so runs
    /// are reproducible.
    pub fn sort_key(&self) -> (&str, &str, &str) {
        (
            self.commit_author_date.as_deref().unwrap_or(""),
            &self.repo_full_name,
            &self.sha,
        )
    }
}

fn text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn text_or_empty(value: &Value) -> String {
    value.as_str().unwrap_or_default().to_string()
}
