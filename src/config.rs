//! Runtime settings: HTTP client knobs and token resolution.

/// Environment variable consulted when no token flag is given.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Default `User-Agent` header; GitHub rejects requests without one.
pub const DEFAULT_USER_AGENT: &str = concat!("gh-org-commits/", env!("CARGO_PKG_VERSION"));

/// Settings applied to every request the transport issues.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Bearer token; anonymous requests work but are rate-limited hard.
    pub token: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            token: None,
        }
    }
}

/// Load `.env` from the working directory into the environment. Existing
/// variables win over file entries; a missing file is not an error.
pub fn load_env_file() {
    let _ = dotenv::dotenv();
}

/// Token that requests should carry: the flag when given, otherwise the
/// environment value. Blank values count as unset.
pub fn effective_token(flag: Option<&str>, env: Option<&str>) -> Option<String> {
    flag.filter(|t| !t.trim().is_empty())
        .or(env.filter(|t| !t.trim().is_empty()))
        .map(str::to_string)
}
