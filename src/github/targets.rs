//! The fixed set of repositories the tool walks.

/// One `(org, repo)` pair to fetch commits from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepoTarget {
    pub org: &'static str,
    pub name: &'static str,
}

impl RepoTarget {
    pub const fn new(org: &'static str, name: &'static str) -> Self {
        Self { org, name }
    }

    /// `owner/name`, as the API path and the output rows use it.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.org, self.name)
    }
}

/// Target list, walked in order. Deliberately a static table rather than a
/// flag: the tool exists to audit this exact set.
pub const TARGET_REPOS: &[RepoTarget] = &[
    RepoTarget::new("GrandCharter", "grand-charter"),
    RepoTarget::new("GrandCharter", "outlook-integration"),
    RepoTarget::new("GrandCharter", "email-integrations"),
    RepoTarget::new("casexchange", "case-xchange"),
];
