//! Sequential collection across every target repository.

use tracing::{info, warn};

use crate::error::FetchResult;
use crate::github::client::{CommitQuery, GitHubClient};
use crate::github::targets::RepoTarget;
use crate::github::transport::Transport;
use crate::models::CommitRow;

/// Fetch, flatten and sort commits from each target in turn.
///
/// A 404 means the repository is gone, renamed, or invisible to the token;
/// that target is skipped with a warning. Any other failure aborts the run.
/// The result is sorted by (author date, repository full name, sha), with
/// missing author dates first.
pub fn collect_rows<T: Transport>(
    client: &GitHubClient<T>,
    targets: &[RepoTarget],
    query: &CommitQuery,
) -> FetchResult<Vec<CommitRow>> {
    let mut rows = Vec::new();
    for target in targets {
        match client.commits_for_repo(target, query) {
            Ok(commits) => {
                info!(
                    "{}: {} commits by {}",
                    target.full_name(),
                    commits.len(),
                    query.author
                );
                rows.extend(
                    commits
                        .iter()
                        .map(|commit| CommitRow::from_payload(target, commit)),
                );
            }
            Err(err) if err.is_not_found() => {
                warn!("skipping {}: {}", target.full_name(), err);
            }
            Err(err) => return Err(err),
        }
    }
    rows.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    Ok(rows)
}
