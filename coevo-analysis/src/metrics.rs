//! Best-effort collection of repository-level metrics

use chrono::{DateTime, FixedOffset};
use std::path::Path;
use tracing::info;
use walkdir::WalkDir;

use crate::git::GitHistory;
use coevo_core::RepositoryMetrics;

/// Extension counted towards the model-file metric
const MODEL_FILE_EXTENSION: &str = "mps";

/// Collect the basic metrics for one checkout.
///
/// Missing or unparsable values degrade to zero/`None`; partial data is
/// preferred over a failed batch run.
pub async fn collect_metrics(repo_path: &Path, git: &dyn GitHistory) -> RepositoryMetrics {
    info!(repo = %repo_path.display(), "collecting basic metrics");

    let total_commits = git.commit_count().await;
    let first_commit_date = git.first_commit_date().await;
    let last_commit_date = git.last_commit_date().await;
    let contributor_count = git.contributors().await.len() as u64;
    let mps_files_count = count_files_with_extension(repo_path, MODEL_FILE_EXTENSION);
    let repository_age_days =
        repository_age_days(first_commit_date.as_deref(), last_commit_date.as_deref());

    RepositoryMetrics {
        total_commits,
        first_commit_date,
        last_commit_date,
        contributor_count,
        mps_files_count,
        repository_age_days,
    }
}

/// Whole days between the first and last commit, zero when either date is
/// missing or malformed.
pub fn repository_age_days(first: Option<&str>, last: Option<&str>) -> i64 {
    let (Some(first), Some(last)) = (first, last) else {
        return 0;
    };
    match (parse_commit_date(first), parse_commit_date(last)) {
        (Some(first), Some(last)) => (last - first).num_days().max(0),
        _ => 0,
    }
}

/// Parse a `git log --format=%ci` timestamp such as
/// `2023-05-01 12:00:00 +0200`
fn parse_commit_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw.trim(), "%Y-%m-%d %H:%M:%S %z").ok()
}

/// Count files below `root` carrying the given extension
pub(crate) fn count_files_with_extension(root: &Path, extension: &str) -> u64 {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case(extension))
                .unwrap_or(false)
        })
        .count() as u64
}
