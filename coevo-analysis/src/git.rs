//! Narrow interface over the git history of a local checkout
//!
//! Classification and scoring code depends on [`GitHistory`] only, so the
//! pipeline can be exercised with synthetic data instead of a real repository.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

use coevo_core::ContributorEntry;

/// Metadata for a single commit
#[derive(Debug, Clone, Default)]
pub struct CommitDetail {
    pub message: String,
    pub author: String,
    pub date: String,
    pub files: Vec<String>,
}

/// History queries the analysis pipeline needs
#[async_trait]
pub trait GitHistory: Send + Sync {
    /// Total number of commits reachable from the current head
    async fn commit_count(&self) -> u64;

    /// Timestamp of the oldest commit, if any history exists
    async fn first_commit_date(&self) -> Option<String>;

    /// Timestamp of the newest commit, if any history exists
    async fn last_commit_date(&self) -> Option<String>;

    /// Every contributor with commit count, descending
    async fn contributors(&self) -> Vec<ContributorEntry>;

    /// Hashes of commits touching files matching `pathspec`, newest first
    async fn commits_touching(&self, pathspec: &str) -> Vec<String>;

    /// Message, author, date and changed-file list for one commit
    async fn commit_detail(&self, hash: &str) -> Option<CommitDetail>;

    /// Calendar year of every commit, in capture order
    async fn commit_years(&self) -> Vec<String>;
}

/// [`GitHistory`] backed by the system `git` binary.
///
/// Every query is best effort: a failed invocation or nonzero exit is logged
/// and degrades to empty output, never to an error. Partial data is preferred
/// over aborting a multi-repository batch.
pub struct GitCli {
    repo_path: PathBuf,
}

impl GitCli {
    pub fn new<P: AsRef<Path>>(repo_path: P) -> Self {
        Self {
            repo_path: repo_path.as_ref().to_path_buf(),
        }
    }

    async fn run(&self, args: &[&str]) -> String {
        debug!(?args, "running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .stdin(Stdio::null())
            .output()
            .await;

        match output {
            Ok(out) if out.status.success() => {
                String::from_utf8_lossy(&out.stdout).trim().to_string()
            }
            Ok(out) => {
                warn!(
                    ?args,
                    status = ?out.status.code(),
                    "git exited nonzero, substituting empty output"
                );
                String::new()
            }
            Err(e) => {
                warn!(?args, error = %e, "failed to invoke git");
                String::new()
            }
        }
    }
}

#[async_trait]
impl GitHistory for GitCli {
    async fn commit_count(&self) -> u64 {
        self.run(&["rev-list", "--count", "HEAD"])
            .await
            .parse()
            .unwrap_or(0)
    }

    async fn first_commit_date(&self) -> Option<String> {
        let out = self.run(&["log", "--reverse", "--format=%ci"]).await;
        out.lines()
            .next()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
    }

    async fn last_commit_date(&self) -> Option<String> {
        let out = self.run(&["log", "--format=%ci", "-1"]).await;
        if out.is_empty() {
            None
        } else {
            Some(out)
        }
    }

    async fn contributors(&self) -> Vec<ContributorEntry> {
        let out = self.run(&["shortlog", "-sn", "--all"]).await;
        out.lines().filter_map(parse_shortlog_line).collect()
    }

    async fn commits_touching(&self, pathspec: &str) -> Vec<String> {
        let out = self.run(&["log", "--format=%H", "--", pathspec]).await;
        out.lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect()
    }

    async fn commit_detail(&self, hash: &str) -> Option<CommitDetail> {
        let meta = self.run(&["log", "--format=%s%n%an%n%ci", "-1", hash]).await;
        if meta.is_empty() {
            return None;
        }

        let mut lines = meta.lines();
        let message = lines.next().unwrap_or("").to_string();
        let author = lines.next().unwrap_or("").to_string();
        let date = lines.next().unwrap_or("").to_string();

        let files = self.run(&["show", "--name-only", "--format=", hash]).await;
        let files = files
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();

        Some(CommitDetail {
            message,
            author,
            date,
            files,
        })
    }

    async fn commit_years(&self) -> Vec<String> {
        let out = self.run(&["log", "--format=%ci"]).await;
        out.lines()
            .filter_map(|l| l.get(..4))
            .map(str::to_string)
            .collect()
    }
}

/// Parse one `shortlog -sn` line of the form `"  42\tAuthor Name"`
fn parse_shortlog_line(line: &str) -> Option<ContributorEntry> {
    let (count, name) = line.trim().split_once(char::is_whitespace)?;
    let commits = count.trim().parse().ok()?;
    let name = name.trim().to_string();
    if name.is_empty() {
        return None;
    }
    Some(ContributorEntry { name, commits })
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;

    /// In-memory history for exercising the pipeline without a repository
    #[derive(Default)]
    pub struct FakeHistory {
        pub commit_count: u64,
        pub first_date: Option<String>,
        pub last_date: Option<String>,
        pub contributors: Vec<ContributorEntry>,
        pub touching: HashMap<String, Vec<String>>,
        pub details: HashMap<String, CommitDetail>,
        pub years: Vec<String>,
    }

    #[async_trait]
    impl GitHistory for FakeHistory {
        async fn commit_count(&self) -> u64 {
            self.commit_count
        }

        async fn first_commit_date(&self) -> Option<String> {
            self.first_date.clone()
        }

        async fn last_commit_date(&self) -> Option<String> {
            self.last_date.clone()
        }

        async fn contributors(&self) -> Vec<ContributorEntry> {
            self.contributors.clone()
        }

        async fn commits_touching(&self, pathspec: &str) -> Vec<String> {
            self.touching.get(pathspec).cloned().unwrap_or_default()
        }

        async fn commit_detail(&self, hash: &str) -> Option<CommitDetail> {
            self.details.get(hash).cloned()
        }

        async fn commit_years(&self) -> Vec<String> {
            self.years.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shortlog_line() {
        let entry = parse_shortlog_line("   42\tAna Poltronieri").unwrap();
        assert_eq!(entry.commits, 42);
        assert_eq!(entry.name, "Ana Poltronieri");

        assert!(parse_shortlog_line("").is_none());
        assert!(parse_shortlog_line("not-a-count name").is_none());
    }

    // Pointing GitCli at a directory that is not a repository exercises the
    // degradation path: every query falls back to zero/empty.
    #[tokio::test]
    async fn test_queries_degrade_outside_a_repository() {
        let dir = tempfile::tempdir().unwrap();
        let git = GitCli::new(dir.path());

        assert_eq!(git.commit_count().await, 0);
        assert_eq!(git.first_commit_date().await, None);
        assert_eq!(git.last_commit_date().await, None);
        assert!(git.contributors().await.is_empty());
        assert!(git.commits_touching("*.mps").await.is_empty());
        assert!(git.commit_years().await.is_empty());
    }
}
