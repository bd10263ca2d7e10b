//! Analysis pipeline orchestration

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::commits::classify_commit;
use crate::contributors::summarize_contributors;
use crate::git::{GitCli, GitHistory};
use crate::metrics::collect_metrics;
use crate::report::AnalysisReport;
use crate::score::suitability_score;
use coevo_core::{AnalysisConfig, CoevoError, CoevoResult, ErrorContext, MetamodelStats};

/// Pathspec matching language structure files
const STRUCTURE_PATHSPEC: &str = "*structure.mps";
/// Pathspec matching any MPS model file
const MPS_PATHSPEC: &str = "*.mps";

/// Runs the full analysis pipeline against one local checkout
pub struct RepositoryAnalyzer {
    repo_path: PathBuf,
    config: AnalysisConfig,
}

impl RepositoryAnalyzer {
    pub fn new<P: AsRef<Path>>(repo_path: P, config: AnalysisConfig) -> Self {
        Self {
            repo_path: repo_path.as_ref().to_path_buf(),
            config,
        }
    }

    /// Analyze the checkout using the system git binary
    pub async fn analyze(&self) -> CoevoResult<AnalysisReport> {
        if !self.repo_path.exists() {
            return Err(CoevoError::NotFound {
                resource: self.repo_path.display().to_string(),
                context: ErrorContext::new("analyzer")
                    .with_operation("analyze")
                    .with_suggestion("Check that the path points to a local checkout"),
            });
        }

        let git = GitCli::new(&self.repo_path);
        self.analyze_with(&git).await
    }

    /// Pipeline body, parameterized over the history source so it can run on
    /// synthetic data
    pub async fn analyze_with(&self, git: &dyn GitHistory) -> CoevoResult<AnalysisReport> {
        let basic_metrics = collect_metrics(&self.repo_path, git).await;

        info!("inspecting metamodel changes");
        let structure_commits = git.commits_touching(STRUCTURE_PATHSPEC).await;
        let mps_commits = git.commits_touching(MPS_PATHSPEC).await;
        let metamodel_stats = MetamodelStats {
            structure_commits_count: structure_commits.len() as u64,
            total_mps_commits: mps_commits.len() as u64,
        };

        let mut metamodel_changes = Vec::new();
        for hash in structure_commits.iter().take(self.config.commit_sample_size) {
            match git.commit_detail(hash).await {
                Some(detail) => metamodel_changes.push(classify_commit(hash, detail)),
                None => warn!(%hash, "skipping commit with unreadable metadata"),
            }
        }

        let contributors = summarize_contributors(git, self.config.top_contributors).await;

        let suitability_score =
            suitability_score(&basic_metrics, &metamodel_stats, &metamodel_changes);

        Ok(AnalysisReport {
            repository: repo_name(&self.repo_path),
            basic_metrics,
            metamodel_changes,
            metamodel_stats,
            contributors,
            suitability_score,
        })
    }
}

fn repo_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::testing::FakeHistory;
    use crate::git::CommitDetail;
    use coevo_core::{ChangeCategory, ContributorEntry};
    use std::collections::HashMap;

    fn synthetic_history(structure_commits: usize) -> FakeHistory {
        let hashes: Vec<String> = (0..structure_commits).map(|i| format!("c{i:03}")).collect();

        let mut details = HashMap::new();
        for hash in &hashes {
            details.insert(
                hash.clone(),
                CommitDetail {
                    message: "add new concept".to_string(),
                    author: "ana".to_string(),
                    date: "2021-06-01 10:00:00 +0000".to_string(),
                    files: vec!["lang/structure.mps".to_string()],
                },
            );
        }

        let mut touching = HashMap::new();
        touching.insert(STRUCTURE_PATHSPEC.to_string(), hashes.clone());
        touching.insert(
            MPS_PATHSPEC.to_string(),
            (0..structure_commits * 2).map(|i| format!("m{i:03}")).collect(),
        );

        FakeHistory {
            commit_count: 200,
            first_date: Some("2019-01-01 10:00:00 +0000".to_string()),
            last_date: Some("2022-01-01 10:00:00 +0000".to_string()),
            contributors: vec![
                ContributorEntry {
                    name: "ana".to_string(),
                    commits: 150,
                },
                ContributorEntry {
                    name: "bob".to_string(),
                    commits: 50,
                },
            ],
            touching,
            details,
            years: vec!["2019".to_string(), "2021".to_string(), "2021".to_string()],
        }
    }

    #[tokio::test]
    async fn test_pipeline_produces_full_report() {
        let dir = tempfile::tempdir().unwrap();
        let analyzer = RepositoryAnalyzer::new(dir.path(), AnalysisConfig::default());
        let git = synthetic_history(5);

        let report = analyzer.analyze_with(&git).await.unwrap();

        assert_eq!(report.basic_metrics.total_commits, 200);
        assert_eq!(report.basic_metrics.contributor_count, 2);
        assert_eq!(report.metamodel_stats.structure_commits_count, 5);
        assert_eq!(report.metamodel_stats.total_mps_commits, 10);
        assert_eq!(report.metamodel_changes.len(), 5);
        assert!(report
            .metamodel_changes
            .iter()
            .all(|c| c.change_type == ChangeCategory::Structural));
        assert!(report.suitability_score >= 0.0 && report.suitability_score <= 100.0);
    }

    #[tokio::test]
    async fn test_commit_sample_is_capped() {
        let dir = tempfile::tempdir().unwrap();
        let analyzer = RepositoryAnalyzer::new(dir.path(), AnalysisConfig::default());
        let git = synthetic_history(35);

        let report = analyzer.analyze_with(&git).await.unwrap();

        // The stats count every structural commit, the inspected sample is
        // capped at the configured size.
        assert_eq!(report.metamodel_stats.structure_commits_count, 35);
        assert_eq!(report.metamodel_changes.len(), 20);
    }

    #[tokio::test]
    async fn test_unreadable_commits_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let analyzer = RepositoryAnalyzer::new(dir.path(), AnalysisConfig::default());

        let mut git = synthetic_history(3);
        git.details.remove("c001");

        let report = analyzer.analyze_with(&git).await.unwrap();
        assert_eq!(report.metamodel_stats.structure_commits_count, 3);
        assert_eq!(report.metamodel_changes.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_path_is_reported() {
        let analyzer = RepositoryAnalyzer::new(
            "/nonexistent/repositories/mbeddr.core",
            AnalysisConfig::default(),
        );
        let result = analyzer.analyze().await;
        assert!(matches!(result, Err(CoevoError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_score_is_stable_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let analyzer = RepositoryAnalyzer::new(dir.path(), AnalysisConfig::default());
        let git = synthetic_history(8);

        let first = analyzer.analyze_with(&git).await.unwrap();
        let second = analyzer.analyze_with(&git).await.unwrap();
        assert_eq!(first.suitability_score, second.suitability_score);
    }
}
