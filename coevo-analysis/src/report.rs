//! Analysis report rendering and JSON export

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use coevo_core::{
    CoevoResult, CommitRecord, ContributorSummary, MetamodelStats, RepositoryMetrics,
};

/// Score at or above which a repository is suitable for the study
const SUITABLE_THRESHOLD: f64 = 70.0;
/// Score at or above which a repository is of limited use
const LIMITED_THRESHOLD: f64 = 50.0;

/// Complete result of one analysis run.
///
/// The serialized form is the persisted report; its field names are the
/// contract with downstream consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(skip)]
    pub repository: String,
    pub basic_metrics: RepositoryMetrics,
    pub metamodel_changes: Vec<CommitRecord>,
    pub metamodel_stats: MetamodelStats,
    pub contributors: ContributorSummary,
    pub suitability_score: f64,
}

impl AnalysisReport {
    /// Breaking commits among the inspected sample
    pub fn breaking_change_count(&self) -> usize {
        self.metamodel_changes
            .iter()
            .filter(|c| c.is_breaking)
            .count()
    }

    /// Verdict line used for manual triage
    pub fn verdict(&self) -> &'static str {
        if self.suitability_score >= SUITABLE_THRESHOLD {
            "suitable"
        } else if self.suitability_score >= LIMITED_THRESHOLD {
            "limited"
        } else {
            "unsuitable"
        }
    }

    /// Human-readable report text
    pub fn render_text(&self) -> String {
        let metrics = &self.basic_metrics;
        let mut out = String::new();

        out.push_str("=== MPS REPOSITORY ANALYSIS ===\n");
        out.push_str(&format!("Repository: {}\n", self.repository));
        out.push_str(&format!(
            "Analyzed at: {}\n\n",
            Utc::now().format("%Y-%m-%d %H:%M")
        ));

        out.push_str("BASIC METRICS:\n");
        out.push_str(&format!("- Total commits: {}\n", metrics.total_commits));
        out.push_str(&format!("- Contributors: {}\n", metrics.contributor_count));
        out.push_str(&format!("- MPS files: {}\n", metrics.mps_files_count));
        out.push_str(&format!(
            "- Age (days): {}\n\n",
            metrics.repository_age_days
        ));

        out.push_str("METAMODEL EVOLUTION:\n");
        out.push_str(&format!(
            "- Structural commits: {}\n",
            self.metamodel_stats.structure_commits_count
        ));
        out.push_str(&format!(
            "- Breaking changes: {}\n\n",
            self.breaking_change_count()
        ));

        out.push_str(&format!(
            "SUITABILITY SCORE: {:.1}/100\n",
            self.suitability_score
        ));
        out.push_str(&format!("STATUS: {}\n", self.verdict().to_uppercase()));

        out
    }

    /// Write the JSON document to `path`
    pub fn export_json<P: AsRef<Path>>(&self, path: P) -> CoevoResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        info!(path = %path.as_ref().display(), "analysis report exported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coevo_core::ChangeCategory;

    fn sample_report(score: f64) -> AnalysisReport {
        AnalysisReport {
            repository: "mbeddr.core".to_string(),
            basic_metrics: RepositoryMetrics {
                total_commits: 730,
                first_commit_date: Some("2019-01-01 10:00:00 +0000".to_string()),
                last_commit_date: Some("2020-01-01 10:00:00 +0000".to_string()),
                contributor_count: 5,
                mps_files_count: 60,
                repository_age_days: 365,
            },
            metamodel_changes: vec![CommitRecord {
                hash: "abc123".to_string(),
                message: "remove deprecated concept".to_string(),
                author: "ana".to_string(),
                date: "2020-01-01 10:00:00 +0000".to_string(),
                files_changed: vec!["lang/structure.mps".to_string()],
                change_type: ChangeCategory::Structural,
                is_breaking: true,
            }],
            metamodel_stats: MetamodelStats {
                structure_commits_count: 20,
                total_mps_commits: 40,
            },
            contributors: ContributorSummary::default(),
            suitability_score: score,
        }
    }

    #[test]
    fn test_verdict_thresholds() {
        assert_eq!(sample_report(82.0).verdict(), "suitable");
        assert_eq!(sample_report(70.0).verdict(), "suitable");
        assert_eq!(sample_report(69.9).verdict(), "limited");
        assert_eq!(sample_report(50.0).verdict(), "limited");
        assert_eq!(sample_report(49.9).verdict(), "unsuitable");
    }

    #[test]
    fn test_render_text_mentions_key_figures() {
        let text = sample_report(48.0).render_text();
        assert!(text.contains("Repository: mbeddr.core"));
        assert!(text.contains("Total commits: 730"));
        assert!(text.contains("Structural commits: 20"));
        assert!(text.contains("SUITABILITY SCORE: 48.0/100"));
    }

    #[test]
    fn test_json_round_trip_preserves_fields() {
        let report = sample_report(48.0);
        let json = serde_json::to_string_pretty(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["basic_metrics"]["total_commits"], 730);
        assert_eq!(value["basic_metrics"]["repository_age_days"], 365);
        assert_eq!(value["metamodel_stats"]["structure_commits_count"], 20);
        assert_eq!(value["suitability_score"], 48.0);
        assert_eq!(value["metamodel_changes"][0]["hash"], "abc123");
        assert_eq!(value["metamodel_changes"][0]["change_type"], "structural");
        assert_eq!(value["metamodel_changes"][0]["is_breaking"], true);

        let parsed: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.basic_metrics.total_commits, 730);
        assert_eq!(parsed.metamodel_changes.len(), 1);
        assert_eq!(parsed.suitability_score, 48.0);
    }

    #[test]
    fn test_export_json_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis_test.json");

        sample_report(48.0).export_json(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(value.get("basic_metrics").is_some());
        assert!(value.get("metamodel_changes").is_some());
        assert!(value.get("contributors").is_some());
        assert!(value.get("suitability_score").is_some());
    }
}
