//! Contribution pattern aggregation

use std::collections::BTreeMap;

use tracing::info;

use crate::git::GitHistory;
use coevo_core::ContributorSummary;

/// Rank contributors and bucket commit activity by calendar year.
///
/// Identities come verbatim from the history tool; two spellings of the same
/// person count as two contributors.
pub async fn summarize_contributors(git: &dyn GitHistory, top_n: usize) -> ContributorSummary {
    info!("aggregating contributors");

    let mut top_contributors = git.contributors().await;
    top_contributors.sort_by(|a, b| b.commits.cmp(&a.commits));
    top_contributors.truncate(top_n);

    let mut yearly_activity = BTreeMap::new();
    for year in git.commit_years().await {
        *yearly_activity.entry(year).or_insert(0u64) += 1;
    }

    ContributorSummary {
        top_contributors,
        yearly_activity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::testing::FakeHistory;
    use coevo_core::ContributorEntry;

    fn entry(name: &str, commits: u64) -> ContributorEntry {
        ContributorEntry {
            name: name.to_string(),
            commits,
        }
    }

    #[tokio::test]
    async fn test_top_contributors_ranked_and_truncated() {
        let git = FakeHistory {
            contributors: (0..15).map(|i| entry(&format!("dev{i}"), i)).collect(),
            ..Default::default()
        };

        let summary = summarize_contributors(&git, 10).await;
        assert_eq!(summary.top_contributors.len(), 10);
        assert_eq!(summary.top_contributors[0].commits, 14);
        assert_eq!(summary.top_contributors[9].commits, 5);
    }

    #[tokio::test]
    async fn test_yearly_activity_buckets() {
        let git = FakeHistory {
            years: vec![
                "2021".to_string(),
                "2021".to_string(),
                "2023".to_string(),
            ],
            ..Default::default()
        };

        let summary = summarize_contributors(&git, 10).await;
        assert_eq!(summary.yearly_activity.get("2021"), Some(&2));
        assert_eq!(summary.yearly_activity.get("2023"), Some(&1));
        assert_eq!(summary.yearly_activity.get("2022"), None);
    }

    #[tokio::test]
    async fn test_duplicate_spellings_stay_distinct() {
        let git = FakeHistory {
            contributors: vec![entry("Ana P", 5), entry("ana p", 3)],
            ..Default::default()
        };

        let summary = summarize_contributors(&git, 10).await;
        assert_eq!(summary.top_contributors.len(), 2);
    }
}
