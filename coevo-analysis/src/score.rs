//! Heuristic suitability scoring
//!
//! Triage score used to rank candidate repositories for manual research
//! review. Each term is clamped independently before summation and the final
//! sum is clamped to [0, 100].

use coevo_core::{CommitRecord, MetamodelStats, RepositoryMetrics};

/// Cap applied to every additive term
const TERM_CAP: f64 = 20.0;
/// Model-file count above which the size bonus applies
const FILE_COUNT_BONUS_THRESHOLD: u64 = 50;
/// Repository age above which the maturity bonus applies
const MATURE_AGE_DAYS: i64 = 365 * 2;
/// Flat bonus for each of the two threshold criteria
const BONUS: f64 = 10.0;

/// Compute the 0-100 suitability score.
///
/// Pure function of its inputs: identical metrics and commit records always
/// yield the identical score.
pub fn suitability_score(
    metrics: &RepositoryMetrics,
    stats: &MetamodelStats,
    changes: &[CommitRecord],
) -> f64 {
    let mut score = 0.0;

    // Age floor of one year keeps the velocity term defined for young
    // repositories.
    let age_years = (metrics.repository_age_days as f64 / 365.0).max(1.0);
    let commits_per_year = metrics.total_commits as f64 / age_years;
    score += commits_per_year.min(TERM_CAP);

    score += ((metrics.contributor_count * 2) as f64).min(TERM_CAP);

    score += (stats.structure_commits_count as f64 / 10.0).min(TERM_CAP);

    let breaking_changes = changes.iter().filter(|c| c.is_breaking).count() as u64;
    score += ((breaking_changes * 2) as f64).min(TERM_CAP);

    if metrics.mps_files_count > FILE_COUNT_BONUS_THRESHOLD {
        score += BONUS;
    }
    if metrics.repository_age_days > MATURE_AGE_DAYS {
        score += BONUS;
    }

    score.min(100.0)
}
