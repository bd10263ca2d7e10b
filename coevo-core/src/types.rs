//! Core data type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate history metrics for one repository checkout.
///
/// Collected once per analysis run; every field degrades to zero/`None` when
/// the underlying history query fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryMetrics {
    pub total_commits: u64,
    pub first_commit_date: Option<String>,
    pub last_commit_date: Option<String>,
    pub contributor_count: u64,
    pub mps_files_count: u64,
    /// Whole days between first and last commit, zero when either date is
    /// missing or malformed.
    pub repository_age_days: i64,
}

/// One inspected commit together with its derived classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    pub hash: String,
    pub message: String,
    pub author: String,
    pub date: String,
    pub files_changed: Vec<String>,
    pub change_type: ChangeCategory,
    pub is_breaking: bool,
}

/// Kind of change a commit makes to a language or its models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeCategory {
    Structural,
    Presentation,
    Migration,
    Addition,
    Removal,
    Modification,
}

impl ChangeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeCategory::Structural => "structural",
            ChangeCategory::Presentation => "presentation",
            ChangeCategory::Migration => "migration",
            ChangeCategory::Addition => "addition",
            ChangeCategory::Removal => "removal",
            ChangeCategory::Modification => "modification",
        }
    }
}

/// A contributor identity with its commit count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorEntry {
    pub name: String,
    pub commits: u64,
}

/// Contribution patterns derived from the history.
///
/// Identities are taken verbatim from the history tool; two spellings of the
/// same person count as two contributors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContributorSummary {
    /// Top contributors ranked by commit count, descending
    pub top_contributors: Vec<ContributorEntry>,
    /// Commits per calendar year
    pub yearly_activity: BTreeMap<String, u64>,
}

/// Counts of commits touching metamodel files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetamodelStats {
    pub structure_commits_count: u64,
    pub total_mps_commits: u64,
}

/// One classified file found by the scanner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileArtifact {
    pub path: String,
    pub name: String,
    #[serde(rename = "type")]
    pub artifact_type: ArtifactType,
    pub extension: String,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
    pub is_metamodel: bool,
}

/// Recognized MPS artifact kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactType {
    Structure,
    Behavior,
    Editor,
    Generator,
    Typesystem,
    Constraints,
    LanguageDefinition,
    ModelInstance,
    Solution,
    Devkit,
    Unknown,
}

impl ArtifactType {
    pub fn name(&self) -> &'static str {
        match self {
            ArtifactType::Structure => "structure",
            ArtifactType::Behavior => "behavior",
            ArtifactType::Editor => "editor",
            ArtifactType::Generator => "generator",
            ArtifactType::Typesystem => "typesystem",
            ArtifactType::Constraints => "constraints",
            ArtifactType::LanguageDefinition => "language_definition",
            ArtifactType::ModelInstance => "model_instance",
            ArtifactType::Solution => "solution",
            ArtifactType::Devkit => "devkit",
            ArtifactType::Unknown => "unknown",
        }
    }
}

/// Toolkit configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoevoConfig {
    pub analysis: AnalysisConfig,
    pub scan: ScanConfig,
    pub discovery: DiscoveryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// How many structural commits to inspect in detail per repository
    pub commit_sample_size: usize,
    /// How many contributors to keep in the ranked summary
    pub top_contributors: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// How many leading bytes of a file to probe for content markers
    pub content_probe_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Search queries issued against the repository-search API
    pub queries: Vec<String>,
    /// Results requested per query
    pub per_page: u32,
}
