//! Model and metamodel discovery over a local file tree
//!
//! Walks every file under a root directory, classifies recognized MPS
//! artifacts by filename suffix and content markers, and splits them into
//! metamodel and model-instance inventories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

use coevo_core::{ArtifactType, CoevoError, CoevoResult, ErrorContext, FileArtifact, ScanConfig};

/// File extensions recognized as MPS artifacts
const MPS_EXTENSIONS: &[&str] = &["mps", "mpl", "msd", "devkit", "xml"];

/// Filename suffixes with a fixed artifact type; first match wins
const NAME_RULES: &[(&str, ArtifactType)] = &[
    ("structure.mps", ArtifactType::Structure),
    ("behavior.mps", ArtifactType::Behavior),
    ("editor.mps", ArtifactType::Editor),
    ("generator.mps", ArtifactType::Generator),
    ("typesystem.mps", ArtifactType::Typesystem),
    ("constraints.mps", ArtifactType::Constraints),
];

/// Content markers probed when no filename rule applies; first match wins
const CONTENT_RULES: &[(&[&str], ArtifactType)] = &[
    (&["language=", "<language"], ArtifactType::LanguageDefinition),
    (&["model=", "<model"], ArtifactType::ModelInstance),
    (&["solution="], ArtifactType::Solution),
    (&["devkit="], ArtifactType::Devkit),
];

/// Path fragments marking an artifact as part of a language definition
const METAMODEL_INDICATORS: &[&str] = &[
    "structure",
    "behavior",
    "editor",
    "generator",
    "typesystem",
    "constraints",
    "language",
    "/languages/",
    "/devkits/",
];

/// Classify by filename suffix, then content markers, else unknown
pub fn classify_artifact_type(file_name: &str, content_head: &str) -> ArtifactType {
    let name = file_name.to_lowercase();
    for (suffix, artifact_type) in NAME_RULES {
        if name.ends_with(suffix) {
            return *artifact_type;
        }
    }

    for (markers, artifact_type) in CONTENT_RULES {
        if markers.iter().any(|marker| content_head.contains(marker)) {
            return *artifact_type;
        }
    }

    ArtifactType::Unknown
}

/// Metamodel versus model instance, decided by path indicators alone.
///
/// Any-match predicate: indicator order does not affect the outcome.
pub fn is_metamodel_path(path: &str) -> bool {
    let path = path.to_lowercase();
    METAMODEL_INDICATORS
        .iter()
        .any(|indicator| path.contains(indicator))
}

/// Metadata block of the scan report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanMetadata {
    pub repository_path: String,
    pub scan_timestamp: DateTime<Utc>,
    pub total_files_scanned: u64,
}

/// Complete result of one scan run; the serialized form is the persisted
/// report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub metadata: ScanMetadata,
    pub statistics: BTreeMap<String, u64>,
    pub models: Vec<FileArtifact>,
    pub metamodels: Vec<FileArtifact>,
}

impl ScanReport {
    /// Statistics block rendered for the console
    pub fn render_statistics(&self) -> String {
        let mut out = String::new();
        out.push_str("DETAILED STATISTICS\n");
        out.push_str(&"=".repeat(60));
        out.push('\n');
        out.push_str(&format!(
            "Total MPS files: {}\n",
            self.statistics.get("total_mps_files").copied().unwrap_or(0)
        ));
        out.push_str(&format!(
            "Models found: {}\n",
            self.statistics.get("models").copied().unwrap_or(0)
        ));
        out.push_str(&format!(
            "Metamodels found: {}\n",
            self.statistics.get("metamodels").copied().unwrap_or(0)
        ));

        out.push_str("\nDistribution by type:\n");
        for (key, count) in self.statistics.iter() {
            if let Some(type_name) = key.strip_prefix("type_") {
                out.push_str(&format!("  {}: {}\n", type_name, count));
            }
        }

        let recent = self.recently_modified(5);
        if !recent.is_empty() {
            out.push_str("\nRecently modified files:\n");
            for artifact in recent {
                let stamp = artifact
                    .modified
                    .map(|m| m.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                out.push_str(&format!("  {} - {}\n", artifact.name, stamp));
            }
        }

        out
    }

    /// Example findings rendered for the console
    pub fn render_samples(&self, limit: usize) -> String {
        let mut out = String::new();

        out.push_str(&format!("SAMPLE MODELS (first {limit}):\n"));
        for (i, artifact) in self.models.iter().take(limit).enumerate() {
            out.push_str(&render_sample_entry(i, artifact));
        }

        out.push_str(&format!("\nSAMPLE METAMODELS (first {limit}):\n"));
        for (i, artifact) in self.metamodels.iter().take(limit).enumerate() {
            out.push_str(&render_sample_entry(i, artifact));
        }

        out
    }

    /// All artifacts ordered by modification time, newest first
    pub fn recently_modified(&self, limit: usize) -> Vec<&FileArtifact> {
        let mut all: Vec<&FileArtifact> =
            self.models.iter().chain(self.metamodels.iter()).collect();
        all.sort_by(|a, b| b.modified.cmp(&a.modified));
        all.truncate(limit);
        all
    }

    /// Write the JSON document to `path`
    pub fn export_json<P: AsRef<Path>>(&self, path: P) -> CoevoResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        info!(path = %path.as_ref().display(), "scan report exported");
        Ok(())
    }
}

fn render_sample_entry(index: usize, artifact: &FileArtifact) -> String {
    format!(
        "{}. {}\n   type: {}\n   path: {}\n   size: {} bytes\n",
        index + 1,
        artifact.name,
        artifact.artifact_type.name(),
        artifact.path,
        artifact.size
    )
}

/// Walks a file tree and classifies every recognized artifact
pub struct ModelScanner {
    root: PathBuf,
    config: ScanConfig,
}

impl ModelScanner {
    pub fn new<P: AsRef<Path>>(root: P, config: ScanConfig) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            config,
        }
    }

    /// Scan the tree and build the full report
    pub fn scan(&self) -> CoevoResult<ScanReport> {
        if !self.root.exists() {
            return Err(CoevoError::NotFound {
                resource: self.root.display().to_string(),
                context: ErrorContext::new("scanner")
                    .with_operation("scan")
                    .with_suggestion("Check that the repository path exists"),
            });
        }

        info!(root = %self.root.display(), "scanning repository");

        let mut models = Vec::new();
        let mut metamodels = Vec::new();

        for entry in WalkDir::new(&self.root).into_iter().filter_map(Result::ok) {
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(artifact) = self.inspect_file(entry.path()) {
                if artifact.is_metamodel {
                    metamodels.push(artifact);
                } else {
                    models.push(artifact);
                }
            }
        }

        info!(
            models = models.len(),
            metamodels = metamodels.len(),
            "scan finished"
        );

        let statistics = build_statistics(&models, &metamodels);
        let metadata = ScanMetadata {
            repository_path: self.root.display().to_string(),
            scan_timestamp: Utc::now(),
            total_files_scanned: (models.len() + metamodels.len()) as u64,
        };

        Ok(ScanReport {
            metadata,
            statistics,
            models,
            metamodels,
        })
    }

    /// Classify a single file; returns `None` for non-MPS extensions
    fn inspect_file(&self, path: &Path) -> Option<FileArtifact> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        if !MPS_EXTENSIONS.contains(&extension.as_str()) {
            return None;
        }

        let name = path.file_name()?.to_str()?.to_string();
        let content_head = read_head(path, self.config.content_probe_bytes);
        let artifact_type = classify_artifact_type(&name, &content_head);

        let path_str = path.display().to_string();
        let is_metamodel = is_metamodel_path(&path_str);

        let (size, modified) = match path.metadata() {
            Ok(meta) => (meta.len(), meta.modified().ok().map(DateTime::<Utc>::from)),
            Err(_) => (0, None),
        };

        Some(FileArtifact {
            path: path_str,
            name,
            artifact_type,
            extension: format!(".{extension}"),
            size,
            modified,
            is_metamodel,
        })
    }
}

/// First `limit` bytes of the file, lossily decoded; unreadable files probe
/// as empty
fn read_head(path: &Path, limit: usize) -> String {
    match std::fs::read(path) {
        Ok(bytes) => {
            let head = &bytes[..bytes.len().min(limit)];
            String::from_utf8_lossy(head).to_string()
        }
        Err(_) => String::new(),
    }
}

fn build_statistics(models: &[FileArtifact], metamodels: &[FileArtifact]) -> BTreeMap<String, u64> {
    let mut stats = BTreeMap::new();
    stats.insert(
        "total_mps_files".to_string(),
        (models.len() + metamodels.len()) as u64,
    );
    stats.insert("models".to_string(), models.len() as u64);
    stats.insert("metamodels".to_string(), metamodels.len() as u64);

    for artifact in models.iter().chain(metamodels.iter()) {
        *stats
            .entry(format!("type_{}", artifact.artifact_type.name()))
            .or_insert(0) += 1;
    }

    stats
}
