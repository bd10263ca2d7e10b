//! Configuration management

use crate::error::{CoevoError, CoevoResult, ErrorContext};
use crate::types::{AnalysisConfig, CoevoConfig, DiscoveryConfig, ScanConfig};

use std::path::Path;

/// Default query set for the discovery pipeline
const DEFAULT_QUERIES: &[&str] = &[
    "mbeddr",
    "mbeddr.core",
    "com.mbeddr",
    "language:mps mbeddr",
    "jetbrains mps embedded",
    "mbeddr language:mps",
    "mbeddr extension:mpr",
    "com.mbeddr.core in:file",
];

impl Default for CoevoConfig {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            scan: ScanConfig::default(),
            discovery: DiscoveryConfig::default(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            commit_sample_size: 20,
            top_contributors: 10,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            content_probe_bytes: 1000,
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            queries: DEFAULT_QUERIES.iter().map(|q| q.to_string()).collect(),
            per_page: 10,
        }
    }
}

impl CoevoConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> CoevoResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoevoError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: CoevoConfig = toml::from_str(&content).map_err(|e| CoevoError::Config {
            message: format!("Failed to parse config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("parse_toml")
                .with_suggestion("Check TOML syntax in config file"),
        })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> CoevoResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| CoevoError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| CoevoError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> CoevoResult<()> {
        if self.analysis.commit_sample_size == 0 {
            return Err(CoevoError::Config {
                message: "analysis.commit_sample_size must be greater than 0".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set analysis.commit_sample_size to a positive value"),
            });
        }

        if self.analysis.top_contributors == 0 {
            return Err(CoevoError::Config {
                message: "analysis.top_contributors must be greater than 0".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set analysis.top_contributors to a positive value"),
            });
        }

        if self.scan.content_probe_bytes == 0 {
            return Err(CoevoError::Config {
                message: "scan.content_probe_bytes must be greater than 0".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set scan.content_probe_bytes to a positive value"),
            });
        }

        if self.discovery.per_page == 0 || self.discovery.per_page > 100 {
            return Err(CoevoError::Config {
                message: "discovery.per_page must be between 1 and 100".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("The search API caps page sizes at 100"),
            });
        }

        if self.discovery.queries.is_empty() {
            return Err(CoevoError::Config {
                message: "discovery.queries must not be empty".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Provide at least one search query"),
            });
        }

        Ok(())
    }
}
