//! API clients for the remote repository search
//!
//! The search endpoint accepts a free-text query and a page size; the tree
//! endpoint returns every path on a repository's default branch. Both are
//! consumed through the [`SearchApiClient`] trait so the pipeline can run
//! against canned data in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use coevo_core::{CoevoError, CoevoResult, ErrorContext};

pub mod github;


pub use github::GitHubSearchClient;

/// One repository descriptor returned by a search query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoDescriptor {
    pub name: String,
    pub owner: String,
    pub description: Option<String>,
}

/// Result page of a repository search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub total_count: u64,
    pub items: Vec<RepoDescriptor>,
}

/// Configuration for search API clients
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Access token for authenticated requests
    pub access_token: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            access_token: None,
            timeout_seconds: 30,
            user_agent: "coevo/0.1".to_string(),
        }
    }
}

impl ApiClientConfig {
    /// Configuration for the public GitHub API
    pub fn github(access_token: Option<String>) -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            access_token,
            ..Default::default()
        }
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }
}

/// Trait for repository search endpoints
#[async_trait]
pub trait SearchApiClient: Send + Sync {
    /// Free-text repository search
    async fn search_repositories(&self, query: &str, per_page: u32) -> CoevoResult<SearchResults>;

    /// Every path on the default branch of a repository
    async fn list_tree(&self, owner: &str, repo: &str) -> CoevoResult<Vec<String>>;
}

/// Helper to create an HTTP client with common configuration
pub(crate) fn create_http_client(config: &ApiClientConfig) -> CoevoResult<reqwest::Client> {
    let mut headers = reqwest::header::HeaderMap::new();

    let user_agent =
        reqwest::header::HeaderValue::from_str(&config.user_agent).map_err(|e| {
            CoevoError::Network {
                message: format!("Invalid user agent: {}", e),
                status: None,
                source: Some(Box::new(e)),
                context: ErrorContext::new("http_client").with_operation("create_client"),
            }
        })?;
    headers.insert(reqwest::header::USER_AGENT, user_agent);

    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.timeout_seconds))
        .default_headers(headers)
        .build()
        .map_err(|e| CoevoError::Network {
            message: format!("Failed to create HTTP client: {}", e),
            status: None,
            source: Some(Box::new(e)),
            context: ErrorContext::new("http_client").with_operation("create_client"),
        })
}
