//! GitHub search API client implementation

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use coevo_core::{CoevoError, CoevoResult, ErrorContext};

use super::{
    create_http_client, ApiClientConfig, RepoDescriptor, SearchApiClient, SearchResults,
};

/// GitHub search API client
pub struct GitHubSearchClient {
    client: reqwest::Client,
    config: ApiClientConfig,
}

/// GitHub search response
#[derive(Debug, Deserialize)]
struct GitHubSearchResponse {
    total_count: u64,
    items: Vec<GitHubRepoItem>,
}

/// GitHub repository item
#[derive(Debug, Deserialize)]
struct GitHubRepoItem {
    name: String,
    owner: GitHubOwner,
    description: Option<String>,
}

/// GitHub owner identity
#[derive(Debug, Deserialize)]
struct GitHubOwner {
    login: String,
}

/// GitHub tree response
#[derive(Debug, Deserialize)]
struct GitHubTreeResponse {
    tree: Vec<GitHubTreeItem>,
}

/// GitHub tree item
#[derive(Debug, Deserialize)]
struct GitHubTreeItem {
    path: String,
}

impl GitHubSearchClient {
    /// Create a new GitHub search client
    pub fn new(config: ApiClientConfig) -> CoevoResult<Self> {
        let client = create_http_client(&config)?;

        info!(base_url = %config.base_url, "created GitHub search client");

        Ok(Self { client, config })
    }

    /// Make a GET request against the configured API
    async fn get(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> CoevoResult<reqwest::Response> {
        let url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );

        debug!(%url, "GitHub API request");

        let mut request = self
            .client
            .get(&url)
            .query(query)
            .header(reqwest::header::ACCEPT, "application/vnd.github.v3+json");

        if let Some(token) = &self.config.access_token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("token {token}"));
        }

        let response = request.send().await.map_err(|e| CoevoError::Network {
            message: format!("Request to {} failed: {}", url, e),
            status: None,
            source: Some(Box::new(e)),
            context: ErrorContext::new("github_search_client").with_operation("get"),
        })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(CoevoError::Network {
                message: format!("HTTP {} for {}", status.as_u16(), url),
                status: Some(status.as_u16()),
                source: None,
                context: ErrorContext::new("github_search_client")
                    .with_operation("get")
                    .with_suggestion(match status.as_u16() {
                        403 => "Check rate limits or provide an access token",
                        404 => "Repository not found or not accessible",
                        422 => "Check the search query syntax",
                        _ => "Check network connectivity and API status",
                    }),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl SearchApiClient for GitHubSearchClient {
    async fn search_repositories(&self, query: &str, per_page: u32) -> CoevoResult<SearchResults> {
        info!(%query, per_page, "searching repositories");

        let response = self
            .get(
                "search/repositories",
                &[
                    ("q", query.to_string()),
                    ("per_page", per_page.to_string()),
                ],
            )
            .await?;

        let payload: GitHubSearchResponse =
            response.json().await.map_err(|e| CoevoError::Network {
                message: format!("Failed to parse search response: {}", e),
                status: None,
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_search_client")
                    .with_operation("search_repositories"),
            })?;

        Ok(SearchResults {
            total_count: payload.total_count,
            items: payload
                .items
                .into_iter()
                .map(|item| RepoDescriptor {
                    name: item.name,
                    owner: item.owner.login,
                    description: item.description,
                })
                .collect(),
        })
    }

    async fn list_tree(&self, owner: &str, repo: &str) -> CoevoResult<Vec<String>> {
        debug!(%owner, %repo, "fetching repository tree");

        let endpoint = format!("repos/{}/{}/git/trees/HEAD", owner, repo);
        let response = self
            .get(&endpoint, &[("recursive", "1".to_string())])
            .await?;

        let payload: GitHubTreeResponse =
            response.json().await.map_err(|e| CoevoError::Network {
                message: format!("Failed to parse tree response: {}", e),
                status: None,
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_search_client").with_operation("list_tree"),
            })?;

        Ok(payload.tree.into_iter().map(|item| item.path).collect())
    }
}
