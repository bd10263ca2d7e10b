//! Discovery pipeline driver
//!
//! Runs the configured query set against the search API and filters every
//! match by inspecting its file tree. A failed query or tree listing is
//! reported and skipped; the loop always continues to the next item.

use tracing::{info, warn};

use crate::api::{RepoDescriptor, SearchApiClient};
use crate::filter::is_candidate_model_tree;
use coevo_core::DiscoveryConfig;

/// Outcome of a single search query
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub query: String,
    pub total_count: u64,
    /// Every repository returned for the query
    pub matches: Vec<RepoDescriptor>,
    /// The subset whose trees contain candidate model files
    pub candidates: Vec<RepoDescriptor>,
}

/// Run the full query set; no failure is fatal to the batch
pub async fn run_discovery(
    client: &dyn SearchApiClient,
    config: &DiscoveryConfig,
) -> Vec<QueryOutcome> {
    let mut outcomes = Vec::new();

    for query in &config.queries {
        info!(%query, "running search query");

        let results = match client.search_repositories(query, config.per_page).await {
            Ok(results) => results,
            Err(e) => {
                warn!(%query, error = %e, "search query failed, skipping");
                continue;
            }
        };

        let mut candidates = Vec::new();
        for repo in &results.items {
            match client.list_tree(&repo.owner, &repo.name).await {
                Ok(paths) if is_candidate_model_tree(&paths) => candidates.push(repo.clone()),
                Ok(_) => {}
                Err(e) => {
                    warn!(
                        owner = %repo.owner,
                        repo = %repo.name,
                        error = %e,
                        "tree listing failed, skipping repository"
                    );
                }
            }
        }

        outcomes.push(QueryOutcome {
            query: query.clone(),
            total_count: results.total_count,
            matches: results.items,
            candidates,
        });
    }

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SearchResults;
    use async_trait::async_trait;
    use coevo_core::{CoevoError, CoevoResult, ErrorContext};
    use std::collections::HashMap;

    struct FakeSearchApi {
        results: HashMap<String, SearchResults>,
        trees: HashMap<String, Vec<String>>,
    }

    impl FakeSearchApi {
        fn repo(owner: &str, name: &str) -> RepoDescriptor {
            RepoDescriptor {
                name: name.to_string(),
                owner: owner.to_string(),
                description: None,
            }
        }
    }

    #[async_trait]
    impl SearchApiClient for FakeSearchApi {
        async fn search_repositories(
            &self,
            query: &str,
            _per_page: u32,
        ) -> CoevoResult<SearchResults> {
            self.results
                .get(query)
                .cloned()
                .ok_or_else(|| CoevoError::Network {
                    message: format!("HTTP 403 for query {}", query),
                    status: Some(403),
                    source: None,
                    context: ErrorContext::new("fake_api"),
                })
        }

        async fn list_tree(&self, owner: &str, repo: &str) -> CoevoResult<Vec<String>> {
            self.trees
                .get(&format!("{owner}/{repo}"))
                .cloned()
                .ok_or_else(|| CoevoError::Network {
                    message: "HTTP 404".to_string(),
                    status: Some(404),
                    source: None,
                    context: ErrorContext::new("fake_api"),
                })
        }
    }

    fn config(queries: &[&str]) -> DiscoveryConfig {
        DiscoveryConfig {
            queries: queries.iter().map(|q| q.to_string()).collect(),
            per_page: 10,
        }
    }

    #[tokio::test]
    async fn test_candidates_filtered_by_tree_content() {
        let mut results = HashMap::new();
        results.insert(
            "mbeddr".to_string(),
            SearchResults {
                total_count: 2,
                items: vec![
                    FakeSearchApi::repo("mbeddr", "mbeddr.core"),
                    FakeSearchApi::repo("other", "plain-java"),
                ],
            },
        );

        let mut trees = HashMap::new();
        trees.insert(
            "mbeddr/mbeddr.core".to_string(),
            vec!["code/solutions/demo/demo.mps".to_string()],
        );
        trees.insert(
            "other/plain-java".to_string(),
            vec!["src/Main.java".to_string()],
        );

        let api = FakeSearchApi { results, trees };
        let outcomes = run_discovery(&api, &config(&["mbeddr"])).await;

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].total_count, 2);
        assert_eq!(outcomes[0].matches.len(), 2);
        assert_eq!(outcomes[0].candidates.len(), 1);
        assert_eq!(outcomes[0].candidates[0].name, "mbeddr.core");
    }

    #[tokio::test]
    async fn test_failed_query_is_skipped() {
        let mut results = HashMap::new();
        results.insert(
            "good".to_string(),
            SearchResults {
                total_count: 0,
                items: vec![],
            },
        );

        let api = FakeSearchApi {
            results,
            trees: HashMap::new(),
        };
        let outcomes = run_discovery(&api, &config(&["failing", "good"])).await;

        // The failing query is reported and skipped, the good one survives.
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].query, "good");
    }

    #[tokio::test]
    async fn test_failed_tree_listing_skips_repository() {
        let mut results = HashMap::new();
        results.insert(
            "mbeddr".to_string(),
            SearchResults {
                total_count: 1,
                items: vec![FakeSearchApi::repo("gone", "deleted-repo")],
            },
        );

        let api = FakeSearchApi {
            results,
            trees: HashMap::new(),
        };
        let outcomes = run_discovery(&api, &config(&["mbeddr"])).await;

        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].candidates.is_empty());
        assert_eq!(outcomes[0].matches.len(), 1);
    }
}
