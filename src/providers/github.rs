//! GitHub repository search provider.
//!
//! Queries the public search API at `/search/repositories`, filtered by a
//! minimum star count and sorted by stars descending. No authentication —
//! the unauthenticated rate limit is enough for keyword-paced collection.

use crate::config::SearchSettings;
use crate::error::ScoutError;
use crate::http;
use crate::provider::{ProviderKind, SearchProvider};
use crate::types::RawRecord;
use serde::Deserialize;

const DEFAULT_API_BASE: &str = "https://api.github.com";
const PER_PAGE: u32 = 30;

/// GitHub repository search client.
///
/// `api_base` is overridable for tests against a mock server.
pub struct GitHubProvider {
    /// Base URL of the GitHub API.
    pub api_base: String,
}

impl Default for GitHubProvider {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

/// Response shape of `/search/repositories` (the fields we use).
#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<RepoItem>,
}

#[derive(Debug, Deserialize)]
struct RepoItem {
    full_name: String,
    html_url: String,
    description: Option<String>,
    stargazers_count: u64,
    language: Option<String>,
    updated_at: Option<String>,
}

impl SearchProvider for GitHubProvider {
    async fn search(
        &self,
        keyword: &str,
        settings: &SearchSettings,
    ) -> Result<Vec<RawRecord>, ScoutError> {
        tracing::trace!(keyword, "GitHub repository search");

        let client = http::build_client(settings)?;
        let query = format!("{keyword} stars:>={}", settings.min_stars);

        let response = client
            .get(format!("{}/search/repositories", self.api_base))
            .query(&[
                ("q", query.as_str()),
                ("sort", "stars"),
                ("order", "desc"),
                ("per_page", &PER_PAGE.to_string()),
            ])
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await
            .map_err(|e| ScoutError::Http(format!("GitHub request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ScoutError::Http(format!("GitHub HTTP error: {e}")))?;

        let payload: SearchResponse = response
            .json()
            .await
            .map_err(|e| ScoutError::Parse(format!("GitHub response decode failed: {e}")))?;

        let records = records_from_items(payload.items, keyword);
        tracing::debug!(keyword, count = records.len(), "GitHub results parsed");
        Ok(records)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::GitHub
    }
}

/// Convert API items into raw records, tagging source and keyword.
fn records_from_items(items: Vec<RepoItem>, keyword: &str) -> Vec<RawRecord> {
    items
        .into_iter()
        .map(|repo| RawRecord {
            title: repo.full_name,
            url: repo.html_url,
            description: repo.description.unwrap_or_default(),
            source: ProviderKind::GitHub.name().to_string(),
            keyword: keyword.to_string(),
            stars: Some(repo.stargazers_count),
            language: repo.language,
            updated_at: repo.updated_at,
        })
        .collect()
}
