//! Trait definition and dispatch for pluggable search providers.
//!
//! Each provider (DuckDuckGo web search, GitHub repository search)
//! implements [`SearchProvider`] to return [`RawRecord`]s for one keyword.
//! Concrete dispatch goes through [`ProviderKind`] so configs can name
//! providers by tag.

use crate::config::SearchSettings;
use crate::error::ScoutError;
use crate::providers::{DuckDuckGoProvider, GitHubProvider};
use crate::types::RawRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The providers resource-scout can query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// DuckDuckGo HTML search — general web results, scraper-friendly.
    DuckDuckGo,
    /// GitHub repository search API — code results with star counts.
    GitHub,
}

impl ProviderKind {
    /// Returns the human-readable provider name, also used as the
    /// `source` field on collected records.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => "DuckDuckGo",
            Self::GitHub => "GitHub",
        }
    }

    /// All provider variants.
    pub fn all() -> &'static [ProviderKind] {
        &[Self::DuckDuckGo, Self::GitHub]
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pluggable search provider backend.
///
/// Implementors fetch and parse one keyword's worth of results. Failures are
/// per-keyword: the collector logs them and continues, so implementations
/// should return errors rather than panic.
///
/// All implementations must be `Send + Sync`.
pub trait SearchProvider: Send + Sync {
    /// Search for a single keyword and return parsed records.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError`] if the HTTP request fails or the response
    /// cannot be parsed.
    fn search(
        &self,
        keyword: &str,
        settings: &SearchSettings,
    ) -> impl std::future::Future<Output = Result<Vec<RawRecord>, ScoutError>> + Send;

    /// Returns which [`ProviderKind`] this implementation represents.
    fn kind(&self) -> ProviderKind;
}

/// Query a provider by kind, dispatching to the concrete implementation.
pub async fn query_provider(
    kind: ProviderKind,
    keyword: &str,
    settings: &SearchSettings,
) -> Result<Vec<RawRecord>, ScoutError> {
    match kind {
        ProviderKind::DuckDuckGo => DuckDuckGoProvider.search(keyword, settings).await,
        ProviderKind::GitHub => GitHubProvider::default().search(keyword, settings).await,
    }
}
