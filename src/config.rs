//! Collector configuration with sensible defaults and TOML loading.
//!
//! [`ScoutConfig`] controls which providers are queried, the keyword lists,
//! the quality filter, and where exports land. Every section and field has a
//! default, so a partial TOML file (or none at all) is always valid.

use crate::error::ScoutError;
use crate::provider::ProviderKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for a collection run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    /// Provider and keyword settings.
    pub search: SearchSettings,
    /// Post-classification filtering.
    pub filters: FilterSettings,
    /// Export destinations.
    pub output: OutputSettings,
}

/// Which providers to query and how.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Providers queried in order. Each provider is queried sequentially,
    /// keyword by keyword, with a fixed delay between requests.
    pub providers: Vec<ProviderKind>,
    /// Chinese search keywords (web search only).
    pub keywords_zh: Vec<String>,
    /// English search keywords (all providers).
    pub keywords_en: Vec<String>,
    /// Maximum results requested per keyword from each provider.
    pub max_results_per_keyword: usize,
    /// Minimum star count when searching code repositories.
    pub min_stars: u64,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Fixed pause after each provider request, in milliseconds.
    pub request_delay_ms: u64,
    /// Custom User-Agent. If `None`, rotates through a built-in list.
    pub user_agent: Option<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            providers: vec![ProviderKind::DuckDuckGo, ProviderKind::GitHub],
            keywords_zh: vec![
                "CUDA编程教程".into(),
                "GPU并行计算".into(),
                "高性能计算HPC".into(),
                "CUDA优化技巧".into(),
                "NVIDIA GPU编程".into(),
            ],
            keywords_en: vec![
                "CUDA programming tutorial".into(),
                "GPU parallel computing".into(),
                "HPC high performance computing".into(),
                "CUDA optimization guide".into(),
                "NVIDIA GPU development".into(),
            ],
            max_results_per_keyword: 30,
            min_stars: 10,
            timeout_seconds: 8,
            request_delay_ms: 1000,
            user_agent: None,
        }
    }
}

/// Post-classification filtering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Records scoring below this are dropped after classification.
    pub min_quality_score: f64,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            min_quality_score: 3.0,
        }
    }
}

/// Export destination settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory the workbook and flat CSV are written to.
    pub dir: PathBuf,
    /// Base name for the flat CSV file (`<basename>.csv`).
    pub basename: String,
    /// Whether to write the flat CSV alongside the workbook directory.
    pub flat_csv: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("resources"),
            basename: "resources".into(),
            flat_csv: true,
        }
    }
}

impl ScoutConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ScoutError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ScoutError::Config(format!("cannot read {}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| ScoutError::Config(format!("cannot parse {}: {e}", path.display())))
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - at least one provider is enabled
    /// - at least one keyword is configured
    /// - `max_results_per_keyword` and `timeout_seconds` are greater than 0
    /// - `min_quality_score` lies within the score bounds `[1.0, 5.0]`
    pub fn validate(&self) -> Result<(), ScoutError> {
        if self.search.providers.is_empty() {
            return Err(ScoutError::Config(
                "at least one provider must be enabled".into(),
            ));
        }
        if self.search.keywords_zh.is_empty() && self.search.keywords_en.is_empty() {
            return Err(ScoutError::Config(
                "at least one keyword must be configured".into(),
            ));
        }
        if self.search.max_results_per_keyword == 0 {
            return Err(ScoutError::Config(
                "max_results_per_keyword must be greater than 0".into(),
            ));
        }
        if self.search.timeout_seconds == 0 {
            return Err(ScoutError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if !(1.0..=5.0).contains(&self.filters.min_quality_score) {
            return Err(ScoutError::Config(
                "min_quality_score must lie within [1.0, 5.0]".into(),
            ));
        }
        Ok(())
    }
}
