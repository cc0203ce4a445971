//! # resource-scout
//!
//! Keyword-driven learning-resource collector. Queries web and code-hosting
//! search providers for a set of topic keywords, deduplicates the results by
//! normalised URL, classifies each record (category + language), scores it
//! with a bounded rule-based quality heuristic, and exports the ranked set
//! as CSV.
//!
//! ## Design
//!
//! - Providers are queried sequentially, keyword by keyword, with a fixed
//!   pause between requests; a failed query is logged and contributes
//!   nothing, never aborting a run
//! - The pipeline stages (dedup → classify/score → filter → rank) are pure
//!   functions over owned collections and run strictly in sequence
//! - Classification and scoring are deterministic keyword heuristics, not
//!   learned models
//! - Exports are CSV: one flat file plus a workbook directory with per-sheet
//!   files, re-loadable for incremental merges (existing entries win)

pub mod config;
pub mod error;
pub mod export;
pub mod http;
pub mod pipeline;
pub mod provider;
pub mod providers;
pub mod types;

pub use config::ScoutConfig;
pub use error::{Result, ScoutError};
pub use pipeline::rank::SummaryStats;
pub use pipeline::run::PipelineOutcome;
pub use provider::{ProviderKind, SearchProvider};
pub use types::{Category, ClassifiedRecord, Language, RawRecord};

/// Run the full collection pipeline with the given configuration.
///
/// Collects from every configured provider, then dedupes, classifies,
/// scores, filters, and ranks. `extra_keywords` are searched in addition to
/// the configured keyword lists.
///
/// # Errors
///
/// Returns [`ScoutError::Config`] for an invalid configuration. Provider
/// failures are logged and treated as empty contributions.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> resource_scout::Result<()> {
/// let config = resource_scout::ScoutConfig::default();
/// let outcome = resource_scout::run(&config, &[]).await?;
/// for record in outcome.records.iter().take(5) {
///     println!("{:.1} {}", record.quality_score, record.raw.title);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn run(config: &ScoutConfig, extra_keywords: &[String]) -> Result<PipelineOutcome> {
    pipeline::run::run(config, extra_keywords).await
}
