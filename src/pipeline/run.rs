//! Pipeline orchestration: collect → dedup → classify/score → filter → rank.
//!
//! Stages run strictly in sequence; each consumes the whole output of the
//! previous one. A provider failure never aborts a run — it contributes
//! zero records and is logged with keyword context.

use std::time::Duration;

use crate::config::ScoutConfig;
use crate::error::Result;
use crate::provider::{query_provider, ProviderKind};
use crate::types::{Category, ClassifiedRecord, RawRecord};

use super::classify::classify_all;
use super::dedup::dedupe;
use super::rank::{categorize, sort_by_score_desc, summarize, SummaryStats};

/// The stages of one pipeline run, in order. Logged at each transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Querying providers keyword by keyword.
    Collecting,
    /// Collapsing duplicates by identity key.
    Deduplicating,
    /// Deriving category, language, score, recommendation.
    Classifying,
    /// Dropping records below the quality threshold.
    Filtering,
    /// Sorting, bucketing, summarising.
    Ranking,
    /// Run complete.
    Done,
}

/// Everything a run produces for the sink.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// All surviving records, sorted descending by quality score.
    pub records: Vec<ClassifiedRecord>,
    /// The same records partitioned into category buckets.
    pub categorized: Vec<(Category, Vec<ClassifiedRecord>)>,
    /// Aggregate statistics over the surviving records.
    pub summary: SummaryStats,
}

/// Query every configured provider for every applicable keyword.
///
/// Providers are queried sequentially with a fixed pause after each request.
/// Chinese keywords only go to the web provider; repository search works
/// poorly with them, so GitHub gets the English list.
pub async fn collect(config: &ScoutConfig, extra_keywords: &[String]) -> Vec<RawRecord> {
    log_stage(Stage::Collecting);
    let settings = &config.search;
    let mut collected = Vec::new();

    for kind in &settings.providers {
        let keywords = keywords_for(*kind, config, extra_keywords);
        for keyword in keywords {
            match query_provider(*kind, &keyword, settings).await {
                Ok(records) => {
                    tracing::debug!(provider = %kind, keyword = %keyword, count = records.len(), "provider returned records");
                    collected.extend(records);
                }
                Err(err) => {
                    tracing::warn!(provider = %kind, keyword = %keyword, error = %err, "provider query failed");
                }
            }
            tokio::time::sleep(Duration::from_millis(settings.request_delay_ms)).await;
        }
    }

    tracing::info!(count = collected.len(), "collection finished");
    collected
}

/// Which keywords a provider is queried with.
fn keywords_for(kind: ProviderKind, config: &ScoutConfig, extra: &[String]) -> Vec<String> {
    let settings = &config.search;
    let mut keywords = match kind {
        ProviderKind::DuckDuckGo => {
            let mut all = settings.keywords_zh.clone();
            all.extend(settings.keywords_en.iter().cloned());
            all
        }
        ProviderKind::GitHub => settings.keywords_en.clone(),
    };
    keywords.extend(extra.iter().cloned());
    keywords
}

/// Run the synchronous stages over an already-collected record set.
///
/// This is the whole core pipeline minus network I/O, so tests can drive it
/// with synthetic records.
pub fn process(raw: Vec<RawRecord>, min_quality_score: f64) -> PipelineOutcome {
    log_stage(Stage::Deduplicating);
    let unique = dedupe(raw);

    log_stage(Stage::Classifying);
    let classified = classify_all(unique);

    log_stage(Stage::Filtering);
    let before = classified.len();
    let mut kept: Vec<ClassifiedRecord> = classified
        .into_iter()
        .filter(|record| record.quality_score >= min_quality_score)
        .collect();
    tracing::info!(
        kept = kept.len(),
        dropped = before - kept.len(),
        threshold = min_quality_score,
        "quality filter applied"
    );

    log_stage(Stage::Ranking);
    sort_by_score_desc(&mut kept);
    let categorized = categorize(&kept);
    let summary = summarize(&kept);

    log_stage(Stage::Done);
    PipelineOutcome {
        records: kept,
        categorized,
        summary,
    }
}

/// Run the full pipeline: validate, collect, then process.
///
/// # Errors
///
/// Returns [`crate::ScoutError::Config`] for an invalid configuration.
/// Provider failures do not surface here.
pub async fn run(config: &ScoutConfig, extra_keywords: &[String]) -> Result<PipelineOutcome> {
    config.validate()?;
    let raw = collect(config, extra_keywords).await;
    Ok(process(raw, config.filters.min_quality_score))
}

fn log_stage(stage: Stage) {
    tracing::debug!(stage = ?stage, "pipeline stage");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: &str, url: &str, description: &str) -> RawRecord {
        RawRecord {
            title: title.into(),
            url: url.into(),
            description: description.into(),
            source: "DuckDuckGo".into(),
            keyword: "cuda".into(),
            ..Default::default()
        }
    }

    #[test]
    fn process_dedupes_before_classifying() {
        let records = vec![
            raw("first", "https://example.com/page", "a tutorial course"),
            raw("second", "https://example.com/page", "a tutorial course"),
        ];
        let outcome = process(records, 1.0);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].raw.title, "first");
    }

    #[test]
    fn process_drops_records_without_url() {
        let records = vec![raw("no url", "", "desc"), raw("ok", "https://a.com", "")];
        let outcome = process(records, 1.0);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].raw.title, "ok");
        // Absent from every downstream view too.
        let bucket_total: usize = outcome.categorized.iter().map(|(_, v)| v.len()).sum();
        assert_eq!(bucket_total, 1);
        assert_eq!(outcome.summary.total, 1);
    }

    #[test]
    fn filter_drops_below_threshold() {
        // Plain record scores 3.0; official-domain record scores 4.0.
        let records = vec![
            raw("plain", "https://example.com/x", ""),
            raw("official", "https://docs.nvidia.com/cuda/", ""),
        ];
        let outcome = process(records, 3.5);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].raw.title, "official");
    }

    #[test]
    fn outcome_records_sorted_descending() {
        let records = vec![
            raw("plain", "https://example.com/x", ""),
            raw("official", "https://docs.nvidia.com/cuda/", ""),
        ];
        let outcome = process(records, 1.0);
        assert!(outcome.records[0].quality_score >= outcome.records[1].quality_score);
    }

    #[test]
    fn outcome_views_are_consistent() {
        let records = vec![
            raw("a", "https://a.com", "tutorial course lessons"),
            raw("b", "https://github.com/x/y", ""),
            raw("c", "https://c.com/post.pdf", ""),
        ];
        let outcome = process(records, 1.0);
        let bucket_total: usize = outcome.categorized.iter().map(|(_, v)| v.len()).sum();
        assert_eq!(bucket_total, outcome.records.len());
        assert_eq!(outcome.summary.total, outcome.records.len());
    }

    #[test]
    fn empty_collection_produces_empty_outcome() {
        let outcome = process(vec![], 3.0);
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.summary.total, 0);
        assert_eq!(outcome.categorized.len(), 6);
    }

    #[test]
    fn github_provider_skips_chinese_keywords() {
        let config = ScoutConfig::default();
        let github_keywords = keywords_for(ProviderKind::GitHub, &config, &[]);
        assert_eq!(github_keywords, config.search.keywords_en);

        let web_keywords = keywords_for(ProviderKind::DuckDuckGo, &config, &[]);
        assert_eq!(
            web_keywords.len(),
            config.search.keywords_zh.len() + config.search.keywords_en.len()
        );
    }

    #[test]
    fn extra_keywords_reach_every_provider() {
        let config = ScoutConfig::default();
        let extra = vec!["tensor cores".to_string()];
        for kind in ProviderKind::all() {
            let keywords = keywords_for(*kind, &config, &extra);
            assert!(keywords.contains(&"tensor cores".to_string()));
        }
    }

    #[tokio::test]
    async fn run_rejects_invalid_config() {
        let mut config = ScoutConfig::default();
        config.search.providers.clear();
        let result = run(&config, &[]).await;
        assert!(result.is_err());
    }
}
