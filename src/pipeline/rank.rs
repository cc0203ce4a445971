//! Ranking, categorisation, and summary statistics.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{Category, ClassifiedRecord};

/// Aggregate statistics over a classified record set.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryStats {
    /// Total number of records.
    pub total: usize,
    /// Record count per category, in declaration order.
    pub per_category: Vec<(Category, usize)>,
    /// Records detected as Chinese.
    pub zh_count: usize,
    /// Records detected as English.
    pub en_count: usize,
    /// Records detected as bilingual.
    pub mixed_count: usize,
    /// Record count per source provider.
    pub per_source: BTreeMap<String, usize>,
    /// Mean quality score (0.0 for an empty set).
    pub mean_score: f64,
    /// Highest quality score (0.0 for an empty set).
    pub max_score: f64,
    /// Lowest quality score (0.0 for an empty set).
    pub min_score: f64,
    /// Records scoring 4.0 or higher.
    pub above_four: usize,
    /// When these statistics were computed.
    pub generated_at: DateTime<Utc>,
}

/// Return the `n` highest-scoring records, stably sorted descending.
///
/// Equal scores keep their original relative order, so repeated runs over
/// the same input produce the same ranking.
pub fn top_n(records: &[ClassifiedRecord], n: usize) -> Vec<ClassifiedRecord> {
    let mut sorted = records.to_vec();
    sort_by_score_desc(&mut sorted);
    sorted.truncate(n);
    sorted
}

/// Stable descending sort by quality score, in place.
pub fn sort_by_score_desc(records: &mut [ClassifiedRecord]) {
    records.sort_by(|a, b| {
        b.quality_score
            .partial_cmp(&a.quality_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Partition records into the fixed category buckets.
///
/// Every record lands in exactly one bucket; buckets appear in declaration
/// order and may be empty.
pub fn categorize(records: &[ClassifiedRecord]) -> Vec<(Category, Vec<ClassifiedRecord>)> {
    let mut buckets: Vec<(Category, Vec<ClassifiedRecord>)> = Category::all()
        .iter()
        .map(|category| (*category, Vec::new()))
        .collect();

    for record in records {
        match buckets
            .iter_mut()
            .find(|(category, _)| *category == record.category)
        {
            Some((_, items)) => items.push(record.clone()),
            // Unreachable with the closed Category enum, but anything
            // unrecognised belongs in the last bucket (Other).
            None => {
                if let Some((_, items)) = buckets.last_mut() {
                    items.push(record.clone());
                }
            }
        }
    }

    buckets
}

/// Compute summary statistics over a record set.
pub fn summarize(records: &[ClassifiedRecord]) -> SummaryStats {
    let per_category = Category::all()
        .iter()
        .map(|category| {
            let count = records.iter().filter(|r| r.category == *category).count();
            (*category, count)
        })
        .collect();

    let mut per_source: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        *per_source.entry(record.raw.source.clone()).or_default() += 1;
    }

    let scores: Vec<f64> = records.iter().map(|r| r.quality_score).collect();
    let (mean_score, max_score, min_score) = if scores.is_empty() {
        (0.0, 0.0, 0.0)
    } else {
        let sum: f64 = scores.iter().sum();
        let max = scores.iter().cloned().fold(f64::MIN, f64::max);
        let min = scores.iter().cloned().fold(f64::MAX, f64::min);
        (sum / scores.len() as f64, max, min)
    };

    SummaryStats {
        total: records.len(),
        per_category,
        zh_count: count_language(records, crate::types::Language::Zh),
        en_count: count_language(records, crate::types::Language::En),
        mixed_count: count_language(records, crate::types::Language::Mixed),
        per_source,
        mean_score,
        max_score,
        min_score,
        above_four: scores.iter().filter(|s| **s >= 4.0).count(),
        generated_at: Utc::now(),
    }
}

fn count_language(records: &[ClassifiedRecord], language: crate::types::Language) -> usize {
    records
        .iter()
        .filter(|r| r.language_detected == language)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Language, RawRecord};

    fn record(title: &str, category: Category, score: f64) -> ClassifiedRecord {
        ClassifiedRecord {
            raw: RawRecord {
                title: title.into(),
                url: format!("https://example.com/{title}"),
                source: "DuckDuckGo".into(),
                ..Default::default()
            },
            category,
            language_detected: Language::En,
            quality_score: score,
            updated_recently: false,
            recommendation: "worth a look".into(),
            collected_at: Utc::now(),
        }
    }

    #[test]
    fn top_n_sorts_descending() {
        let records = vec![
            record("low", Category::Blog, 3.0),
            record("high", Category::Code, 5.0),
            record("mid", Category::Book, 4.0),
        ];
        let top = top_n(&records, 3);
        assert_eq!(top[0].raw.title, "high");
        assert_eq!(top[1].raw.title, "mid");
        assert_eq!(top[2].raw.title, "low");
    }

    #[test]
    fn top_n_truncates_to_n() {
        let records: Vec<_> = (0..10)
            .map(|i| record(&format!("r{i}"), Category::Other, 3.0))
            .collect();
        assert_eq!(top_n(&records, 4).len(), 4);
    }

    #[test]
    fn top_n_with_n_larger_than_input() {
        let records = vec![record("only", Category::Other, 3.0)];
        assert_eq!(top_n(&records, 20).len(), 1);
    }

    #[test]
    fn equal_scores_keep_input_order() {
        let records = vec![
            record("first", Category::Other, 4.0),
            record("second", Category::Other, 4.0),
            record("third", Category::Other, 4.0),
        ];
        let top = top_n(&records, 3);
        assert_eq!(top[0].raw.title, "first");
        assert_eq!(top[1].raw.title, "second");
        assert_eq!(top[2].raw.title, "third");
    }

    #[test]
    fn top_n_is_a_subsequence_among_equals() {
        let records = vec![
            record("a", Category::Other, 4.0),
            record("b", Category::Other, 5.0),
            record("c", Category::Other, 4.0),
        ];
        let top = top_n(&records, 3);
        assert_eq!(top[0].raw.title, "b");
        assert_eq!(top[1].raw.title, "a");
        assert_eq!(top[2].raw.title, "c");
    }

    #[test]
    fn categorize_partitions_exactly() {
        let records = vec![
            record("a", Category::Book, 3.0),
            record("b", Category::Code, 3.0),
            record("c", Category::Code, 3.0),
            record("d", Category::Other, 3.0),
        ];
        let buckets = categorize(&records);

        assert_eq!(buckets.len(), 6);
        let total: usize = buckets.iter().map(|(_, items)| items.len()).sum();
        assert_eq!(total, records.len());

        for (category, items) in &buckets {
            for item in items {
                assert_eq!(item.category, *category);
            }
        }
    }

    #[test]
    fn categorize_buckets_follow_declaration_order() {
        let buckets = categorize(&[]);
        let order: Vec<Category> = buckets.iter().map(|(c, _)| *c).collect();
        assert_eq!(order, Category::all());
    }

    #[test]
    fn summarize_counts_everything() {
        let mut zh = record("zh", Category::Course, 4.5);
        zh.language_detected = Language::Zh;
        let mut github = record("gh", Category::Code, 5.0);
        github.raw.source = "GitHub".into();

        let records = vec![record("en", Category::Blog, 3.0), zh, github];
        let stats = summarize(&records);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.zh_count, 1);
        assert_eq!(stats.en_count, 2);
        assert_eq!(stats.mixed_count, 0);
        assert_eq!(stats.per_source.get("GitHub"), Some(&1));
        assert_eq!(stats.per_source.get("DuckDuckGo"), Some(&2));
        assert_eq!(stats.above_four, 2);
        assert!((stats.max_score - 5.0).abs() < f64::EPSILON);
        assert!((stats.min_score - 3.0).abs() < f64::EPSILON);
        assert!((stats.mean_score - (3.0 + 4.5 + 5.0) / 3.0).abs() < 1e-9);

        let code_count = stats
            .per_category
            .iter()
            .find(|(c, _)| *c == Category::Code)
            .map(|(_, n)| *n);
        assert_eq!(code_count, Some(1));
    }

    #[test]
    fn summarize_empty_set() {
        let stats = summarize(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.above_four, 0);
        assert!(stats.mean_score.abs() < f64::EPSILON);
        assert!(stats.per_source.is_empty());
    }
}
