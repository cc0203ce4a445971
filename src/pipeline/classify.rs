//! Category and language detection from keyword heuristics.
//!
//! Classification is a tagged decision table, not anything learned: each
//! category has a fixed keyword list, scored by substring presence over the
//! lowercased title + URL + description. The table keeps its original
//! literal entries, including the Chinese terms, even though some of them
//! rarely appear verbatim in scraped English titles.

use chrono::{DateTime, Utc};

use crate::types::{Category, ClassifiedRecord, Language, RawRecord};

use super::score::{days_since, quality_score, recommendation};

/// An update within this many days counts as "updated recently".
const RECENT_DAYS: i64 = 90;

/// Keyword table per category, in tie-break (declaration) order.
///
/// Scoring counts one point per keyword present as a substring. Ties between
/// equal nonzero scores resolve to the earliest category in this table.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Book,
        &["book", "pdf", "书", "教材", "guide", "handbook", "manual"],
    ),
    (
        Category::Course,
        &["course", "tutorial", "lesson", "课程", "教程", "class", "lecture"],
    ),
    (
        Category::Blog,
        &["blog", "article", "post", "博客", "文章", "medium.com"],
    ),
    (
        Category::Code,
        &["github", "gitlab", "code", "repository", "repo", "代码", "example", "demo"],
    ),
    (
        Category::Documentation,
        &["docs", "documentation", "api", "reference", "文档", "nvidia.com/docs"],
    ),
];

/// Detect a record's category from keyword heuristics.
///
/// Bonus rules on top of the keyword table:
/// - URL containing `github.com` or `gitlab.com`: +3 to [`Category::Code`]
/// - URL containing `.pdf`: +2 to [`Category::Book`]
///
/// Returns [`Category::Other`] when every category scores zero.
pub fn detect_category(record: &RawRecord) -> Category {
    let url = record.url.to_lowercase();
    let combined = format!(
        "{} {} {}",
        record.title.to_lowercase(),
        url,
        record.description.to_lowercase()
    );

    let mut best = Category::Other;
    let mut best_score = 0usize;

    for (category, keywords) in CATEGORY_KEYWORDS {
        let mut score = keywords
            .iter()
            .filter(|keyword| combined.contains(**keyword))
            .count();

        if *category == Category::Code && (url.contains("github.com") || url.contains("gitlab.com"))
        {
            score += 3;
        }
        if *category == Category::Book && url.contains(".pdf") {
            score += 2;
        }

        // Strictly greater: first category reaching the maximum wins.
        if score > best_score {
            best = *category;
            best_score = score;
        }
    }

    best
}

/// Detect the natural language of a record's title + description.
///
/// Chinese means at least one CJK-range character; English means more than
/// three contiguous runs of Latin letters.
pub fn detect_language(record: &RawRecord) -> Language {
    let combined = format!("{} {}", record.title, record.description);

    let has_chinese = combined.chars().any(is_cjk);
    let has_english = latin_token_count(&combined) > 3;

    match (has_chinese, has_english) {
        (true, true) => Language::Mixed,
        (true, false) => Language::Zh,
        (false, true) => Language::En,
        (false, false) => Language::Unknown,
    }
}

/// Whether the update timestamp is parseable and less than [`RECENT_DAYS`] old.
pub fn updated_recently(record: &RawRecord) -> bool {
    record
        .updated_at
        .as_deref()
        .and_then(days_since)
        .is_some_and(|days| days < RECENT_DAYS)
}

/// Run the full classify/score stage for one record.
///
/// Every derived field is computed here, so the output always satisfies the
/// record invariants: a category, a language tag, a bounded score, and a
/// non-empty recommendation.
pub fn classify(raw: RawRecord, collected_at: DateTime<Utc>) -> ClassifiedRecord {
    let category = detect_category(&raw);
    let language_detected = detect_language(&raw);
    let score = quality_score(&raw);
    let recently = updated_recently(&raw);
    let recommendation = recommendation(&raw, category, language_detected, score, recently);

    ClassifiedRecord {
        raw,
        category,
        language_detected,
        quality_score: score,
        updated_recently: recently,
        recommendation,
        collected_at,
    }
}

/// Classify and score a whole batch, stamping one shared collection time.
pub fn classify_all(records: Vec<RawRecord>) -> Vec<ClassifiedRecord> {
    let collected_at = Utc::now();
    let classified: Vec<ClassifiedRecord> = records
        .into_iter()
        .map(|record| classify(record, collected_at))
        .collect();
    tracing::info!(count = classified.len(), "classified records");
    classified
}

fn is_cjk(c: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&c)
}

/// Count contiguous runs of ASCII-alphabetic characters.
fn latin_token_count(text: &str) -> usize {
    let mut count = 0;
    let mut in_token = false;
    for c in text.chars() {
        if c.is_ascii_alphabetic() {
            if !in_token {
                count += 1;
                in_token = true;
            }
        } else {
            in_token = false;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, url: &str, description: &str) -> RawRecord {
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
    fn github_url_bonus_forces_code() {
        let r = record(
            "cuda-samples",
            "https://github.com/nvidia/cuda-samples",
            "x",
        );
        assert_eq!(detect_category(&r), Category::Code);
    }

    #[test]
    fn gitlab_url_also_gets_code_bonus() {
        let r = record("kernels", "https://gitlab.com/someone/kernels", "");
        assert_eq!(detect_category(&r), Category::Code);
    }

    #[test]
    fn pdf_url_bonus_favours_book() {
        let r = record("CUDA notes", "https://example.com/cuda-notes.pdf", "");
        assert_eq!(detect_category(&r), Category::Book);
    }

    #[test]
    fn documentation_keywords_detected() {
        let r = record(
            "CUDA Toolkit Documentation",
            "https://docs.nvidia.com/cuda/",
            "API reference for the CUDA toolkit",
        );
        assert_eq!(detect_category(&r), Category::Documentation);
    }

    #[test]
    fn course_keywords_detected() {
        let r = record(
            "Introduction to parallel programming",
            "https://example.com/course",
            "A hands-on tutorial with lectures",
        );
        assert_eq!(detect_category(&r), Category::Course);
    }

    #[test]
    fn no_keywords_falls_to_other() {
        let r = record("ζ function tables", "https://example.org/zeta", "numbers");
        assert_eq!(detect_category(&r), Category::Other);
    }

    #[test]
    fn tie_breaks_by_declaration_order() {
        // "book" and "course" each score exactly one; Book is declared first.
        let r = record("book course", "https://example.com/x", "");
        assert_eq!(detect_category(&r), Category::Book);

        // Same two keywords reversed in the text — order of appearance in
        // the text must not matter, only table order.
        let r = record("course book", "https://example.com/x", "");
        assert_eq!(detect_category(&r), Category::Book);
    }

    #[test]
    fn chinese_literal_keyword_matches_verbatim() {
        // "教程" is literally in the course table, so a Chinese title that
        // contains it classifies as course.
        let r = record("CUDA编程教程", "https://example.cn/x", "");
        assert_eq!(detect_category(&r), Category::Course);
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let r = record("The CUDA HANDBOOK", "https://example.com/y", "");
        assert_eq!(detect_category(&r), Category::Book);
    }

    #[test]
    fn chinese_only_title_is_zh() {
        let r = record("CUDA编程教程", "https://example.cn/x", "");
        // Only one Latin token ("CUDA"), so no English detected.
        assert_eq!(detect_language(&r), Language::Zh);
    }

    #[test]
    fn english_needs_more_than_three_tokens() {
        let three = record("one two three", "https://a.com", "");
        assert_eq!(detect_language(&three), Language::Unknown);

        let four = record("one two three four", "https://a.com", "");
        assert_eq!(detect_language(&four), Language::En);
    }

    #[test]
    fn mixed_language_detected() {
        let r = record(
            "CUDA编程入门",
            "https://a.com",
            "A practical introduction to GPU computing",
        );
        assert_eq!(detect_language(&r), Language::Mixed);
    }

    #[test]
    fn empty_text_is_unknown() {
        let r = record("", "https://a.com", "");
        assert_eq!(detect_language(&r), Language::Unknown);
    }

    #[test]
    fn latin_tokens_split_on_digits_and_punctuation() {
        assert_eq!(latin_token_count("abc123def-ghi jkl"), 4);
        assert_eq!(latin_token_count(""), 0);
        assert_eq!(latin_token_count("123 456"), 0);
    }

    #[test]
    fn updated_recently_true_for_fresh_timestamp() {
        let fresh = (Utc::now() - chrono::Duration::days(10)).to_rfc3339();
        let mut r = record("x", "https://a.com", "");
        r.updated_at = Some(fresh);
        assert!(updated_recently(&r));
    }

    #[test]
    fn updated_recently_false_for_old_or_missing_timestamp() {
        let old = (Utc::now() - chrono::Duration::days(400)).to_rfc3339();
        let mut r = record("x", "https://a.com", "");
        r.updated_at = Some(old);
        assert!(!updated_recently(&r));

        r.updated_at = None;
        assert!(!updated_recently(&r));

        r.updated_at = Some("yesterday-ish".into());
        assert!(!updated_recently(&r));
    }

    #[test]
    fn classify_populates_every_derived_field() {
        let raw = record(
            "CUDA Toolkit Documentation",
            "https://docs.nvidia.com/cuda/",
            "The programming guide to the CUDA model and interface.",
        );
        let now = Utc::now();
        let classified = classify(raw, now);

        assert_eq!(classified.category, Category::Documentation);
        assert_eq!(classified.language_detected, Language::En);
        assert!((1.0..=5.0).contains(&classified.quality_score));
        assert!(!classified.recommendation.is_empty());
        assert_eq!(classified.collected_at, now);
    }

    #[test]
    fn classify_all_shares_one_timestamp() {
        let records = vec![
            record("a", "https://a.com", ""),
            record("b", "https://b.com", ""),
        ];
        let classified = classify_all(records);
        assert_eq!(classified.len(), 2);
        assert_eq!(classified[0].collected_at, classified[1].collected_at);
    }
}
