//! Quality scoring and recommendation text.
//!
//! The score is a deterministic rule stack over record attributes, clamped
//! to `[1.0, 5.0]`. The recommendation is a joined list of reason fragments
//! gated on the same attributes.

use chrono::{DateTime, Utc};

use crate::types::{Category, Language, RawRecord};

/// Score floor and ceiling.
pub const MIN_SCORE: f64 = 1.0;
/// See [`MIN_SCORE`].
pub const MAX_SCORE: f64 = 5.0;

/// Substrings marking official vendor domains, checked case-insensitively.
const OFFICIAL_DOMAINS: &[&str] = &[
    "nvidia.com",
    "cuda.com",
    "github.com/nvidia",
    "docs.nvidia.com",
    "developer.nvidia.com",
];

/// Compute the quality score for a record.
///
/// Rules, applied to a base of 3.0:
/// - GitHub star tiers (highest matching tier only):
///   ≥1000: +2.0, ≥100: +1.5, ≥10: +0.5
/// - GitHub update recency (parseable `updated_at` only):
///   <30 days: +0.5, <180 days: +0.3
/// - Official-domain URL substring: +1.0
/// - Description length >100 chars: +0.3, >200 chars: +0.2 (cumulative)
///
/// The result is clamped to `[1.0, 5.0]`.
pub fn quality_score(record: &RawRecord) -> f64 {
    let mut score: f64 = 3.0;

    if record.source == "GitHub" {
        let stars = record.stars.unwrap_or(0);
        if stars >= 1000 {
            score += 2.0;
        } else if stars >= 100 {
            score += 1.5;
        } else if stars >= 10 {
            score += 0.5;
        }

        if let Some(days) = record.updated_at.as_deref().and_then(days_since) {
            if days < 30 {
                score += 0.5;
            } else if days < 180 {
                score += 0.3;
            }
        }
    }

    let url = record.url.to_lowercase();
    if OFFICIAL_DOMAINS.iter().any(|domain| url.contains(domain)) {
        score += 1.0;
    }

    let len = record.description.chars().count();
    if len > 100 {
        score += 0.3;
    }
    if len > 200 {
        score += 0.2;
    }

    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// Build the human-readable recommendation string for a record.
///
/// Fragments are appended in a fixed order and joined with `"; "`. A record
/// no rule applies to gets the generic fallback phrase.
pub fn recommendation(
    record: &RawRecord,
    category: Category,
    language: Language,
    quality_score: f64,
    updated_recently: bool,
) -> String {
    let mut reasons: Vec<String> = Vec::new();

    match category {
        Category::Book => reasons.push("solid material for systematic study".into()),
        Category::Course => reasons.push("structured learning path".into()),
        Category::Code => reasons.push("includes hands-on code examples".into()),
        Category::Documentation => reasons.push("authoritative official reference".into()),
        Category::Blog => reasons.push("practical experience write-up".into()),
        Category::Other => {}
    }

    if quality_score >= 4.5 {
        reasons.push("high quality resource".into());
    } else if quality_score >= 4.0 {
        reasons.push("quality resource".into());
    }

    let stars = record.stars.unwrap_or(0);
    if stars >= 1000 {
        reasons.push(format!("broadly recognized ({stars}\u{2605})"));
    } else if stars >= 100 {
        reasons.push(format!("popular project ({stars}\u{2605})"));
    }

    if updated_recently {
        reasons.push("actively maintained".into());
    }

    match language {
        Language::Zh => reasons.push("Chinese-friendly".into()),
        Language::Mixed => reasons.push("bilingual content".into()),
        Language::En | Language::Unknown => {}
    }

    if reasons.is_empty() {
        "worth a look".into()
    } else {
        reasons.join("; ")
    }
}

/// Days elapsed since an RFC 3339 timestamp, or `None` if unparseable.
pub(crate) fn days_since(timestamp: &str) -> Option<i64> {
    let parsed = DateTime::parse_from_rfc3339(timestamp).ok()?;
    Some((Utc::now() - parsed.with_timezone(&Utc)).num_days())
}
