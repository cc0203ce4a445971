//! Core record types for collected learning resources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single raw search result as returned by a provider.
///
/// Immutable once collected — every derived field lives on
/// [`ClassifiedRecord`] instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    /// Result title (page title or repository full name).
    pub title: String,
    /// Result URL — the identity key for deduplication and merging.
    pub url: String,
    /// Text snippet or repository description.
    pub description: String,
    /// Which provider returned this record (e.g. `"DuckDuckGo"`, `"GitHub"`).
    pub source: String,
    /// The search keyword that produced this record.
    pub keyword: String,
    /// Star count, for code-hosting results.
    pub stars: Option<u64>,
    /// Primary programming language, for code-hosting results.
    pub language: Option<String>,
    /// Last-update timestamp as reported by the provider (RFC 3339).
    pub updated_at: Option<String>,
}

/// The fixed, closed set of resource categories.
///
/// Declaration order matters: category detection breaks ties by the first
/// category to reach the maximum keyword score, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Books, PDFs, guides, handbooks.
    Book,
    /// Courses, tutorials, lectures.
    Course,
    /// Blog posts and articles.
    Blog,
    /// Code repositories and examples.
    Code,
    /// Official documentation and API references.
    Documentation,
    /// No keyword matched.
    Other,
}

impl Category {
    /// Returns the lowercase tag used in exports and configs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Course => "course",
            Self::Blog => "blog",
            Self::Code => "code",
            Self::Documentation => "documentation",
            Self::Other => "other",
        }
    }

    /// All categories in tie-break (declaration) order.
    pub fn all() -> &'static [Category] {
        &[
            Self::Book,
            Self::Course,
            Self::Blog,
            Self::Code,
            Self::Documentation,
            Self::Other,
        ]
    }

    /// Best-effort parse of a category tag; unknown tags map to [`Category::Other`].
    pub fn from_name(name: &str) -> Category {
        match name {
            "book" => Self::Book,
            "course" => Self::Course,
            "blog" => Self::Blog,
            "code" => Self::Code,
            "documentation" => Self::Documentation,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Detected natural language of a record's title + description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Chinese characters only.
    Zh,
    /// English text only.
    En,
    /// Both Chinese and English present.
    Mixed,
    /// Neither detected.
    Unknown,
}

impl Language {
    /// Returns the lowercase tag used in exports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::En => "en",
            Self::Mixed => "mixed",
            Self::Unknown => "unknown",
        }
    }

    /// Best-effort parse of a language tag; unknown tags map to [`Language::Unknown`].
    pub fn from_name(name: &str) -> Language {
        match name {
            "zh" => Self::Zh,
            "en" => Self::En,
            "mixed" => Self::Mixed,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A raw record plus every derived field from classification and scoring.
///
/// Created once per raw record during the classify/score stage and never
/// mutated afterward — re-running the pipeline produces fresh values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    /// The original record as collected.
    #[serde(flatten)]
    pub raw: RawRecord,
    /// Detected resource category.
    pub category: Category,
    /// Detected natural language of title + description.
    pub language_detected: Language,
    /// Heuristic quality score, always within `[1.0, 5.0]`.
    pub quality_score: f64,
    /// Whether the provider-reported update timestamp is less than 90 days old.
    pub updated_recently: bool,
    /// Human-readable reasons why this record may be worth attention.
    pub recommendation: String,
    /// When the classify/score stage ran.
    pub collected_at: DateTime<Utc>,
}
