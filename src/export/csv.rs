//! CSV sink: flat file, workbook directory, and re-loading for merges.
//!
//! The "workbook" is a directory of CSV files standing in for spreadsheet
//! sheets: `all.csv`, one `<category>.csv` per non-empty bucket,
//! `summary.csv`, and `top20.csv`. `all.csv` is the canonical sheet that
//! [`load_csv`] reads back for incremental updates.
//!
//! Load failures are soft by design: a missing file, an unsupported
//! extension, or a corrupt row produces a logged warning and an empty (or
//! partial) result, never an abort.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::{Result, ScoutError};
use crate::pipeline::rank::{top_n, SummaryStats};
use crate::pipeline::run::PipelineOutcome;
use crate::types::{Category, ClassifiedRecord, Language, RawRecord};

/// Column display labels, in export order.
const COLUMNS: &[&str] = &[
    "Title",
    "URL",
    "Type",
    "Language",
    "Source",
    "Quality Score",
    "Recommendation",
    "Description",
    "Stars",
    "Repo Language",
    "Updated At",
    "Collected At",
    "Keyword",
];

/// How many records the top sheet holds.
const TOP_SHEET_SIZE: usize = 20;

/// Write records to a flat CSV file with display-label headers.
///
/// # Errors
///
/// Returns [`ScoutError::Export`] if the file cannot be written.
pub fn save_csv(path: &Path, records: &[ClassifiedRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| ScoutError::Export(format!("cannot create {}: {e}", path.display())))?;

    writer
        .write_record(COLUMNS)
        .map_err(|e| ScoutError::Export(format!("header write failed: {e}")))?;
    for record in records {
        writer
            .write_record(row_fields(record))
            .map_err(|e| ScoutError::Export(format!("row write failed: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| ScoutError::Export(format!("flush failed: {e}")))?;

    tracing::info!(path = %path.display(), count = records.len(), "wrote CSV");
    Ok(())
}

/// Write a full workbook directory for a pipeline outcome.
///
/// # Errors
///
/// Returns [`ScoutError::Export`] if the directory or any sheet cannot be
/// written.
pub fn save_workbook(dir: &Path, outcome: &PipelineOutcome) -> Result<()> {
    std::fs::create_dir_all(dir)
        .map_err(|e| ScoutError::Export(format!("cannot create {}: {e}", dir.display())))?;

    save_csv(&dir.join("all.csv"), &outcome.records)?;

    for (category, records) in &outcome.categorized {
        if records.is_empty() {
            continue;
        }
        save_csv(&dir.join(format!("{}.csv", category.name())), records)?;
    }

    save_summary(&dir.join("summary.csv"), &outcome.summary)?;
    save_csv(
        &dir.join("top20.csv"),
        &top_n(&outcome.records, TOP_SHEET_SIZE),
    )?;

    tracing::info!(dir = %dir.display(), "wrote workbook");
    Ok(())
}

/// Write summary statistics as metric/value rows.
fn save_summary(path: &Path, summary: &SummaryStats) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| ScoutError::Export(format!("cannot create {}: {e}", path.display())))?;

    let mut write = |metric: &str, value: String| {
        writer
            .write_record([metric, value.as_str()])
            .map_err(|e| ScoutError::Export(format!("summary write failed: {e}")))
    };

    write("Metric", "Value".into())?;
    write("Total records", summary.total.to_string())?;
    for (category, count) in &summary.per_category {
        write(&format!("Category: {category}"), count.to_string())?;
    }
    write("Chinese records", summary.zh_count.to_string())?;
    write("English records", summary.en_count.to_string())?;
    write("Bilingual records", summary.mixed_count.to_string())?;
    for (source, count) in &summary.per_source {
        write(&format!("Source: {source}"), count.to_string())?;
    }
    write("Mean score", format!("{:.2}", summary.mean_score))?;
    write("Max score", format!("{:.1}", summary.max_score))?;
    write("Min score", format!("{:.1}", summary.min_score))?;
    write("Scored 4.0 or higher", summary.above_four.to_string())?;
    write("Generated at", summary.generated_at.to_rfc3339())?;

    writer
        .flush()
        .map_err(|e| ScoutError::Export(format!("flush failed: {e}")))
}

/// Load a previously exported CSV back into classified records.
///
/// Missing files and non-CSV extensions produce a warning and an empty
/// vector. Rows that fail to parse are skipped with a warning; recognised
/// fields get defensive defaults when absent.
pub fn load_csv(path: &Path) -> Result<Vec<ClassifiedRecord>> {
    if path.extension().and_then(|e| e.to_str()) != Some("csv") {
        tracing::warn!(path = %path.display(), "unsupported export extension, expected .csv");
        return Ok(Vec::new());
    }
    if !path.exists() {
        tracing::warn!(path = %path.display(), "export file not found");
        return Ok(Vec::new());
    }

    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| ScoutError::Export(format!("cannot open {}: {e}", path.display())))?;

    let headers = reader
        .headers()
        .map_err(|e| ScoutError::Export(format!("header read failed: {e}")))?
        .clone();
    let column = |label: &str| headers.iter().position(|h| h == label);
    let columns: Vec<Option<usize>> = COLUMNS.iter().map(|label| column(label)).collect();

    let mut records = Vec::new();
    for (line, row) in reader.records().enumerate() {
        match row {
            Ok(row) => records.push(record_from_row(&row, &columns)),
            Err(err) => {
                tracing::warn!(line, error = %err, "skipping unreadable CSV row");
            }
        }
    }

    tracing::info!(path = %path.display(), count = records.len(), "loaded CSV");
    Ok(records)
}

/// Serialise one record into export column order.
fn row_fields(record: &ClassifiedRecord) -> Vec<String> {
    vec![
        record.raw.title.clone(),
        record.raw.url.clone(),
        record.category.name().to_string(),
        record.language_detected.name().to_string(),
        record.raw.source.clone(),
        format!("{:.1}", record.quality_score),
        record.recommendation.clone(),
        record.raw.description.clone(),
        record.raw.stars.map(|s| s.to_string()).unwrap_or_default(),
        record.raw.language.clone().unwrap_or_default(),
        record.raw.updated_at.clone().unwrap_or_default(),
        record.collected_at.to_rfc3339(),
        record.raw.keyword.clone(),
    ]
}

/// Rebuild a record from a CSV row, with defensive defaults per field.
fn record_from_row(row: &csv::StringRecord, columns: &[Option<usize>]) -> ClassifiedRecord {
    let field = |index: usize| -> String {
        columns
            .get(index)
            .copied()
            .flatten()
            .and_then(|pos| row.get(pos))
            .unwrap_or_default()
            .to_string()
    };
    let optional = |index: usize| -> Option<String> {
        let value = field(index);
        (!value.is_empty()).then_some(value)
    };

    let quality_score = field(5)
        .parse::<f64>()
        .unwrap_or(crate::pipeline::score::MIN_SCORE);
    let collected_at = DateTime::parse_from_rfc3339(&field(11))
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now());

    let raw = RawRecord {
        title: field(0),
        url: field(1),
        description: field(7),
        source: field(4),
        keyword: field(12),
        stars: optional(8).and_then(|s| s.parse().ok()),
        language: optional(9),
        updated_at: optional(10),
    };
    // Not an exported column; recomputed from the update timestamp.
    let updated_recently = crate::pipeline::classify::updated_recently(&raw);

    ClassifiedRecord {
        raw,
        category: Category::from_name(&field(2)),
        language_detected: Language::from_name(&field(3)),
        quality_score,
        updated_recently,
        recommendation: field(6),
        collected_at,
    }
}
