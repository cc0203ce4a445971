//! Record deduplication and incremental merge by identity key.
//!
//! Both operations keep the earliest-seen entry per key: `dedupe` within a
//! single collection run, `merge` across runs (existing entries win).

use std::collections::HashSet;

use crate::types::{ClassifiedRecord, RawRecord};

use super::identity::identity_key;

/// Deduplicate raw records by identity key, keeping the first occurrence.
///
/// Records with an empty URL are dropped. Output order equals
/// first-occurrence order in the input, so `dedupe` is idempotent.
pub fn dedupe(records: Vec<RawRecord>) -> Vec<RawRecord> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::new();
    let mut dropped = 0usize;

    for record in records {
        let key = identity_key(&record.url);
        if key.is_empty() || !seen.insert(key) {
            dropped += 1;
            continue;
        }
        unique.push(record);
    }

    tracing::debug!(kept = unique.len(), dropped, "deduplicated records");
    unique
}

/// Merge newly classified records into an existing set.
///
/// Union by identity key; on conflict the existing entry wins. New records
/// with an empty URL are dropped, as in [`dedupe`].
pub fn merge(
    existing: Vec<ClassifiedRecord>,
    new: Vec<ClassifiedRecord>,
) -> Vec<ClassifiedRecord> {
    let mut seen: HashSet<String> = existing
        .iter()
        .map(|record| identity_key(&record.raw.url))
        .collect();

    let before = existing.len();
    let mut merged = existing;
    for record in new {
        let key = identity_key(&record.raw.url);
        if key.is_empty() || !seen.insert(key) {
            continue;
        }
        merged.push(record);
    }

    tracing::info!(
        existing = before,
        added = merged.len() - before,
        total = merged.len(),
        "merged records"
    );
    merged
}
