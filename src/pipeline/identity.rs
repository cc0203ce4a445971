//! Identity keys for deduplication and incremental merge.
//!
//! Two records with the same non-empty identity key are the same resource.
//! The key is the URL after light canonicalisation, so that equivalent
//! links (tracking parameters, fragments, trailing slashes) compare equal.

use url::Url;

/// Query parameters that never distinguish resources and are stripped.
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "fbclid",
    "gclid",
    "ref",
];

/// Compute the identity key for a URL.
///
/// Returns an empty string for empty/whitespace input — callers treat that
/// as "no identity" and drop the record. Unparseable URLs are used verbatim
/// (trimmed) so dedup still works on exact string matches.
pub fn identity_key(raw_url: &str) -> String {
    let trimmed = raw_url.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let Ok(mut parsed) = Url::parse(trimmed) else {
        return trimmed.to_string();
    };

    parsed.set_fragment(None);

    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| !TRACKING_PARAMS.contains(&key.to_lowercase().as_str()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if kept.is_empty() {
        parsed.set_query(None);
    } else {
        let query = kept
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        parsed.set_query(Some(&query));
    }

    // Url::parse lowercases scheme and host, so the remaining difference
    // is a trailing slash on non-root paths.
    let mut key = parsed.to_string();
    if key.ends_with('/') && parsed.path() != "/" {
        key.pop();
    }
    key
}
