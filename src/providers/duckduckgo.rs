//! DuckDuckGo web search provider.
//!
//! Uses the HTML-only endpoint at `https://html.duckduckgo.com/html/`,
//! which requires no JavaScript and tolerates automated requests.

use crate::config::SearchSettings;
use crate::error::ScoutError;
use crate::http;
use crate::provider::{ProviderKind, SearchProvider};
use crate::types::RawRecord;
use scraper::{Html, Selector};
use url::Url;

/// DuckDuckGo HTML search scraper.
pub struct DuckDuckGoProvider;

impl DuckDuckGoProvider {
    /// Extract the target URL from DuckDuckGo's redirect wrapper.
    ///
    /// Result links look like `//duckduckgo.com/l/?uddg=https%3A%2F%2F...`;
    /// the real URL is carried in the `uddg` query parameter.
    fn unwrap_redirect(href: &str) -> Option<String> {
        let absolute = if href.starts_with("//") {
            format!("https:{href}")
        } else {
            href.to_string()
        };

        let parsed = Url::parse(&absolute).ok()?;
        if parsed.host_str() == Some("duckduckgo.com") && parsed.path().starts_with("/l/") {
            parsed
                .query_pairs()
                .find(|(key, _)| key == "uddg")
                .map(|(_, value)| value.into_owned())
        } else {
            Some(absolute)
        }
    }
}

impl SearchProvider for DuckDuckGoProvider {
    async fn search(
        &self,
        keyword: &str,
        settings: &SearchSettings,
    ) -> Result<Vec<RawRecord>, ScoutError> {
        tracing::trace!(keyword, "DuckDuckGo search");

        let client = http::build_client(settings)?;
        let response = client
            .post("https://html.duckduckgo.com/html/")
            .form(&[("q", keyword)])
            .header("Accept-Language", "en-US,en;q=0.9,zh-CN;q=0.8")
            .send()
            .await
            .map_err(|e| ScoutError::Http(format!("DuckDuckGo request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ScoutError::Http(format!("DuckDuckGo HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| ScoutError::Http(format!("DuckDuckGo response read failed: {e}")))?;

        parse_results(&html, keyword, settings.max_results_per_keyword)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::DuckDuckGo
    }
}

/// Parse a DuckDuckGo HTML response into raw records.
///
/// Separate from the HTTP path so it can be tested against captured HTML.
pub(crate) fn parse_results(
    html: &str,
    keyword: &str,
    max_results: usize,
) -> Result<Vec<RawRecord>, ScoutError> {
    let document = Html::parse_document(html);

    let result_sel = Selector::parse(".result:not(.result--ad)")
        .map_err(|e| ScoutError::Parse(format!("invalid result selector: {e:?}")))?;
    let title_sel = Selector::parse(".result__a")
        .map_err(|e| ScoutError::Parse(format!("invalid title selector: {e:?}")))?;
    let snippet_sel = Selector::parse(".result__snippet")
        .map_err(|e| ScoutError::Parse(format!("invalid snippet selector: {e:?}")))?;

    let mut records = Vec::new();
    for element in document.select(&result_sel) {
        let Some(title_el) = element.select(&title_sel).next() else {
            continue;
        };

        let title = title_el.text().collect::<String>().trim().to_string();
        if title.is_empty() {
            continue;
        }

        let Some(href) = title_el.value().attr("href") else {
            continue;
        };
        let Some(url) = DuckDuckGoProvider::unwrap_redirect(href) else {
            continue;
        };

        let description = element
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        records.push(RawRecord {
            title,
            url,
            description,
            source: ProviderKind::DuckDuckGo.name().to_string(),
            keyword: keyword.to_string(),
            ..Default::default()
        });

        if records.len() >= max_results {
            break;
        }
    }

    tracing::debug!(keyword, count = records.len(), "DuckDuckGo results parsed");
    Ok(records)
}
