//! Catalog lookup against a Google Books compatible volumes API

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use shared::{BookRecord, ExchangeConfig, LookupFailure, normalize_isbn};
use crate::error::ExchangeResult;
use crate::traits::MetadataLookup;

/// Real metadata lookup backed by an HTTP catalog
pub struct RealMetadataLookup {
    client: reqwest::Client,
    base_url: String,
    max_results: u32,
}

impl RealMetadataLookup {
    /// Create new lookup service for a catalog base URL
    pub fn new(base_url: impl Into<String>, timeout: Duration, max_results: u32) -> ExchangeResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_results,
        })
    }

    pub fn from_config(config: &ExchangeConfig) -> ExchangeResult<Self> {
        Self::new(config.catalog_url.clone(), config.request_timeout, config.max_results)
    }

    /// Run one volumes query and normalize the candidates
    async fn query(&self, q: &str, max_results: Option<u32>) -> Result<Vec<BookRecord>, LookupFailure> {
        let url = format!("{}/volumes", self.base_url);
        let mut request = self.client.get(&url).query(&[("q", q)]);
        if let Some(max) = max_results {
            request = request.query(&[("maxResults", max)]);
        }

        tracing::debug!(query = %q, "catalog request");

        let response = request
            .send()
            .await
            .map_err(|e| LookupFailure::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            if status.as_u16() == 429 {
                return Err(LookupFailure::RateLimited);
            }
            let body = response.text().await.unwrap_or_default();
            return Err(LookupFailure::ProviderError(provider_message(&body).unwrap_or_else(|| status.to_string())));
        }

        let volumes: VolumesResponse = response
            .json()
            .await
            .map_err(|e| LookupFailure::ProviderError(format!("Failed to parse response: {}", e)))?;

        Ok(volumes
            .items
            .into_iter()
            .map(|item| BookRecord::from(item.volume_info))
            .filter(BookRecord::is_usable)
            .collect())
    }
}

#[async_trait]
impl MetadataLookup for RealMetadataLookup {
    async fn lookup_by_identifier(&self, id: &str) -> Result<Vec<BookRecord>, LookupFailure> {
        let isbn = normalize_isbn(id);
        if isbn.is_empty() {
            return Err(LookupFailure::InvalidQuery);
        }
        self.query(&format!("isbn:{isbn}"), None).await
    }

    async fn lookup_by_text(
        &self,
        title: Option<String>,
        author: Option<String>,
    ) -> Result<Vec<BookRecord>, LookupFailure> {
        let q = text_query(title.as_deref(), author.as_deref()).ok_or(LookupFailure::InvalidQuery)?;
        self.query(&q, Some(self.max_results)).await
    }
}

/// Build `intitle:..+inauthor:..` from the non-empty parts
pub fn text_query(title: Option<&str>, author: Option<&str>) -> Option<String> {
    let parts: Vec<String> = [("intitle", title), ("inauthor", author)]
        .into_iter()
        .filter_map(|(prefix, value)| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| format!("{prefix}:{v}"))
        })
        .collect();

    if parts.is_empty() { None } else { Some(parts.join("+")) }
}

fn provider_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(|error| error.get("message").or(Some(error)))
        .and_then(|message| message.as_str())
        .map(str::to_string)
}

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<VolumeItem>,
}

#[derive(Debug, Deserialize)]
struct VolumeItem {
    #[serde(rename = "volumeInfo", default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<String>,
    image_links: Option<ImageLinks>,
    #[serde(default)]
    industry_identifiers: Vec<IndustryIdentifier>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IndustryIdentifier {
    #[serde(rename = "type")]
    kind: String,
    identifier: String,
}

impl VolumeInfo {
    /// ISBN-13 when listed, otherwise ISBN-10
    fn preferred_isbn(&self) -> Option<String> {
        ["ISBN_13", "ISBN_10"].iter().find_map(|wanted| {
            self.industry_identifiers
                .iter()
                .find(|id| id.kind == *wanted)
                .map(|id| id.identifier.clone())
        })
    }
}

impl From<VolumeInfo> for BookRecord {
    fn from(info: VolumeInfo) -> Self {
        let mut book = BookRecord::titled(info.title.clone().unwrap_or_default());
        if let Some(isbn) = info.preferred_isbn() {
            book = book.with_isbn(isbn);
        }
        if let Some(author) = info.authors.first() {
            book = book.with_author(author.clone());
        }
        if let Some(thumbnail) = info.image_links.and_then(|links| links.thumbnail) {
            book = book.with_thumbnail(thumbnail);
        }
        book
    }
}
