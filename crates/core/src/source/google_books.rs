//! Google Books volumes API client.
//!
//! One GET per search, no retries. Each returned volume is normalized into a
//! [`Book`]: missing fields get placeholders and the subject list goes
//! through [`infer_category`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{BookSource, SourceError};
use crate::book::{
    infer_category, Book, BookId, NO_DESCRIPTION, UNKNOWN_AUTHOR, UNKNOWN_TITLE, UNKNOWN_YEAR,
};
use crate::metrics;
use crate::query::SearchQuery;

/// Google Books client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleBooksConfig {
    /// Volumes endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// `maxResults` sent with every request.
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    /// `langRestrict` sent with every request.
    #[serde(default = "default_lang_restrict")]
    pub lang_restrict: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Optional API key (`key` query parameter).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_base_url() -> String {
    "https://www.googleapis.com/books/v1/volumes".to_string()
}

fn default_max_results() -> u32 {
    20
}

fn default_lang_restrict() -> String {
    "es".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for GoogleBooksConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            max_results: default_max_results(),
            lang_restrict: default_lang_restrict(),
            timeout_secs: default_timeout(),
            api_key: None,
        }
    }
}

/// Remote source backed by the Google Books API.
pub struct GoogleBooksSource {
    client: Client,
    config: GoogleBooksConfig,
}

impl GoogleBooksSource {
    pub fn new(config: GoogleBooksConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(format!("bookfinder/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Build the request URL for a final query string.
    fn build_search_url(&self, query: &str) -> String {
        let mut url = format!(
            "{}?q={}&maxResults={}&langRestrict={}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(query),
            self.config.max_results,
            urlencoding::encode(&self.config.lang_restrict)
        );

        if let Some(key) = &self.config.api_key {
            url.push_str(&format!("&key={}", urlencoding::encode(key)));
        }

        url
    }

    async fn fetch(&self, query: &str) -> Result<Vec<Book>, SourceError> {
        let url = self.build_search_url(query);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Google Books returned an error status");
            return Err(SourceError::Status {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        parse_volumes(&body)
    }
}

#[async_trait]
impl BookSource for GoogleBooksSource {
    fn name(&self) -> &str {
        "google_books"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Book>, SourceError> {
        let final_query = query.to_query_string();
        debug!(query = %final_query, "Searching Google Books");

        let start = Instant::now();
        let result = self.fetch(&final_query).await;
        metrics::record_source_request(self.name(), &result, start.elapsed());

        if let Ok(books) = &result {
            debug!(count = books.len(), "Google Books search completed");
        }
        result
    }
}

/// Decode a volumes payload. A payload without `items` is an empty result.
fn parse_volumes(body: &str) -> Result<Vec<Book>, SourceError> {
    let response: GbVolumesResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::Parse(format!("Failed to parse volumes response: {}", e)))?;

    Ok(response
        .items
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, volume)| volume.into_book(index))
        .collect())
}

// ============================================================================
// Google Books API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct GbVolumesResponse {
    #[serde(default)]
    items: Option<Vec<GbVolume>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GbVolume {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    volume_info: Option<GbVolumeInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GbVolumeInfo {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    authors: Option<Vec<String>>,
    #[serde(default)]
    published_date: Option<String>,
    #[serde(default)]
    categories: Option<Vec<String>>,
    #[serde(default)]
    image_links: Option<GbImageLinks>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GbImageLinks {
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    small_thumbnail: Option<String>,
}

/// Treat empty strings the same as missing ones.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl GbVolume {
    fn into_book(self, index: usize) -> Book {
        let info = self.volume_info.unwrap_or_default();
        let links = info.image_links.unwrap_or_default();
        let categories = info.categories.unwrap_or_default();

        let id = match non_empty(self.id) {
            Some(id) => BookId::Text(id),
            None => BookId::Index(index as u64),
        };

        let author = info
            .authors
            .filter(|authors| !authors.is_empty())
            .map(|authors| authors.join(", "))
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

        let year = non_empty(info.published_date)
            .map(|date| date.chars().take(4).collect())
            .unwrap_or_else(|| UNKNOWN_YEAR.to_string());

        Book {
            id,
            title: non_empty(info.title).unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            author,
            year,
            category: infer_category(&categories),
            description: non_empty(info.description)
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            thumbnail: non_empty(links.thumbnail).or_else(|| non_empty(links.small_thumbnail)),
        }
    }
}
