use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use crate::library::DEFAULT_LIBRARY_KEY;
use crate::query::DEFAULT_TERM;
use crate::source::{GoogleBooksConfig, StaticSourceConfig};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Book source configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Which source answers searches
    #[serde(default)]
    pub backend: SourceBackend,
    /// Google Books settings (used when backend = "google_books")
    #[serde(default)]
    pub google_books: GoogleBooksConfig,
    /// Static dataset settings (used when backend = "static")
    #[serde(default)]
    pub static_dataset: StaticSourceConfig,
}

/// Available book sources
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SourceBackend {
    #[default]
    GoogleBooks,
    Static,
}

impl SourceBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceBackend::GoogleBooks => "google_books",
            SourceBackend::Static => "static",
        }
    }
}

/// Library snapshot storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Data directory (snapshot files or the SQLite database live here)
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
    /// Snapshot key the library is stored under
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_storage_path(),
            key: default_storage_key(),
        }
    }
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("bookfinder-data")
}

fn default_storage_key() -> String {
    DEFAULT_LIBRARY_KEY.to_string()
}

/// Available snapshot stores
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    File,
    Sqlite,
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::File => "file",
            StorageBackend::Sqlite => "sqlite",
            StorageBackend::Memory => "memory",
        }
    }
}

/// Search behaviour
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Term searched when the user input is blank
    #[serde(default = "default_term")]
    pub default_term: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_term: default_term(),
        }
    }
}

fn default_term() -> String {
    DEFAULT_TERM.to_string()
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub source: SanitizedSourceConfig,
    pub storage: StorageConfig,
    pub search: SearchConfig,
}

/// Sanitized source config (API key redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedSourceConfig {
    pub backend: String,
    pub google_books: SanitizedGoogleBooksConfig,
    pub static_dataset: StaticSourceConfig,
}

/// Sanitized Google Books config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedGoogleBooksConfig {
    pub base_url: String,
    pub max_results: u32,
    pub lang_restrict: String,
    pub timeout_secs: u64,
    pub api_key_configured: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        let gb = &config.source.google_books;
        Self {
            server: config.server.clone(),
            source: SanitizedSourceConfig {
                backend: config.source.backend.as_str().to_string(),
                google_books: SanitizedGoogleBooksConfig {
                    base_url: gb.base_url.clone(),
                    max_results: gb.max_results,
                    lang_restrict: gb.lang_restrict.clone(),
                    timeout_secs: gb.timeout_secs,
                    api_key_configured: gb.api_key.as_ref().is_some_and(|k| !k.is_empty()),
                },
                static_dataset: config.source.static_dataset.clone(),
            },
            storage: config.storage.clone(),
            search: config.search.clone(),
        }
    }
}
