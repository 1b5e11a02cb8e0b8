//! Fetching the external project data file
//!
//! A data source is either an `http(s)://` URL or a local path
//! (optionally as a `file://` URL). HTTP requests bypass caches.

use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Why a reload could not use remote data
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed project data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Project list is missing or empty")]
    Empty,

    #[error("No project survived normalization")]
    NoValidRecords,
}

/// Something that can turn a data source into a response body
pub trait Fetcher: Send + Sync {
    fn fetch(&self, source: &str) -> Result<String, FetchError>;
}

/// Append a `t=<unix millis>` cache-busting parameter
pub fn cache_bust(url: &str, millis: i64) -> String {
    let (base, fragment) = match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    };
    let sep = if base.contains('?') { '&' } else { '?' };
    match fragment {
        Some(fragment) => format!("{}{}t={}#{}", base, sep, millis, fragment),
        None => format!("{}{}t={}", base, sep, millis),
    }
}

/// Fetches over HTTP(S) with ureq
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher;

impl Fetcher for HttpFetcher {
    fn fetch(&self, source: &str) -> Result<String, FetchError> {
        let url = cache_bust(source, chrono::Utc::now().timestamp_millis());
        debug!(%url, "fetching project data");

        let response = ureq::get(&url)
            .set("Cache-Control", "no-cache")
            .set("Pragma", "no-cache")
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => FetchError::Status(code),
                ureq::Error::Transport(t) => FetchError::Network(t.to_string()),
            })?;

        // ureq only errors on 4xx/5xx; anything outside 2xx is still a failure here
        let status = response.status();
        if !(200..300).contains(&status) {
            return Err(FetchError::Status(status));
        }

        Ok(response.into_string()?)
    }
}

/// Reads a data file from disk
#[derive(Debug, Clone, Default)]
pub struct FileFetcher;

impl Fetcher for FileFetcher {
    fn fetch(&self, source: &str) -> Result<String, FetchError> {
        let path = source.strip_prefix("file://").unwrap_or(source);
        debug!(path, "reading project data");
        Ok(std::fs::read_to_string(Path::new(path))?)
    }
}

/// Picks HTTP or file access from the shape of the source
#[derive(Debug, Clone, Default)]
pub struct SourceFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl SourceFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn is_http(source: &str) -> bool {
    let lower = source.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

impl Fetcher for SourceFetcher {
    fn fetch(&self, source: &str) -> Result<String, FetchError> {
        if is_http(source) {
            self.http.fetch(source.trim())
        } else {
            self.file.fetch(source.trim())
        }
    }
}
