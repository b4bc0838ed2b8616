//! Fetch orchestration: cache → classify/rewrite → authenticate → GET →
//! extract → write-through.
//!
//! Cache keys are always the URL exactly as the caller passed it. Rewriting
//! only changes what goes over the wire, so a later lookup by the page link
//! the user pasted hits the cache.

use std::sync::Arc;

use docfetch_core::{CacheStore, CachedDocument, Error};

use crate::confluence::{is_special_url, rewrite_url};
use crate::extract::extract_response;
use crate::fetch::{CredentialsProvider, HttpClient, describe_failure, request_headers};

/// Entry point for fetching normalized documents.
#[derive(Clone)]
pub struct DataService {
    cache: CacheStore,
    http: Arc<dyn HttpClient>,
    credentials: Arc<dyn CredentialsProvider>,
}

impl DataService {
    pub fn new(cache: CacheStore, http: Arc<dyn HttpClient>, credentials: Arc<dyn CredentialsProvider>) -> Self {
        Self { cache, http, credentials }
    }

    /// Fetch `url` as normalized text, serving fresh cache entries first.
    ///
    /// An empty string means the wiki page carried no storage body; that
    /// result is not cached.
    ///
    /// # Errors
    ///
    /// - [`Error::UrlFormat`] if a wiki link cannot be rewritten
    /// - [`Error::Configuration`] if wiki credentials are missing (no request is sent)
    /// - [`Error::Fetch`] on any transport or HTTP failure
    pub async fn fetch_data(&self, url: &str) -> Result<String, Error> {
        if let Some(entry) = self.cache.get(url).await? {
            tracing::debug!("cache hit for {}", url);
            return Ok(entry.content);
        }

        tracing::debug!("cache miss for {}", url);

        let special = is_special_url(url);
        let target = if special { rewrite_url(url)? } else { url.to_string() };

        let headers = if special {
            let credentials = self.credentials.credentials()?;
            request_headers(Some(&credentials))?
        } else {
            request_headers(None)?
        };

        let response = self.http.get(&target, headers).await.map_err(|e| {
            tracing::warn!(url, target = %target, error = %e, "fetch failed");
            Error::Fetch(describe_failure(url, special, &e))
        })?;

        let Some(content) = extract_response(&response.bytes, is_special_url(&target))? else {
            tracing::warn!(url, target = %target, "response carried no page body");
            return Ok(String::new());
        };

        self.cache.put(url, &content).await?;

        tracing::debug!(
            url,
            target = %target,
            status = response.status,
            content_type = response.content_type.as_deref().unwrap_or("unknown"),
            fetch_ms = response.fetch_ms,
            chars = content.len(),
            "fetched document"
        );

        Ok(content)
    }

    /// Forget the cached entry for `url`.
    pub async fn clear_cache(&self, url: &str) -> Result<(), Error> {
        self.cache.invalidate(url).await
    }

    /// Whether `content` is exactly what a fresh cache entry for `url` holds.
    pub async fn is_data_from_cache(&self, url: &str, content: &str) -> Result<bool, Error> {
        self.cache.is_from_cache(url, content).await
    }

    /// Every cached `(url, content)` pair.
    pub async fn cached_entries(&self) -> Result<Vec<CachedDocument>, Error> {
        self.cache.entries().await
    }
}
