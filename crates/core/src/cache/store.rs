//! Time-boxed document cache over a [`KvStore`].
//!
//! Each URL occupies two keys: `server-data-cache-{url}` holds the normalized
//! text and `server-data-timestamp-{url}` the write time in epoch millis.
//! Entries older than [`CACHE_TTL_MS`] read as absent but stay stored until
//! they are overwritten or invalidated.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::kv::KvStore;
use crate::Error;

/// Freshness window for cached documents (one hour).
pub const CACHE_TTL_MS: i64 = 60 * 60 * 1000;

pub const CONTENT_KEY_PREFIX: &str = "server-data-cache-";
pub const TIMESTAMP_KEY_PREFIX: &str = "server-data-timestamp-";

/// Source of "now" for expiry checks.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// A fresh cache hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CacheEntry {
    pub url: String,
    pub content: String,
    /// Write time, epoch millis.
    pub timestamp: i64,
}

/// A stored `(url, content)` pair as returned by [`CacheStore::entries`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CachedDocument {
    pub url: String,
    pub content: String,
}

pub fn content_key(url: &str) -> String {
    format!("{CONTENT_KEY_PREFIX}{url}")
}

pub fn timestamp_key(url: &str) -> String {
    format!("{TIMESTAMP_KEY_PREFIX}{url}")
}

/// URL-keyed cache with lazy one-hour expiry.
///
/// Keys are used verbatim: `https://a/x` and `https://a/x/` are different
/// entries.
#[derive(Clone)]
pub struct CacheStore {
    kv: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self::with_clock(kv, Arc::new(SystemClock))
    }

    pub fn with_clock(kv: Arc<dyn KvStore>, clock: Arc<dyn Clock>) -> Self {
        Self { kv, clock }
    }

    /// Look up a fresh entry.
    ///
    /// Returns `None` when nothing is stored, when only one of the two keys
    /// is present, or when the entry is older than the TTL. Never deletes.
    pub async fn get(&self, url: &str) -> Result<Option<CacheEntry>, Error> {
        let Some(raw_timestamp) = self.kv.get(&timestamp_key(url)).await? else {
            return Ok(None);
        };

        let Ok(timestamp) = raw_timestamp.trim().parse::<i64>() else {
            tracing::warn!(url, raw_timestamp = %raw_timestamp, "ignoring cache entry with unreadable timestamp");
            return Ok(None);
        };

        // an age that does not fit in i64 came from a corrupt timestamp
        match self.clock.now_ms().checked_sub(timestamp) {
            Some(age) if age <= CACHE_TTL_MS => {}
            age => {
                tracing::debug!(url, age_ms = ?age, "cache entry expired");
                return Ok(None);
            }
        }

        let Some(content) = self.kv.get(&content_key(url)).await? else {
            return Ok(None);
        };

        Ok(Some(CacheEntry { url: url.to_string(), content, timestamp }))
    }

    /// Store `content` for `url`, stamped with the current time.
    ///
    /// Content and timestamp are written in a single batch.
    pub async fn put(&self, url: &str, content: &str) -> Result<(), Error> {
        let now = self.clock.now_ms();
        self.kv
            .set_many(vec![(content_key(url), content.to_string()), (timestamp_key(url), now.to_string())])
            .await?;
        tracing::debug!(url, bytes = content.len(), "cached document");
        Ok(())
    }

    /// Drop the entry for `url`. Invalidating a missing key is a no-op.
    pub async fn invalidate(&self, url: &str) -> Result<(), Error> {
        self.kv.remove_many(vec![content_key(url), timestamp_key(url)]).await?;
        tracing::debug!(url, "invalidated cache entry");
        Ok(())
    }

    /// Whether a fresh entry for `url` holds exactly `content`.
    pub async fn is_from_cache(&self, url: &str, content: &str) -> Result<bool, Error> {
        Ok(self.get(url).await?.is_some_and(|entry| entry.content == content))
    }

    /// Every stored document ordered by URL, expired ones included.
    pub async fn entries(&self) -> Result<Vec<CachedDocument>, Error> {
        let keys = self.kv.keys_with_prefix(CONTENT_KEY_PREFIX).await?;
        let mut documents = Vec::with_capacity(keys.len());

        for key in keys {
            let Some(url) = key.strip_prefix(CONTENT_KEY_PREFIX) else {
                continue;
            };
            if let Some(content) = self.kv.get(&key).await? {
                documents.push(CachedDocument { url: url.to_string(), content });
            }
        }

        Ok(documents)
    }
}
