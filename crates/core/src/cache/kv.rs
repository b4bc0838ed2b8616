//! Generic string key-value storage.
//!
//! The cache store only ever talks to a [`KvStore`]; [`CacheDb`] persists to
//! SQLite and [`MemoryKv`] keeps everything in process.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio_rusqlite::params;

use super::connection::CacheDb;
use crate::Error;

/// Host key-value abstraction addressed by string keys.
///
/// `set_many` and `remove_many` must apply all of their entries or none.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read a single value.
    async fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Write several values as one update.
    async fn set_many(&self, entries: Vec<(String, String)>) -> Result<(), Error>;

    /// Remove several keys as one update. Missing keys are ignored.
    async fn remove_many(&self, keys: Vec<String>) -> Result<(), Error>;

    /// All keys starting with `prefix`, in ascending order.
    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, Error>;
}

#[async_trait]
impl KvStore for CacheDb {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let key = key.to_string();
        self.conn
            .call(move |conn| -> Result<Option<String>, Error> {
                let result = conn.query_row("SELECT value FROM kv_store WHERE key = ?1", params![key], |row| {
                    row.get(0)
                });

                match result {
                    Ok(value) => Ok(Some(value)),
                    Err(tokio_rusqlite::rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    async fn set_many(&self, entries: Vec<(String, String)>) -> Result<(), Error> {
        let updated_at = chrono::Utc::now().to_rfc3339();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                let tx = conn.unchecked_transaction()?;
                for (key, value) in &entries {
                    tx.execute(
                        "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                        ON CONFLICT(key) DO UPDATE SET
                            value = excluded.value,
                            updated_at = excluded.updated_at",
                        params![key, value, updated_at],
                    )?;
                }
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    async fn remove_many(&self, keys: Vec<String>) -> Result<(), Error> {
        self.conn
            .call(move |conn| -> Result<(), Error> {
                let tx = conn.unchecked_transaction()?;
                for key in &keys {
                    tx.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
                }
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, Error> {
        let prefix = prefix.to_string();
        self.conn
            .call(move |conn| -> Result<Vec<String>, Error> {
                let mut stmt =
                    conn.prepare("SELECT key FROM kv_store WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key ASC")?;
                let keys = stmt
                    .query_map(params![prefix], |row| row.get::<_, String>(0))?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(keys)
            })
            .await
            .map_err(Error::from)
    }
}

/// In-process key-value store.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set_many(&self, entries: Vec<(String, String)>) -> Result<(), Error> {
        let mut map = self.entries.write().await;
        map.extend(entries);
        Ok(())
    }

    async fn remove_many(&self, keys: Vec<String>) -> Result<(), Error> {
        let mut map = self.entries.write().await;
        for key in &keys {
            map.remove(key);
        }
        Ok(())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, Error> {
        let map = self.entries.read().await;
        Ok(map.keys().filter(|k| k.starts_with(prefix)).cloned().collect())
    }
}
