//! Document cache backed by a generic key-value store.
//!
//! - [`KvStore`] is the storage seam, implemented by the SQLite-backed
//!   [`CacheDb`] (via tokio-rusqlite, WAL mode, versioned migrations) and by
//!   [`MemoryKv`] for tests.
//! - [`CacheStore`] layers URL-keyed entries with a fixed one-hour TTL on top.

pub mod connection;
pub mod kv;
pub mod migrations;
pub mod store;

pub use crate::Error;

pub use connection::CacheDb;
pub use kv::{KvStore, MemoryKv};
pub use store::{CACHE_TTL_MS, CacheEntry, CacheStore, CachedDocument, Clock, SystemClock};
