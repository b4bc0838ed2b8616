//! Core types and shared functionality for docfetch.
//!
//! This crate provides:
//! - Key-value storage with a SQLite backend
//! - The time-boxed document cache
//! - Unified error types
//! - Layered configuration

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheDb, CacheEntry, CacheStore, CachedDocument, KvStore, MemoryKv};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
