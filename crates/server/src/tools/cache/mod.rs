//! Cache inspection and invalidation tools.

pub mod check;
pub mod clear;
pub mod list;

pub use check::{IsCachedParams, check_impl};
pub use clear::{ClearCacheParams, clear_impl};
pub use list::{ListCacheParams, list_impl};
