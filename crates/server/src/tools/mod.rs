//! MCP tool implementations.
//!
//! This module contains all tools exposed by the docfetch server.

pub mod cache;
pub mod fetch_data;

#[cfg(test)]
pub(crate) mod testing;

pub use fetch_data::FetchDataParams;
