//! Fetch pipeline for docfetch.
//!
//! This crate provides URL classification and rewriting for the wiki
//! document API, the HTTP client seam, response extraction, and the
//! [`DataService`] orchestrator that ties them to the core cache.

pub mod confluence;
pub mod extract;
pub mod fetch;
pub mod service;

pub use confluence::{is_special_url, rewrite_url};
pub use extract::{ContentPage, RemoteDocument, extract, extract_response, storage_to_markdown};
pub use fetch::{
    ConfigCredentials, Credentials, CredentialsProvider, FetchClient, FetchConfig, FetchResponse, HttpClient,
    HttpError, StaticCredentials,
};
pub use service::DataService;
