//! HTTP GET seam and its reqwest implementation.
//!
//! The orchestrator only depends on [`HttpClient`], so tests can swap in a
//! double that counts calls. [`FetchClient`] is the production client:
//!
//! - rustls, gzip/brotli/deflate, at most 5 redirects
//! - no request timeout and no retries
//! - 401/403 surface as distinct [`HttpError`] variants so diagnostics can
//!   tell authentication and permission failures apart

pub mod auth;
pub mod error;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use std::time::Instant;

pub use auth::{ConfigCredentials, Credentials, CredentialsProvider, StaticCredentials};
pub use error::{HttpError, describe_failure};

use docfetch_core::Error;

/// Accept header for unauthenticated requests.
const GENERIC_ACCEPT: &str = "application/json, text/html;q=0.9, */*;q=0.8";

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "docfetch/0.1")
    pub user_agent: String,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { user_agent: "docfetch/0.1".to_string(), max_redirects: 5 }
    }
}

/// Response from a successful GET.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,
    /// Content-Type header
    pub content_type: Option<String>,
    /// Response body bytes
    pub bytes: Bytes,
    /// Time taken to fetch in milliseconds
    pub fetch_ms: u64,
}

/// Something that can perform an HTTP GET with custom headers.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET `url`; non-2xx statuses are errors.
    async fn get(&self, url: &str, headers: HeaderMap) -> Result<FetchResponse, HttpError>;
}

/// Headers for a request, with basic auth when `credentials` is given.
///
/// Authenticated requests also declare JSON and disable the wiki's XSRF
/// check (`X-Atlassian-Token: no-check`).
pub fn request_headers(credentials: Option<&Credentials>) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();

    let Some(credentials) = credentials else {
        headers.insert(header::ACCEPT, HeaderValue::from_static(GENERIC_ACCEPT));
        return Ok(headers);
    };

    let mut authorization = HeaderValue::from_str(&credentials.basic_auth_value()).map_err(Error::unexpected)?;
    authorization.set_sensitive(true);

    headers.insert(header::AUTHORIZATION, authorization);
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert("X-Atlassian-Token", HeaderValue::from_static("no-check"));

    Ok(headers)
}

/// reqwest-backed [`HttpClient`].
pub struct FetchClient {
    http: Client,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: &FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Unexpected(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl HttpClient for FetchClient {
    async fn get(&self, url: &str, headers: HeaderMap) -> Result<FetchResponse, HttpError> {
        let start = Instant::now();

        let response = self
            .http
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(HttpError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::from_status(status));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| HttpError::Network(format!("failed to read response: {e}")))?;

        let fetch_ms = start.elapsed().as_millis() as u64;

        tracing::debug!("fetched {} in {}ms ({} bytes)", url, fetch_ms, bytes.len());

        Ok(FetchResponse { status: status.as_u16(), content_type, bytes, fetch_ms })
    }
}

impl HttpError {
    /// Classify a non-success status.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => HttpError::Unauthorized,
            StatusCode::FORBIDDEN => HttpError::Forbidden,
            other => HttpError::Status { status: other.as_u16() },
        }
    }
}
