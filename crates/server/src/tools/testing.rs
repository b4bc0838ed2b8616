//! Shared fixtures for tool tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use docfetch_client::{DataService, FetchResponse, HttpClient, HttpError, StaticCredentials};
use docfetch_core::{CacheStore, MemoryKv};
use reqwest::header::HeaderMap;
use rmcp::model::CallToolResult;

/// Answers every GET with the same body.
pub struct CannedHttp {
    body: &'static str,
    calls: AtomicUsize,
}

impl CannedHttp {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpClient for CannedHttp {
    async fn get(&self, _url: &str, _headers: HeaderMap) -> Result<FetchResponse, HttpError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(FetchResponse {
            status: 200,
            content_type: Some("application/json".into()),
            bytes: Bytes::from_static(self.body.as_bytes()),
            fetch_ms: 0,
        })
    }
}

/// In-memory service without wiki credentials.
pub fn service_with_body(body: &'static str) -> (DataService, Arc<CannedHttp>) {
    let http = Arc::new(CannedHttp { body, calls: AtomicUsize::new(0) });
    let cache = CacheStore::new(Arc::new(MemoryKv::new()));
    let service = DataService::new(cache, http.clone(), Arc::new(StaticCredentials::none()));
    (service, http)
}

/// Text of the first content item.
pub fn text_of(result: &CallToolResult) -> String {
    let value = serde_json::to_value(&result.content[0]).unwrap();
    value
        .get("text")
        .and_then(|v| v.as_str())
        .expect("Expected text field in content")
        .to_string()
}
