//! list_cache tool implementation.
//!
//! Enumerates every cached document, expired ones included.

use docfetch_client::DataService;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::to_json;

/// Parameters for the list_cache tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListCacheParams {
    /// Include each document's content, not just its URL and size.
    #[serde(default)]
    pub include_content: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListedDocument {
    pub url: String,
    pub chars: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Output from the list_cache tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListCacheOutput {
    pub documents: Vec<ListedDocument>,
}

/// Implementation of the list_cache tool.
pub async fn list_impl(service: &DataService, params: ListCacheParams) -> Result<CallToolResult, McpError> {
    let documents = service
        .cached_entries()
        .await?
        .into_iter()
        .map(|doc| ListedDocument {
            chars: doc.content.chars().count(),
            content: params.include_content.then_some(doc.content),
            url: doc.url,
        })
        .collect();

    let json = to_json(&ListCacheOutput { documents })?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{service_with_body, text_of};

    #[tokio::test]
    async fn test_list_empty() {
        let (service, _) = service_with_body("{}");
        let result = list_impl(&service, ListCacheParams::default()).await.unwrap();
        let output: ListCacheOutput = serde_json::from_str(&text_of(&result)).unwrap();
        assert!(output.documents.is_empty());
    }

    #[tokio::test]
    async fn test_list_with_and_without_content() {
        let (service, _) = service_with_body(r#"{"a":1}"#);
        service.fetch_data("https://example.com/a").await.unwrap();
        service.fetch_data("https://example.com/b").await.unwrap();

        let result = list_impl(&service, ListCacheParams::default()).await.unwrap();
        let output: ListCacheOutput = serde_json::from_str(&text_of(&result)).unwrap();
        let urls: Vec<_> = output.documents.iter().map(|d| d.url.as_str()).collect();
        assert_eq!(urls, vec!["https://example.com/a", "https://example.com/b"]);
        assert!(output.documents.iter().all(|d| d.content.is_none() && d.chars == 12));

        let result = list_impl(&service, ListCacheParams { include_content: true }).await.unwrap();
        let output: ListCacheOutput = serde_json::from_str(&text_of(&result)).unwrap();
        assert_eq!(output.documents[0].content.as_deref(), Some("{\n  \"a\": 1\n}"));
    }
}
