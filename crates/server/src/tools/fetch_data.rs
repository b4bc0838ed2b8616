//! fetch_data tool implementation.
//!
//! Fetches a URL through the cache and returns the normalized text.

use docfetch_client::DataService;
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::require_url;

/// Input parameters for fetch_data tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FetchDataParams {
    /// The URL to fetch. Wiki page links are rewritten to the content API.
    pub url: String,
}

/// Implementation of the fetch_data tool.
///
/// Pipeline failures come back as tool errors whose message is the
/// diagnostic text meant for the end user.
pub async fn fetch_data_impl(service: &DataService, params: FetchDataParams) -> Result<CallToolResult, McpError> {
    let url = require_url(&params.url)?;
    let content = service.fetch_data(url).await?;
    Ok(CallToolResult::success(vec![Content::text(content)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{service_with_body, text_of};

    #[tokio::test]
    async fn test_fetch_empty_url() {
        let (service, http) = service_with_body(r#"{"a":1}"#);
        let err = fetch_data_impl(&service, FetchDataParams { url: "".into() }).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
        assert_eq!(http.calls(), 0);
    }

    #[tokio::test]
    async fn test_fetch_returns_content() {
        let (service, http) = service_with_body(r#"{"a":1}"#);
        let params = FetchDataParams { url: "https://example.com/data.json".into() };

        let result = fetch_data_impl(&service, params.clone()).await.unwrap();
        assert_eq!(text_of(&result), "{\n  \"a\": 1\n}");

        fetch_data_impl(&service, params).await.unwrap();
        assert_eq!(http.calls(), 1);
    }

    #[tokio::test]
    async fn test_fetch_wiki_without_credentials() {
        let (service, http) = service_with_body("{}");
        let params = FetchDataParams { url: "https://acme.atlassian.net/wiki/spaces/T/pages/1/X".into() };

        let err = fetch_data_impl(&service, params).await.unwrap_err();
        assert_eq!(err.code.0, -32004);
        assert!(err.message.contains("confluence.token"));
        assert_eq!(http.calls(), 0);
    }
}
