//! is_cached tool implementation.

use docfetch_client::DataService;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{require_url, to_json};

/// Parameters for the is_cached tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct IsCachedParams {
    /// The URL as it was fetched.
    pub url: String,
    /// Content to compare against the cached copy.
    pub content: String,
}

/// Output from the is_cached tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct IsCachedOutput {
    pub from_cache: bool,
}

/// Implementation of the is_cached tool.
pub async fn check_impl(service: &DataService, params: IsCachedParams) -> Result<CallToolResult, McpError> {
    let url = require_url(&params.url)?;
    let from_cache = service.is_data_from_cache(url, &params.content).await?;

    let json = to_json(&IsCachedOutput { from_cache })?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}
