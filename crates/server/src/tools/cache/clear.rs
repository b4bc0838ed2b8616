//! clear_cache tool implementation.

use docfetch_client::DataService;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{require_url, to_json};

/// Parameters for the clear_cache tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClearCacheParams {
    /// The URL whose cached content should be dropped, exactly as it was fetched.
    pub url: String,
}

/// Output from the clear_cache tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClearCacheOutput {
    pub cleared: String,
}

/// Implementation of the clear_cache tool. Clearing an unknown URL succeeds.
pub async fn clear_impl(service: &DataService, params: ClearCacheParams) -> Result<CallToolResult, McpError> {
    let url = require_url(&params.url)?;
    service.clear_cache(url).await?;

    let json = to_json(&ClearCacheOutput { cleared: url.to_string() })?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}
