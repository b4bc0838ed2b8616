//! Input checks and output encoding shared by the tools.

use docfetch_core::Error;
use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Errors raised by the tool layer itself.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Tool output could not be serialized.
    #[error("OUTPUT_FAILED: {0}")]
    Output(String),
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        McpError { code: ErrorCode(-32603), message: err.to_string().into(), data: None }
    }
}

/// Reject blank URLs before they reach the pipeline.
pub fn require_url(url: &str) -> Result<&str, Error> {
    if url.trim().is_empty() {
        return Err(Error::InvalidInput("url cannot be empty".into()));
    }
    Ok(url)
}

/// Pretty JSON for tool output.
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ToolError> {
    serde_json::to_string_pretty(value).map_err(|e| ToolError::Output(format!("failed to serialize output: {e}")))
}
