//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use crate::tools::{
    FetchDataParams,
    cache::{ClearCacheParams, IsCachedParams, ListCacheParams, check_impl, clear_impl, list_impl},
    fetch_data::fetch_data_impl,
};

use docfetch_client::DataService;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for docfetch.
#[derive(Clone)]
pub struct DocfetchServer {
    service: DataService,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl DocfetchServer {
    /// Create a new server handler around the retrieval pipeline.
    pub fn new(service: DataService) -> Self {
        Self { service, tool_router: Self::tool_router() }
    }

    /// Fetch a document, serving it from the cache when a fresh copy exists.
    #[tool(
        description = "Fetch data from a URL. Wiki page links are rewritten to the content API, fetched with configured credentials and converted to Markdown. Other URLs return pretty-printed JSON. Results are cached for one hour."
    )]
    async fn fetch_data(&self, params: Parameters<FetchDataParams>) -> Result<CallToolResult, McpError> {
        fetch_data_impl(&self.service, params.0).await
    }

    #[tool(description = "Remove the cached copy of a URL so the next fetch goes to the network.")]
    async fn clear_cache(&self, params: Parameters<ClearCacheParams>) -> Result<CallToolResult, McpError> {
        clear_impl(&self.service, params.0).await
    }

    #[tool(description = "List every cached document by URL, including expired ones. Optionally include content.")]
    async fn list_cache(&self, params: Parameters<ListCacheParams>) -> Result<CallToolResult, McpError> {
        list_impl(&self.service, params.0).await
    }

    #[tool(description = "Check whether the given content is the fresh cached copy for a URL.")]
    async fn is_cached(&self, params: Parameters<IsCachedParams>) -> Result<CallToolResult, McpError> {
        check_impl(&self.service, params.0).await
    }
}

impl ServerHandler for DocfetchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "docfetch".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
