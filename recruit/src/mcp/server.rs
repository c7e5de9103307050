//! MCP server implementation
//!
//! Transport-independent request handling plus the stdio transport. The
//! streamable HTTP transport lives in [`super::http`].

use super::protocol::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpReply, ResourceContents,
    ResourceDescriptor, ServerCapabilities, ServerInfo, ToolResult, MCP_PROTOCOL_VERSION,
};
use super::tools::{get_tool_definitions, handle_tool_call};
use crate::config::Config;
use crate::scraper::ApifyClient;
use crate::search::CandidateSearch;
use crate::store::CandidateStore;
use crate::widgets::{widget_meta, Widget, WidgetRegistry, WIDGET_MIME_TYPE};
use crate::Error;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// MCP server for Recruit
///
/// Holds only immutable state: the search pipeline and the widget registry
/// built at startup. Safe to share across concurrent requests.
pub struct McpServer {
    search: CandidateSearch,
    widgets: Arc<WidgetRegistry>,
}

impl McpServer {
    /// Create a server from its parts
    pub fn new(search: CandidateSearch, widgets: Arc<WidgetRegistry>) -> Self {
        Self { search, widgets }
    }

    /// Build the store, scraper client and widget registry from configuration
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        config.validate()?;

        let client = ApifyClient::new(config.apify.clone())
            .map_err(|e| Error::ConfigError(e.to_string()))?;
        if config.apify.token.is_none() {
            tracing::warn!("No Apify token configured; only existing candidates can be listed");
        }

        let store = CandidateStore::new(&config.candidates_path);
        let widgets = WidgetRegistry::load(&config.assets_dir)?;

        Ok(Self::new(
            CandidateSearch::new(store, Arc::new(client)),
            Arc::new(widgets),
        ))
    }

    /// Loaded widgets
    pub fn widgets(&self) -> &WidgetRegistry {
        &self.widgets
    }

    /// Candidate search pipeline
    pub fn search(&self) -> &CandidateSearch {
        &self.search
    }

    /// Run the MCP server on stdio
    ///
    /// Handles newline-delimited messages until EOF. Logs must go to stderr.
    pub async fn run_stdio(&self) -> crate::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut writer = tokio::io::stdout();

        tracing::info!(
            "Recruit MCP server started on stdio (protocol version {})",
            MCP_PROTOCOL_VERSION
        );

        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => {
                    tracing::info!("EOF received, shutting down");
                    break;
                }
                Err(e) => {
                    tracing::error!("Read error: {}", e);
                    break;
                }
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            tracing::debug!("Received: {}", line);

            if let Some(reply) = self.handle_message(line).await {
                let reply_json = serde_json::to_string(&reply)?;
                writer.write_all(reply_json.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
                tracing::debug!("Sent: {}", reply_json);
            }
        }

        Ok(())
    }

    /// Handle one raw message (a single request or a batch)
    ///
    /// Returns `None` when nothing needs to be sent back, i.e. the message
    /// only contained notifications.
    pub async fn handle_message(&self, raw: &str) -> Option<McpReply> {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                return Some(McpReply::Single(JsonRpcResponse::error(
                    None,
                    JsonRpcError::parse_error(format!("Parse error: {}", e)),
                )));
            }
        };

        match value {
            Value::Array(items) if items.is_empty() => Some(McpReply::Single(
                JsonRpcResponse::error(None, JsonRpcError::invalid_request("Empty batch")),
            )),
            Value::Array(items) => {
                let mut responses = Vec::with_capacity(items.len());
                for item in items {
                    if let Some(response) = self.handle_value(item).await {
                        responses.push(response);
                    }
                }
                if responses.is_empty() {
                    None
                } else {
                    Some(McpReply::Batch(responses))
                }
            }
            other => self.handle_value(other).await.map(McpReply::Single),
        }
    }

    async fn handle_value(&self, value: Value) -> Option<JsonRpcResponse> {
        // Echo the id even when the rest of the request is malformed
        let id = value.get("id").filter(|id| !id.is_null()).cloned();

        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request(format!("Invalid request: {}", e)),
            )),
        }
    }

    /// Handle a single JSON-RPC request
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            tracing::debug!("Notification: {}", request.method);
            return None;
        }

        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(&request.params),
            "ping" => Ok(json!({})),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tools_call(&request.params).await,
            "resources/list" => self.handle_resources_list(),
            "resources/templates/list" => Ok(json!({ "resourceTemplates": [] })),
            "resources/read" => self.handle_resources_read(&request.params),
            _ => Err(JsonRpcError::method_not_found(&request.method)),
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(error) => {
                tracing::warn!("{} failed: {}", request.method, error);
                JsonRpcResponse::error(request.id, error)
            }
        })
    }

    /// Handle initialize request
    fn handle_initialize(&self, _params: &Option<Value>) -> Result<Value, JsonRpcError> {
        let capabilities = ServerCapabilities::default();
        let server_info = ServerInfo::default();

        Ok(json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": capabilities,
            "serverInfo": server_info
        }))
    }

    /// Handle tools/list request
    fn handle_tools_list(&self) -> Result<Value, JsonRpcError> {
        let tools = get_tool_definitions();
        Ok(json!({ "tools": tools }))
    }

    /// Handle tools/call request
    async fn handle_tools_call(&self, params: &Option<Value>) -> Result<Value, JsonRpcError> {
        let params = params
            .as_ref()
            .ok_or_else(|| JsonRpcError::invalid_params("Missing params"))?;

        let tool_name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| JsonRpcError::invalid_params("Missing tool name"))?;

        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

        let result: ToolResult = handle_tool_call(&self.search, tool_name, &arguments).await?;

        serde_json::to_value(result).map_err(|e| JsonRpcError::server_error(e.to_string()))
    }

    /// Handle resources/list request
    fn handle_resources_list(&self) -> Result<Value, JsonRpcError> {
        let resources: Vec<ResourceDescriptor> = self.widgets.iter().map(describe_widget).collect();
        Ok(json!({ "resources": resources }))
    }

    /// Handle resources/read request
    fn handle_resources_read(&self, params: &Option<Value>) -> Result<Value, JsonRpcError> {
        let uri = params
            .as_ref()
            .and_then(|p| p.get("uri"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| JsonRpcError::invalid_params("Missing uri parameter"))?;

        let widget = self.widgets.get(uri)?;

        let contents = ResourceContents {
            uri: widget.uri.clone(),
            mime_type: WIDGET_MIME_TYPE.to_string(),
            text: widget.html.clone(),
            meta: Some(widget_meta(&widget.name)),
        };

        Ok(json!({ "contents": [contents] }))
    }
}

fn describe_widget(widget: &Widget) -> ResourceDescriptor {
    ResourceDescriptor {
        uri: widget.uri.clone(),
        name: widget.display_name(),
        title: Some(widget.title.clone()),
        description: Some(widget.description()),
        mime_type: WIDGET_MIME_TYPE.to_string(),
        meta: Some(json!({
            "openai/widgetDescription": format!("Displays {} UI", widget.name),
            "openai/widgetAccessible": true
        })),
    }
}
