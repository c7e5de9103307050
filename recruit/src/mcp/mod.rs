//! MCP (Model Context Protocol) server for Recruit
//!
//! Exposes candidate search as a tool and the bundled UI widgets as
//! resources. Two transports are available: streamable HTTP (`http`) and
//! newline-delimited stdio (`McpServer::run_stdio`).
//!
//! ## Tools Exposed
//!
//! - `list_candidates` - Search for new prospects or list the existing pipeline
//!
//! ## Resources Exposed
//!
//! - `ui://widget/<name>.html` - One per `*.html` file in the assets directory
//!
//! ## Usage
//!
//! ```rust,ignore
//! use recruit::{mcp::{http, McpServer}, Config};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::default();
//!     let server = Arc::new(McpServer::from_config(&config).unwrap());
//!     http::serve(server, config.bind).await.unwrap();
//! }
//! ```

pub mod http;
mod protocol;
mod server;
pub mod tools;

pub use protocol::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpReply, ResourceContents,
    ResourceDescriptor, ToolDefinition, ToolResult, MCP_PROTOCOL_VERSION,
};
pub use server::McpServer;
