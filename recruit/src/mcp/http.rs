//! Streamable HTTP transport
//!
//! `POST /api/mcp` takes one JSON-RPC message (or batch) per request and
//! answers with JSON. Messages that are only notifications get
//! `202 Accepted`. Server-initiated streams are not offered, so
//! `GET /api/mcp` is `405`.

use super::server::McpServer;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};

/// Path the MCP endpoint is mounted at
pub const MCP_PATH: &str = "/api/mcp";

/// Build the HTTP router
pub fn router(server: Arc<McpServer>) -> Router {
    Router::new()
        .route(MCP_PATH, post(mcp_post_handler).get(mcp_get_handler))
        .route("/health", get(health_handler))
        .with_state(server)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Serve the MCP endpoint on `addr` until Ctrl-C
pub async fn serve(server: Arc<McpServer>, addr: SocketAddr) -> crate::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        "Recruit MCP server listening on http://{}{}",
        listener.local_addr()?,
        MCP_PATH
    );

    axum::serve(listener, router(server))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    debug!("Shutdown signal received");
}

async fn mcp_post_handler(State(server): State<Arc<McpServer>>, body: String) -> Response {
    debug!("Received: {}", body);
    match server.handle_message(&body).await {
        Some(reply) => Json(reply).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

async fn mcp_get_handler() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        "Server-initiated streams are not supported",
    )
        .into_response()
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
