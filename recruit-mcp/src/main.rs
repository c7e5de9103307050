//! Recruit MCP Server
//!
//! A Model Context Protocol (MCP) server that exposes candidate search and
//! the recruiting widget to AI agents.
//!
//! ## Usage
//!
//! ```bash
//! # Streamable HTTP on 127.0.0.1:3000/api/mcp
//! APIFY_TOKEN=... recruit-mcp
//!
//! # Custom address and data locations
//! recruit-mcp --bind 0.0.0.0:8080 --candidates /srv/candidates.json --assets-dir /srv/assets
//!
//! # stdio transport for desktop hosts
//! recruit-mcp --transport stdio
//! ```
//!
//! ## MCP Configuration
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "recruit": {
//!       "command": "recruit-mcp",
//!       "args": ["--transport", "stdio"],
//!       "env": { "APIFY_TOKEN": "..." }
//!     }
//!   }
//! }
//! ```
//!
//! ## Available Tools
//!
//! - **list_candidates**: Search Apify for new prospects or list the existing pipeline

use anyhow::Result;
use clap::{Parser, ValueEnum};
use recruit::mcp::{http, McpServer};
use recruit::Config;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Transport to serve MCP over
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Transport {
    /// Streamable HTTP (POST /api/mcp)
    Http,
    /// Newline-delimited JSON-RPC on stdin/stdout
    Stdio,
}

/// Recruit MCP Server - Expose candidate search to AI agents via Model Context Protocol
#[derive(Parser, Debug)]
#[command(name = "recruit-mcp")]
#[command(
    author,
    version,
    about = "Recruit MCP Server - Model Context Protocol interface for candidate search"
)]
struct Args {
    /// YAML configuration file
    #[arg(long, short = 'c', env = "RECRUIT_CONFIG")]
    config: Option<PathBuf>,

    /// Transport to serve
    #[arg(long, short = 't', value_enum, default_value = "http")]
    transport: Transport,

    /// HTTP listen address
    #[arg(long, short = 'b', env = "RECRUIT_BIND")]
    bind: Option<String>,

    /// JSON file with the existing candidate pipeline
    #[arg(long, env = "RECRUIT_CANDIDATES")]
    candidates: Option<PathBuf>,

    /// Directory of widget templates (*.html)
    #[arg(long, env = "RECRUIT_ASSETS_DIR")]
    assets_dir: Option<PathBuf>,

    /// Apify API token
    #[arg(long, env = "APIFY_TOKEN", hide_env_values = true)]
    apify_token: Option<String>,

    /// Apify actor to run for lead searches
    #[arg(long, env = "APIFY_ACTOR_ID")]
    apify_actor: Option<String>,

    /// Enable verbose logging (outputs to stderr)
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl Args {
    /// File (or defaults) first, then flags and environment on top
    fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load_or_default(self.config.as_deref())?;

        if let Some(bind) = &self.bind {
            config.bind = Config::parse_bind(bind)?;
        }
        if let Some(path) = &self.candidates {
            config.candidates_path = path.clone();
        }
        if let Some(dir) = &self.assets_dir {
            config.assets_dir = dir.clone();
        }
        if let Some(token) = &self.apify_token {
            config.apify.token = Some(token.clone());
        }
        if let Some(actor) = &self.apify_actor {
            config.apify.actor_id = actor.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the protocol in stdio mode
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else if args.transport == Transport::Stdio {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = args.resolve_config()?;

    tracing::info!(
        "Starting Recruit MCP server (candidates: {}, assets: {})",
        config.candidates_path.display(),
        config.assets_dir.display()
    );

    let server = Arc::new(McpServer::from_config(&config)?);

    match args.transport {
        Transport::Http => http::serve(server, config.bind).await?,
        Transport::Stdio => server.run_stdio().await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_args_parsing() {
        // Test default args
        let args = Args::try_parse_from(["recruit-mcp"]).unwrap();
        assert_eq!(args.transport, Transport::Http);
        assert!(args.config.is_none());
        assert!(!args.verbose);

        // Test stdio transport
        let args = Args::try_parse_from(["recruit-mcp", "--transport", "stdio"]).unwrap();
        assert_eq!(args.transport, Transport::Stdio);

        // Test bind
        let args = Args::try_parse_from(["recruit-mcp", "-b", "0.0.0.0:9000", "-v"]).unwrap();
        assert_eq!(args.bind.as_deref(), Some("0.0.0.0:9000"));
        assert!(args.verbose);

        assert!(Args::try_parse_from(["recruit-mcp", "--transport", "websocket"]).is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("recruit.yaml");
        std::fs::write(&path, "bind: 127.0.0.1:4000\nassets_dir: /from/file\n").unwrap();

        let args = Args::try_parse_from([
            "recruit-mcp",
            "--config",
            path.to_str().unwrap(),
            "--assets-dir",
            "/from/flag",
        ])
        .unwrap();
        let config = args.resolve_config().unwrap();

        assert_eq!(config.bind.port(), 4000);
        assert_eq!(config.assets_dir, PathBuf::from("/from/flag"));
    }

    #[test]
    fn test_invalid_bind_rejected() {
        let args = Args::try_parse_from(["recruit-mcp", "--bind", "nope"]).unwrap();
        assert!(args.resolve_config().is_err());
    }

    #[tokio::test]
    async fn test_server_creation_with_temp_assets() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("recruiting.html"), "<div></div>").unwrap();

        let config = Config {
            assets_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let server = McpServer::from_config(&config);
        assert!(server.is_ok(), "Server should be created successfully");
        assert_eq!(server.unwrap().widgets().len(), 1);
    }
}
