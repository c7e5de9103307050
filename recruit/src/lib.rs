//! # Recruit - candidate search for AI agents
//!
//! An MCP server exposing one tool, `list_candidates`, plus the HTML widget
//! that renders its results in the host's UI.
//!
//! Recruit provides:
//! - **Request validation** of the tool's filter object
//! - **Lead search** through the Apify lead scraper, or a read of the
//!   existing candidate pipeline
//! - **Normalization** of scraped leads into canonical candidates
//! - **MCP server** over streamable HTTP or stdio, serving the widgets as
//!   `ui://widget/<name>.html` resources
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use recruit::{CandidateQuery, CandidateSearch, CandidateStore};
//! use recruit::scraper::{ApifyClient, ApifyConfig};
//! use std::sync::Arc;
//!
//! let client = ApifyClient::new(ApifyConfig::default()).unwrap();
//! let search = CandidateSearch::new(CandidateStore::new("data/candidates.json"), Arc::new(client));
//!
//! let query = CandidateQuery::from_arguments(&serde_json::json!({
//!     "useExistingCandidates": true
//! })).unwrap();
//! let outcome = search.run(&query).await.unwrap();
//! println!("{}", outcome.summary());
//! ```

pub mod candidate;
pub mod config;
pub mod error;
pub mod mcp;
pub mod request;
pub mod scraper;
pub mod search;
pub mod store;
pub mod widgets;

// Re-exports for convenience
pub use candidate::{Candidate, Lead};
pub use config::Config;
pub use error::{Error, Result};
pub use request::{CandidateQuery, LeadFilter};
pub use search::{CandidateSearch, CandidateSource, SearchOutcome};
pub use store::CandidateStore;
pub use widgets::{Widget, WidgetRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
