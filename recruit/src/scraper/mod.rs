//! Remote lead sources
//!
//! The tool layer talks to a [`LeadSource`]. A scrape either returns the full
//! list of leads or fails as a unit with a [`ScraperError`]; there is no
//! partial result and no retry at this level.

mod apify;

pub use apify::{ApifyClient, ApifyConfig, DEFAULT_ACTOR_ID, DEFAULT_BASE_URL};

use crate::candidate::Lead;
use crate::request::LeadFilter;
use async_trait::async_trait;
use thiserror::Error;

/// Failure of a remote scrape
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScraperError {
    /// No API token configured for the remote service
    #[error("Apify API token is not configured (set APIFY_TOKEN)")]
    MissingToken,

    /// The request never produced a response (connect error, timeout, ...)
    #[error("{0}")]
    Request(String),

    /// The remote service answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not a list of lead records
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Failure without any further detail
    #[error("Unknown error")]
    Unknown,
}

impl ScraperError {
    /// Transport failure with `reason`, or [`ScraperError::Unknown`] when the
    /// reason is blank
    pub fn request(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        if reason.trim().is_empty() {
            ScraperError::Unknown
        } else {
            ScraperError::Request(reason)
        }
    }
}

/// A remote service that turns a lead filter into a list of leads
#[async_trait]
pub trait LeadSource: Send + Sync {
    /// Run a scrape and wait for the complete result list
    async fn scrape_leads(&self, filter: &LeadFilter) -> Result<Vec<Lead>, ScraperError>;
}
