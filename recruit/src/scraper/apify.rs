//! Apify lead scraper client
//!
//! Runs an Apify actor synchronously and reads its dataset items in the same
//! request (`run-sync-get-dataset-items`). The lead filter is the actor input.

use super::{LeadSource, ScraperError};
use crate::candidate::Lead;
use crate::request::LeadFilter;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Default Apify API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.apify.com";

/// Default lead scraper actor
pub const DEFAULT_ACTOR_ID: &str = "pipelinelabs~lead-scraper-apollo-zoominfo-lusha";

/// Synchronous actor runs are cut off by Apify after 300 seconds
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Apify connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApifyConfig {
    /// API token; only required when a scrape is actually run
    pub token: Option<String>,
    /// Actor to run (`username~actor-name` or actor id)
    pub actor_id: String,
    /// API base URL
    pub base_url: String,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApifyConfig {
    fn default() -> Self {
        Self {
            token: None,
            actor_id: DEFAULT_ACTOR_ID.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Apify lead scraper
pub struct ApifyClient {
    client: Client,
    config: ApifyConfig,
}

impl ApifyClient {
    /// Create a new client. A missing token is not an error here; it is
    /// reported when a scrape is attempted.
    pub fn new(config: ApifyConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ScraperError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Endpoint that runs the actor and returns its dataset items
    pub fn run_url(&self) -> String {
        format!(
            "{}/v2/acts/{}/run-sync-get-dataset-items",
            self.config.base_url.trim_end_matches('/'),
            self.config.actor_id
        )
    }

    fn map_request_error(&self, err: reqwest::Error) -> ScraperError {
        if err.is_timeout() {
            return ScraperError::Request(format!(
                "Request timeout after {} seconds",
                self.config.timeout_secs
            ));
        }

        let reason = err.to_string();
        if err.is_connect() && !reason.trim().is_empty() {
            ScraperError::Request(format!("Cannot connect to Apify: {}", reason))
        } else {
            ScraperError::request(reason)
        }
    }
}

#[async_trait]
impl LeadSource for ApifyClient {
    async fn scrape_leads(&self, filter: &LeadFilter) -> Result<Vec<Lead>, ScraperError> {
        let token = self
            .config
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ScraperError::MissingToken)?;

        let url = self.run_url();
        tracing::debug!("Running Apify actor {}", self.config.actor_id);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(filter)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Apify actor run failed with HTTP {}", status.as_u16());
            return Err(ScraperError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let items: Vec<Value> = serde_json::from_str(&text)
            .map_err(|e| ScraperError::Decode(format!("expected a list of leads: {}", e)))?;

        let leads = items
            .into_iter()
            .map(|item| {
                if !item.is_object() {
                    return Err(ScraperError::Decode(format!(
                        "expected a lead object, got {}",
                        item
                    )));
                }
                serde_json::from_value::<Lead>(item).map_err(|e| ScraperError::Decode(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Apify returned {} leads", leads.len());
        Ok(leads)
    }
}
