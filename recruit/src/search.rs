//! Candidate search pipeline
//!
//! validate → load or scrape → normalize. Exactly one of the two I/O paths
//! runs per query; validation has already happened by the time a
//! [`CandidateQuery`] exists.

use crate::candidate::normalize_leads;
use crate::error::Result;
use crate::request::CandidateQuery;
use crate::scraper::LeadSource;
use crate::store::CandidateStore;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Where a result list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CandidateSource {
    /// The existing recruiting pipeline (local store)
    Pipeline,
    /// A fresh lead search against the scraper
    LeadSearch,
}

impl CandidateSource {
    fn describe(self) -> &'static str {
        match self {
            CandidateSource::Pipeline => "in the recruiting pipeline",
            CandidateSource::LeadSearch => "from Apify lead search",
        }
    }
}

/// Result of one search
///
/// Pipeline records are kept exactly as stored; scraped leads are
/// normalized candidates in their serialized form.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub candidates: Vec<Value>,
    pub source: CandidateSource,
}

impl SearchOutcome {
    /// One-line, human-readable summary for the tool response
    pub fn summary(&self) -> String {
        format!(
            "Found {} candidates {}. The interactive widget displays candidate information \
             including name, title, location, experience, skills, and current stage in the \
             hiring process.",
            self.candidates.len(),
            self.source.describe()
        )
    }
}

/// Runs candidate queries against the pipeline store or the lead scraper
#[derive(Clone)]
pub struct CandidateSearch {
    store: CandidateStore,
    leads: Arc<dyn LeadSource>,
}

impl CandidateSearch {
    pub fn new(store: CandidateStore, leads: Arc<dyn LeadSource>) -> Self {
        Self { store, leads }
    }

    /// Execute a validated query
    pub async fn run(&self, query: &CandidateQuery) -> Result<SearchOutcome> {
        if query.use_existing_candidates {
            tracing::debug!("Reading existing pipeline from {}", self.store.path().display());
            let candidates = self.store.load().await?;
            return Ok(SearchOutcome {
                candidates,
                source: CandidateSource::Pipeline,
            });
        }

        tracing::debug!("Searching for new prospects");
        let leads = self.leads.scrape_leads(&query.filter).await.map_err(|e| {
            tracing::warn!("Lead search failed: {}", e);
            e
        })?;

        let candidates = normalize_leads(&leads)
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(SearchOutcome {
            candidates,
            source: CandidateSource::LeadSearch,
        })
    }
}
