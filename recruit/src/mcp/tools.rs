//! MCP tool handlers for Recruit
//!
//! Each tool handler processes a specific tool call and returns results.

use super::protocol::{JsonRpcError, ToolDefinition, ToolResult};
use crate::request::{CandidateQuery, EmailStatus, EmployeeSize, Functional, Seniority};
use crate::search::CandidateSearch;
use crate::widgets::widget_meta;
use serde_json::{json, Value};

/// Name of the candidate search tool
pub const LIST_CANDIDATES: &str = "list_candidates";

/// Widget that renders `list_candidates` results
pub const RECRUITING_WIDGET: &str = "recruiting";

fn string_array(description: &str) -> Value {
    json!({
        "type": "array",
        "items": { "type": "string" },
        "description": description
    })
}

fn enum_array(values: &[&str], description: &str) -> Value {
    json!({
        "type": "array",
        "items": { "type": "string", "enum": values },
        "description": description
    })
}

/// Get all tool definitions
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    vec![ToolDefinition {
        name: LIST_CANDIDATES.to_string(),
        title: Some("List Recruiting Candidates".to_string()),
        description: "Searches for and displays recruiting candidates/prospects using Apify lead scraper. You can filter by person title, seniority, location, company details, and more.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "personTitle": string_array("Filter by person job titles (e.g., ['Software Engineer', 'Product Manager'])"),
                "seniority": enum_array(&Seniority::ALL, "Filter by seniority level"),
                "functional": enum_array(&Functional::ALL, "Filter by functional area"),
                "personCountry": string_array("Filter by person country"),
                "personState": string_array("Filter by person state"),
                "personCity": string_array("Filter by person city"),

                "companyKeyword": string_array("Filter by company keywords"),
                "companyIndustry": string_array("Filter by company industry"),
                "companyEmployeeSize": enum_array(&EmployeeSize::ALL, "Filter by company employee size"),
                "companyDomain": string_array("Filter by company domain (e.g., ['example.com'])"),
                "companyCountry": string_array("Filter by company country"),
                "companyState": string_array("Filter by company state"),
                "companyCity": string_array("Filter by company city"),

                "contactEmailStatus": enum_array(&EmailStatus::ALL, "Filter by email verification status"),
                "hasEmail": {
                    "type": "boolean",
                    "description": "Require email address"
                },
                "hasPhone": {
                    "type": "boolean",
                    "description": "Require phone number"
                },

                "totalResults": {
                    "type": "integer",
                    "minimum": crate::request::MIN_TOTAL_RESULTS,
                    "maximum": crate::request::MAX_TOTAL_RESULTS,
                    "description": "Maximum number of results to return (default: 100, max: 50000 for paid tier)"
                },

                "useExistingCandidates": {
                    "type": "boolean",
                    "default": false,
                    "description": "If true, returns existing candidates from the pipeline instead of searching for new prospects"
                }
            },
            "required": []
        }),
        meta: Some(widget_meta(RECRUITING_WIDGET)),
    }]
}

/// Handle tool call dispatch
pub async fn handle_tool_call(
    search: &CandidateSearch,
    tool_name: &str,
    arguments: &Value,
) -> Result<ToolResult, JsonRpcError> {
    match tool_name {
        LIST_CANDIDATES => tool_list_candidates(search, arguments).await,
        _ => Err(JsonRpcError::invalid_params(format!(
            "Unknown tool: {}",
            tool_name
        ))),
    }
}

/// Execute candidate search (list_candidates)
async fn tool_list_candidates(
    search: &CandidateSearch,
    args: &Value,
) -> Result<ToolResult, JsonRpcError> {
    let query = CandidateQuery::from_arguments(args)?;
    let outcome = search.run(&query).await?;

    tracing::info!(
        "list_candidates returned {} candidates ({:?})",
        outcome.candidates.len(),
        outcome.source
    );

    let structured = json!({ "candidates": outcome.candidates });

    Ok(ToolResult::text(outcome.summary())
        .with_structured_content(structured)
        .with_meta(widget_meta(RECRUITING_WIDGET)))
}
