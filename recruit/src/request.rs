//! Tool request validation
//!
//! [`CandidateQuery`] is the typed form of the `list_candidates` tool
//! arguments. Closed-set filters are enums, so a value outside the set fails
//! deserialization. [`CandidateQuery::from_arguments`] additionally checks the
//! `totalResults` bounds. The filter half of the query, [`LeadFilter`],
//! serializes with unset fields omitted and is sent to the scraper as-is.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Smallest accepted `totalResults`
pub const MIN_TOTAL_RESULTS: u32 = 1;

/// Largest accepted `totalResults`
pub const MAX_TOTAL_RESULTS: u32 = 50_000;

/// Seniority level of a person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seniority {
    #[serde(rename = "C-Suite")]
    CSuite,
    #[serde(rename = "VP")]
    Vp,
    Director,
    Manager,
    Senior,
    Entry,
}

impl Seniority {
    pub const ALL: [&'static str; 6] = ["C-Suite", "VP", "Director", "Manager", "Senior", "Entry"];
}

/// Functional area of a person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Functional {
    Sales,
    Marketing,
    Engineering,
    Operations,
    Finance,
    #[serde(rename = "Human Resources")]
    HumanResources,
    Legal,
    #[serde(rename = "IT")]
    It,
}

impl Functional {
    pub const ALL: [&'static str; 8] = [
        "Sales",
        "Marketing",
        "Engineering",
        "Operations",
        "Finance",
        "Human Resources",
        "Legal",
        "IT",
    ];
}

/// Company headcount bucket
///
/// Serialized with spaces around the dash, which is what the scraper
/// expects. The compact form (`2-10`) is accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeSize {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2 - 10", alias = "2-10")]
    TwoToTen,
    #[serde(rename = "11 - 50", alias = "11-50")]
    ElevenToFifty,
    #[serde(rename = "51 - 200", alias = "51-200")]
    FiftyOneToTwoHundred,
    #[serde(rename = "201 - 500", alias = "201-500")]
    TwoHundredOneToFiveHundred,
    #[serde(rename = "501 - 1000", alias = "501-1000")]
    FiveHundredOneToOneThousand,
    #[serde(rename = "1001 - 5000", alias = "1001-5000")]
    OneThousandOneToFiveThousand,
    #[serde(rename = "5001 - 10000", alias = "5001-10000")]
    FiveThousandOneToTenThousand,
    #[serde(rename = "10001+")]
    OverTenThousand,
}

impl EmployeeSize {
    pub const ALL: [&'static str; 9] = [
        "1",
        "2 - 10",
        "11 - 50",
        "51 - 200",
        "201 - 500",
        "501 - 1000",
        "1001 - 5000",
        "5001 - 10000",
        "10001+",
    ];
}

/// Email verification status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmailStatus {
    Verified,
    Unverified,
}

impl EmailStatus {
    pub const ALL: [&'static str; 2] = ["Verified", "Unverified"];
}

/// Lead search filters
///
/// Every field is optional. Unset fields are left out of the serialized
/// payload entirely rather than sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadFilter {
    // Person filters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_title: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seniority: Option<Vec<Seniority>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functional: Option<Vec<Functional>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_country: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_state: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_city: Option<Vec<String>>,

    // Company filters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_keyword: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_industry: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_employee_size: Option<Vec<EmployeeSize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_domain: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_country: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_state: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_city: Option<Vec<String>>,

    // Quality filters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email_status: Option<Vec<EmailStatus>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_email: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_phone: Option<bool>,

    // Output control
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u32>,
}

/// Validated `list_candidates` arguments
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateQuery {
    #[serde(flatten)]
    pub filter: LeadFilter,

    /// Read the existing pipeline instead of searching for new prospects
    #[serde(default)]
    pub use_existing_candidates: bool,
}

impl CandidateQuery {
    /// Parse and validate raw tool arguments.
    ///
    /// `null` is treated as an empty argument object.
    pub fn from_arguments(arguments: &Value) -> Result<Self> {
        let query: CandidateQuery = if arguments.is_null() {
            CandidateQuery::default()
        } else {
            serde_json::from_value(arguments.clone())
                .map_err(|e| Error::Validation(e.to_string()))?
        };
        query.validate()?;
        Ok(query)
    }

    /// Check constraints that the type system does not encode.
    pub fn validate(&self) -> Result<()> {
        if let Some(total) = self.filter.total_results {
            if !(MIN_TOTAL_RESULTS..=MAX_TOTAL_RESULTS).contains(&total) {
                return Err(Error::Validation(format!(
                    "totalResults must be between {} and {}, got {}",
                    MIN_TOTAL_RESULTS, MAX_TOTAL_RESULTS, total
                )));
            }
        }
        Ok(())
    }
}
