//! Candidate records and lead normalization
//!
//! A [`Lead`] is the loosely shaped record returned by the lead scraper.
//! A [`Candidate`] is the canonical shape rendered by the recruiting widget.
//! [`normalize_leads`] maps one into the other.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Prefix for ids of candidates produced from scraped leads
pub const LEAD_ID_PREFIX: &str = "apify";

/// Stage assigned to every freshly scraped prospect
pub const SCREENING_STAGE: &str = "Screening";

/// Years of experience used when the seniority is unknown or entry level
pub const DEFAULT_YEARS_OF_EXPERIENCE: u32 = 2;

/// Canonical candidate record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub title: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub location: String,
    pub years_of_experience: u32,
    #[serde(default)]
    pub skills: Vec<String>,
    pub stage: String,
}

/// Lead record as returned by the remote scraper
///
/// Every field is optional. Numbers and booleans are accepted and kept in
/// their string form; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[serde(default, deserialize_with = "lenient_string")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub seniority: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub functional: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub org_industry: Option<String>,
}

/// Accept a string, number, boolean or null where a string is expected.
/// Arrays and objects are treated as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Derive years of experience from a seniority label.
///
/// Total over all inputs: unrecognized labels fall back to
/// [`DEFAULT_YEARS_OF_EXPERIENCE`].
///
/// # Examples
/// ```
/// use recruit::candidate::years_of_experience;
///
/// assert_eq!(years_of_experience(Some("Director")), 10);
/// assert_eq!(years_of_experience(Some("Intern")), 2);
/// assert_eq!(years_of_experience(None), 2);
/// ```
pub fn years_of_experience(seniority: Option<&str>) -> u32 {
    match seniority {
        Some("C-Suite") | Some("VP") => 15,
        Some("Director") => 10,
        Some("Manager") => 7,
        Some("Senior") => 5,
        _ => DEFAULT_YEARS_OF_EXPERIENCE,
    }
}

impl Candidate {
    /// Build a candidate from the lead at `index` of a scrape result.
    pub fn from_lead(index: usize, lead: &Lead) -> Self {
        let email = lead.email.clone().unwrap_or_default();

        // "Austin, " and ", California" are kept as-is
        let location = format!(
            "{}, {}",
            lead.city.as_deref().unwrap_or_default(),
            lead.state.as_deref().unwrap_or_default()
        );

        let skills = [&lead.functional, &lead.org_industry]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self {
            id: format!("{}-{}-{}", LEAD_ID_PREFIX, index, email),
            name: lead.full_name.clone().unwrap_or_default(),
            title: lead.position.clone().unwrap_or_default(),
            email,
            phone: lead.phone.clone().unwrap_or_default(),
            location,
            years_of_experience: years_of_experience(lead.seniority.as_deref()),
            skills,
            stage: SCREENING_STAGE.to_string(),
        }
    }
}

/// Normalize a whole scrape result, preserving order.
pub fn normalize_leads(leads: &[Lead]) -> Vec<Candidate> {
    leads
        .iter()
        .enumerate()
        .map(|(index, lead)| Candidate::from_lead(index, lead))
        .collect()
}
