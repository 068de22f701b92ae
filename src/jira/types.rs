use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Issue as returned by Jira; `fields` keeps every navigable field, custom ones included
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawIssue {
    pub key: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// `GET /rest/api/2/myself`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub account_id: Option<String>,
    pub key: Option<String>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_urls: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchRequest<'a> {
    pub jql: &'a str,
    pub start_at: u32,
    pub max_results: u32,
    pub fields: [&'a str; 1],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub issues: Vec<RawIssue>,
}

/// Paged list returned by the agile API (boards, sprints)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AgilePage<T> {
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
    #[serde(default = "default_is_last")]
    pub is_last: bool,
}

fn default_is_last() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub(crate) struct Board {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SprintSummary {
    pub name: String,
}

/// Jira error payload: `{"errorMessages": [...], "errors": {"field": "msg"}}`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error_messages: Vec<String>,
    #[serde(default)]
    pub errors: HashMap<String, String>,
}

impl ErrorBody {
    pub fn message(&self) -> Option<String> {
        let mut parts: Vec<String> = self.error_messages.clone();
        let mut field_errors: Vec<_> = self.errors.iter().collect();
        field_errors.sort();
        parts.extend(field_errors.into_iter().map(|(field, msg)| format!("{}: {}", field, msg)));

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        }
    }
}
