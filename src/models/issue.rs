use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::jira::RawIssue;

/// Issue as shown on the estimation board
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub issue_key: String,
    pub url: String,
    pub summary: String,
    pub description: Option<String>,
    pub story_point: f64,
    pub sprint_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    pub sprint_name: String,
    pub issues: Vec<Issue>,
}

impl Issue {
    /// Maps a raw Jira issue. The story point comes from the mapped custom
    /// field and is 0.0 whenever that field is missing or not a number.
    pub fn from_raw(raw: RawIssue, sprint_name: &str, jira_url: &str, story_point_field: &str) -> Self {
        let fields = &raw.fields;

        let story_point = fields
            .get(story_point_field)
            .and_then(Value::as_f64)
            .unwrap_or(0.0);

        Issue {
            url: format!("{}/browse/{}", jira_url, raw.key),
            summary: fields
                .get("summary")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            description: fields
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
            story_point,
            sprint_name: sprint_name.to_string(),
            issue_key: raw.key,
        }
    }
}
