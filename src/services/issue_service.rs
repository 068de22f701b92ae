use serde::Deserialize;
use serde_json::{Number, Value};
use crate::config::JiraConfig;
use crate::jira::IssueTracker;
use crate::models::{Issue, Sprint};
use crate::utils::AppError;

/// Issue types that never get estimated on the board
const EXCLUDED_ISSUE_TYPES: [&str; 3] = ["Sub-task", "估點", "Memo"];

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoryPointRequest {
    pub issue_key: String,
    #[schema(value_type = f64)]
    pub story_point: Number,
}

/// JQL selecting the estimable issues of one sprint
pub fn sprint_issues_jql(sprint_name: &str) -> String {
    let excluded = EXCLUDED_ISSUE_TYPES
        .iter()
        .map(|t| format!("\"{}\"", t))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "sprint = \"{}\" AND issuetype not in ({})",
        escape_jql(sprint_name),
        excluded
    )
}

fn escape_jql(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Active and future sprints of a board, each with its estimable issues,
/// in the order Jira lists the sprints.
pub async fn active_and_future_sprints(
    tracker: &dyn IssueTracker,
    jira: &JiraConfig,
    board_name: &str,
) -> Result<Vec<Sprint>, AppError> {
    let sprint_names = tracker.list_active_and_future_sprint_names(board_name).await?;
    let story_point_field = jira.custom_fields.story_point();

    let mut sprints = Vec::with_capacity(sprint_names.len());
    for sprint_name in sprint_names {
        let raw_issues = tracker
            .search_issues(&sprint_issues_jql(&sprint_name), 0, None)
            .await?;

        let issues = raw_issues
            .into_iter()
            .map(|raw| Issue::from_raw(raw, &sprint_name, &jira.url, story_point_field))
            .collect();

        sprints.push(Sprint { sprint_name, issues });
    }

    Ok(sprints)
}

/// Writes the agreed story point back to the issue's mapped custom field
pub async fn update_story_point(
    tracker: &dyn IssueTracker,
    jira: &JiraConfig,
    request: &StoryPointRequest,
) -> Result<(), AppError> {
    if request.issue_key.trim().is_empty() {
        return Err(AppError::Validation("issueKey must not be empty".into()));
    }

    let issue = tracker.get_issue(&request.issue_key).await?;
    tracker
        .update_issue_field(
            &issue.key,
            jira.custom_fields.story_point(),
            Value::Number(request.story_point.clone()),
        )
        .await
}
