pub mod client;
pub mod types;

pub use client::JiraClient;
pub use types::{RawIssue, UserProfile};

use async_trait::async_trait;
use serde_json::Value;
use crate::utils::AppError;

/// Operations the service needs from the issue tracker.
///
/// `authenticate` uses the caller's own credentials; every other call runs
/// with the service account configured at startup.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Opens a session with basic credentials and returns the caller's profile
    async fn authenticate(&self, username: &str, token: &str) -> Result<UserProfile, AppError>;

    /// JQL search. `max_results = None` fetches every matching issue.
    async fn search_issues(
        &self,
        jql: &str,
        start_at: u32,
        max_results: Option<u32>,
    ) -> Result<Vec<RawIssue>, AppError>;

    async fn get_issue(&self, issue_key: &str) -> Result<RawIssue, AppError>;

    async fn update_issue_field(
        &self,
        issue_key: &str,
        field_id: &str,
        value: Value,
    ) -> Result<(), AppError>;

    async fn list_active_and_future_sprint_names(
        &self,
        board_name: &str,
    ) -> Result<Vec<String>, AppError>;
}
