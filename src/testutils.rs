use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use crate::config::{AppConfig, FieldMapping, JiraConfig, MongoConfig};
use crate::database::EstimationStore;
use crate::jira::{IssueTracker, RawIssue, UserProfile};
use crate::models::{stored_estimation, StoredEstimation};
use crate::state::AppState;
use crate::utils::AppError;

pub const STORY_POINT_FIELD: &str = "customfield_10016";
pub const JIRA_URL: &str = "https://jira.example.com";

pub fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".into(),
        port: 8080,
        jira: JiraConfig {
            url: JIRA_URL.into(),
            user: "bot".into(),
            token: "secret".into(),
            custom_fields: FieldMapping::from_json(&format!(r#"{{"story_point": "{}"}}"#, STORY_POINT_FIELD))
                .unwrap(),
        },
        mongo: MongoConfig {
            uri: "mongodb://localhost:27017".into(),
            username: None,
            password: None,
            database: None,
        },
    }
}

pub fn test_state(tracker: Arc<FakeTracker>, store: Arc<MemoryStore>) -> AppState {
    AppState::new(test_config(), tracker, store)
}

pub fn raw_issue(key: &str, summary: &str, story_point: Option<f64>) -> RawIssue {
    let mut fields = json!({ "summary": summary, "description": null });
    if let Some(points) = story_point {
        fields[STORY_POINT_FIELD] = json!(points);
    }
    serde_json::from_value(json!({ "key": key, "fields": fields })).unwrap()
}

/// In-process tracker with canned users, boards and sprint contents
#[derive(Default)]
pub struct FakeTracker {
    profiles: HashMap<(String, String), UserProfile>,
    boards: HashMap<String, Vec<String>>,
    sprint_issues: HashMap<String, Vec<RawIssue>>,
    issues: HashMap<String, RawIssue>,
    pub searches: Mutex<Vec<String>>,
    pub updates: Mutex<Vec<(String, String, Value)>>,
}

impl FakeTracker {
    pub fn with_user(mut self, username: &str, token: &str, profile: UserProfile) -> Self {
        self.profiles.insert((username.into(), token.into()), profile);
        self
    }

    pub fn with_board(mut self, board: &str, sprints: &[&str]) -> Self {
        self.boards
            .insert(board.into(), sprints.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_sprint_issues(mut self, sprint: &str, issues: Vec<RawIssue>) -> Self {
        for issue in &issues {
            self.issues.insert(issue.key.clone(), issue.clone());
        }
        self.sprint_issues.insert(sprint.into(), issues);
        self
    }

    pub fn with_issue(mut self, issue: RawIssue) -> Self {
        self.issues.insert(issue.key.clone(), issue);
        self
    }
}

#[async_trait]
impl IssueTracker for FakeTracker {
    async fn authenticate(&self, username: &str, token: &str) -> Result<UserProfile, AppError> {
        self.profiles
            .get(&(username.to_string(), token.to_string()))
            .cloned()
            .ok_or(AppError::Auth {
                status: 401,
                message: "Tracker responded with Unauthorized".into(),
            })
    }

    async fn search_issues(
        &self,
        jql: &str,
        start_at: u32,
        max_results: Option<u32>,
    ) -> Result<Vec<RawIssue>, AppError> {
        self.searches.lock().unwrap().push(jql.to_string());

        let issues = self
            .sprint_issues
            .iter()
            .find(|(sprint, _)| jql.starts_with(&format!("sprint = \"{}\"", sprint)))
            .map(|(_, issues)| issues.clone())
            .unwrap_or_default();

        Ok(issues
            .into_iter()
            .skip(start_at as usize)
            .take(max_results.map(|m| m as usize).unwrap_or(usize::MAX))
            .collect())
    }

    async fn get_issue(&self, issue_key: &str) -> Result<RawIssue, AppError> {
        self.issues.get(issue_key).cloned().ok_or_else(|| {
            AppError::tracker(404, "Issue does not exist or you do not have permission to see it.")
        })
    }

    async fn update_issue_field(
        &self,
        issue_key: &str,
        field_id: &str,
        value: Value,
    ) -> Result<(), AppError> {
        self.get_issue(issue_key).await?;
        self.updates
            .lock()
            .unwrap()
            .push((issue_key.into(), field_id.into(), value));
        Ok(())
    }

    async fn list_active_and_future_sprint_names(
        &self,
        board_name: &str,
    ) -> Result<Vec<String>, AppError> {
        self.boards
            .get(board_name)
            .cloned()
            .ok_or_else(|| AppError::tracker(404, format!("Board '{}' does not exist", board_name)))
    }
}

/// Vote storage backed by a vector, mirroring the Mongo collection semantics
#[derive(Default)]
pub struct MemoryStore {
    pub documents: Mutex<Vec<Document>>,
    pub unavailable: bool,
}

impl MemoryStore {
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    fn check(&self) -> Result<(), AppError> {
        if self.unavailable {
            return Err(AppError::Store("connection refused".into()));
        }
        Ok(())
    }

    fn matches(doc: &Document, key: &str, value: &str) -> bool {
        doc.get_str(key).map(|v| v == value).unwrap_or(false)
    }
}

#[async_trait]
impl EstimationStore for MemoryStore {
    async fn find_one(&self, issue_key: &str, user_name: &str) -> Result<Option<Document>, AppError> {
        self.check()?;
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| Self::matches(d, "issueKey", issue_key) && Self::matches(d, "userName", user_name))
            .cloned())
    }

    async fn insert_one(&self, mut record: Document) -> Result<(), AppError> {
        self.check()?;
        if !record.contains_key("_id") {
            record.insert("_id", ObjectId::new());
        }
        self.documents.lock().unwrap().push(record);
        Ok(())
    }

    async fn update_fields(&self, record_id: &ObjectId, fields: Document) -> Result<(), AppError> {
        self.check()?;
        let mut documents = self.documents.lock().unwrap();
        if let Some(existing) = documents
            .iter_mut()
            .find(|d| d.get("_id") == Some(&Bson::ObjectId(*record_id)))
        {
            for (key, value) in fields {
                existing.insert(key, value);
            }
        }
        Ok(())
    }

    async fn find_all_by_issue_key(&self, issue_key: &str) -> Result<Vec<StoredEstimation>, AppError> {
        self.check()?;
        let documents = self.documents.lock().unwrap().clone();
        Ok(documents
            .into_iter()
            .filter(|d| Self::matches(d, "issueKey", issue_key))
            .map(stored_estimation)
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }
}
