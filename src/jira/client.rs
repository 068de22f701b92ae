use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use crate::config::JiraConfig;
use crate::jira::types::{AgilePage, Board, ErrorBody, RawIssue, SearchRequest, SearchResponse, SprintSummary, UserProfile};
use crate::jira::IssueTracker;
use crate::utils::AppError;

const SEARCH_PAGE_SIZE: u32 = 100;
const AGILE_PAGE_SIZE: u32 = 50;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Jira REST client (platform API v2 + agile API 1.0)
pub struct JiraClient {
    http: reqwest::Client,
    base_url: String,
    user: String,
    token: String,
}

impl JiraClient {
    pub fn new(config: &JiraConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        log::info!("🔗 Jira client ready for {}", config.url);

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            user: config.user.clone(),
            token: config.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request authenticated as the service account
    fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .basic_auth(&self.user, Some(&self.token))
            .header("Accept", "application/json")
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = send(self.request(reqwest::Method::GET, path)).await?;
        decode(response).await
    }

    async fn find_board(&self, board_name: &str) -> Result<Board, AppError> {
        let mut start_at = 0;
        let mut candidates = Vec::new();

        loop {
            let page: AgilePage<Board> = self
                .get_json(&format!(
                    "/rest/agile/1.0/board?name={}&startAt={}&maxResults={}",
                    urlencoding::encode(board_name),
                    start_at,
                    AGILE_PAGE_SIZE
                ))
                .await?;

            let fetched = page.values.len() as u32;
            candidates.extend(page.values);
            start_at += fetched;

            if page.is_last || fetched == 0 {
                break;
            }
        }

        // The name filter is a substring match, so prefer an exact hit
        match candidates.iter().position(|b| b.name == board_name) {
            Some(index) => Ok(candidates.swap_remove(index)),
            None => candidates
                .into_iter()
                .next()
                .ok_or_else(|| AppError::tracker(404, format!("Board '{}' does not exist", board_name))),
        }
    }
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn authenticate(&self, username: &str, token: &str) -> Result<UserProfile, AppError> {
        let request = self
            .http
            .get(self.url("/rest/api/2/myself"))
            .basic_auth(username, Some(token))
            .header("Accept", "application/json");

        match send(request).await {
            Ok(response) => decode(response).await,
            Err(AppError::Tracker { status, message }) if status == 401 || status == 403 => {
                Err(AppError::Auth { status, message })
            }
            Err(e) => Err(e),
        }
    }

    async fn search_issues(
        &self,
        jql: &str,
        start_at: u32,
        max_results: Option<u32>,
    ) -> Result<Vec<RawIssue>, AppError> {
        let mut issues = Vec::new();
        let mut next = start_at;

        loop {
            let wanted = match max_results {
                Some(max) => max.saturating_sub(issues.len() as u32).min(SEARCH_PAGE_SIZE),
                None => SEARCH_PAGE_SIZE,
            };
            if wanted == 0 {
                break;
            }

            let body = SearchRequest {
                jql,
                start_at: next,
                max_results: wanted,
                fields: ["*navigable"],
            };
            let response = send(self.request(reqwest::Method::POST, "/rest/api/2/search").json(&body)).await?;
            let page: SearchResponse = decode(response).await?;

            let fetched = page.issues.len() as u32;
            issues.extend(page.issues);
            next += fetched;

            if fetched == 0 || next >= page.total {
                break;
            }
        }

        log::debug!("🔍 JQL [{}] returned {} issues", jql, issues.len());
        Ok(issues)
    }

    async fn get_issue(&self, issue_key: &str) -> Result<RawIssue, AppError> {
        self.get_json(&format!("/rest/api/2/issue/{}", urlencoding::encode(issue_key)))
            .await
    }

    async fn update_issue_field(
        &self,
        issue_key: &str,
        field_id: &str,
        value: Value,
    ) -> Result<(), AppError> {
        let body = json!({ "fields": { field_id: value } });
        let path = format!("/rest/api/2/issue/{}", urlencoding::encode(issue_key));

        send(self.request(reqwest::Method::PUT, &path).json(&body)).await?;
        Ok(())
    }

    async fn list_active_and_future_sprint_names(
        &self,
        board_name: &str,
    ) -> Result<Vec<String>, AppError> {
        let board = self.find_board(board_name).await?;

        let mut names = Vec::new();
        let mut start_at = 0;

        loop {
            let page: AgilePage<SprintSummary> = self
                .get_json(&format!(
                    "/rest/agile/1.0/board/{}/sprint?state=active,future&startAt={}&maxResults={}",
                    board.id, start_at, AGILE_PAGE_SIZE
                ))
                .await?;

            let fetched = page.values.len() as u32;
            names.extend(page.values.into_iter().map(|s| s.name));
            start_at += fetched;

            if page.is_last || fetched == 0 {
                break;
            }
        }

        Ok(names)
    }
}

/// Sends the request and turns any non-2xx answer into a tracker error
/// carrying Jira's status code.
async fn send(request: RequestBuilder) -> Result<Response, AppError> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(AppError::tracker(status.as_u16(), error_message(status, &body)))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    response
        .json()
        .await
        .map_err(|e| AppError::Unknown(format!("Unexpected tracker response: {}", e)))
}

fn error_message(status: StatusCode, body: &str) -> String {
    if let Some(message) = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message())
    {
        return message;
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && !trimmed.starts_with('<') {
        return trimmed.to_string();
    }

    format!(
        "Tracker responded with {}",
        status.canonical_reason().unwrap_or_else(|| status.as_str())
    )
}
