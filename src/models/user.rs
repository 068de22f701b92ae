use serde::{Deserialize, Serialize};

/// Signed-in tracker user, built from the Jira profile and never stored
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub account_id: String,
    pub user_name: String,
    pub avatar_url: String,
}
