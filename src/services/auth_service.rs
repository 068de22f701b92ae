use serde::Deserialize;
use crate::jira::{IssueTracker, UserProfile};
use crate::models::User;
use crate::utils::AppError;

const AVATAR_SIZE: &str = "48x48";

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub jira_user: String,
    pub jira_token: String,
}

/// Checks the credentials against Jira and returns the caller's profile
pub async fn sign_in(tracker: &dyn IssueTracker, request: &SignInRequest) -> Result<User, AppError> {
    if request.jira_user.trim().is_empty() || request.jira_token.is_empty() {
        return Err(AppError::Validation("jiraUser and jiraToken are required".into()));
    }

    let profile = tracker.authenticate(&request.jira_user, &request.jira_token).await?;
    user_from_profile(profile)
}

/// Jira Cloud no longer reports `key`/`name`, Server may lack `accountId`;
/// fall back across them so both flavours produce a usable user.
fn user_from_profile(profile: UserProfile) -> Result<User, AppError> {
    let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    let user_name = non_empty(profile.key)
        .or_else(|| non_empty(profile.name))
        .or_else(|| non_empty(profile.display_name))
        .or_else(|| non_empty(profile.account_id.clone()))
        .ok_or_else(|| AppError::tracker(502, "Tracker profile has no user name"))?;

    let account_id = non_empty(profile.account_id).unwrap_or_else(|| user_name.clone());

    Ok(User {
        account_id,
        user_name,
        avatar_url: profile
            .avatar_urls
            .get(AVATAR_SIZE)
            .cloned()
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::FakeTracker;
    use std::collections::HashMap;

    fn profile(account_id: Option<&str>, key: Option<&str>) -> UserProfile {
        UserProfile {
            account_id: account_id.map(str::to_string),
            key: key.map(str::to_string),
            name: None,
            display_name: Some("Alice Liddell".into()),
            avatar_urls: HashMap::from([("48x48".to_string(), "https://avatar/48.png".to_string())]),
        }
    }

    #[tokio::test]
    async fn test_sign_in_maps_profile() {
        let tracker = FakeTracker::default().with_user("alice", "token", profile(Some("acc-1"), Some("alice")));
        let request = SignInRequest { jira_user: "alice".into(), jira_token: "token".into() };

        let user = sign_in(&tracker, &request).await.unwrap();
        assert_eq!(
            user,
            User {
                account_id: "acc-1".into(),
                user_name: "alice".into(),
                avatar_url: "https://avatar/48.png".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_rejected_credentials() {
        let tracker = FakeTracker::default();
        let request = SignInRequest { jira_user: "alice".into(), jira_token: "bad".into() };

        let err = sign_in(&tracker, &request).await.unwrap_err();
        assert!(matches!(err, AppError::Auth { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_blank_credentials_never_reach_tracker() {
        let tracker = FakeTracker::default();
        let request = SignInRequest { jira_user: " ".into(), jira_token: "".into() };

        let err = sign_in(&tracker, &request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_profile_fallbacks() {
        let cloud = user_from_profile(profile(Some("acc-9"), None)).unwrap();
        assert_eq!(cloud.user_name, "Alice Liddell");
        assert_eq!(cloud.account_id, "acc-9");

        let server = user_from_profile(profile(None, Some("alice"))).unwrap();
        assert_eq!(server.account_id, "alice");

        let mut bare = UserProfile::default();
        bare.display_name = Some("".into());
        assert!(matches!(user_from_profile(bare), Err(AppError::Tracker { status: 502, .. })));
    }

    #[test]
    fn test_missing_avatar_is_empty_string() {
        let mut p = profile(Some("acc-1"), Some("alice"));
        p.avatar_urls.clear();
        assert_eq!(user_from_profile(p).unwrap().avatar_url, "");
    }
}
