use actix_web::{web, HttpResponse};
use crate::services::issue_service::{self, StoryPointRequest};
use crate::state::AppState;
use crate::utils::AppError;

/// GET /api/issue/{boardName}/active-and-future-sprints
#[utoipa::path(
    get,
    path = "/api/issue/{boardName}/active-and-future-sprints",
    tag = "Issues",
    params(
        ("boardName" = String, Path, description = "Jira board name")
    ),
    responses(
        (status = 200, description = "Sprints with their estimable issues", body = Vec<crate::models::Sprint>),
        (status = 404, description = "Unknown board", body = crate::utils::ErrorResponse)
    )
)]
pub async fn get_active_and_future_sprints(
    state: web::Data<AppState>,
    board_name: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /issue/{}/active-and-future-sprints", board_name);

    let sprints = issue_service::active_and_future_sprints(
        state.tracker.as_ref(),
        &state.config.jira,
        &board_name,
    )
    .await?;

    log::info!("✅ {} sprints for board {}", sprints.len(), board_name);
    Ok(HttpResponse::Ok().json(sprints))
}

/// PUT /api/issue/story-point
#[utoipa::path(
    put,
    path = "/api/issue/story-point",
    tag = "Issues",
    request_body = StoryPointRequest,
    responses(
        (status = 200, description = "Story point written to Jira", body = String, content_type = "text/plain"),
        (status = 404, description = "Unknown issue", body = crate::utils::ErrorResponse)
    )
)]
pub async fn update_story_point(
    state: web::Data<AppState>,
    request: web::Json<StoryPointRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("✏️  PUT /issue/story-point - {} = {}", request.issue_key, request.story_point);

    issue_service::update_story_point(state.tracker.as_ref(), &state.config.jira, &request).await?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Update story point successfully"))
}
