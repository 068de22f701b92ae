use actix_web::{web, HttpResponse};
use crate::models::EstimationRecord;
use crate::services::estimation_service;
use crate::state::AppState;
use crate::utils::AppError;

/// POST /api/issue/estimation-result - one vote per user and issue.
///
/// Body: `{issueKey, userName, estimatedStoryPoint, ...}`; extra attributes are stored as submitted.
#[utoipa::path(
    post,
    path = "/api/issue/estimation-result",
    tag = "Estimations",
    request_body = EstimationRecord,
    responses(
        (status = 200, description = "Vote stored", body = String, content_type = "text/plain"),
        (status = 400, description = "Malformed vote", body = crate::utils::ErrorResponse)
    )
)]
pub async fn submit_estimation(
    state: web::Data<AppState>,
    record: web::Json<EstimationRecord>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗳️  POST /issue/estimation-result - {} by {}", record.issue_key, record.user_name);

    estimation_service::submit_estimation(state.store.as_ref(), &record).await?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("OK"))
}

/// GET /api/issue/{issueKey}/estimation-results
#[utoipa::path(
    get,
    path = "/api/issue/{issueKey}/estimation-results",
    tag = "Estimations",
    params(
        ("issueKey" = String, Path, description = "Jira issue key")
    ),
    responses(
        (status = 200, description = "Every vote on the issue, without internal ids", body = Vec<EstimationRecord>)
    )
)]
pub async fn get_estimation_results(
    state: web::Data<AppState>,
    issue_key: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("📊 GET /issue/{}/estimation-results", issue_key);

    let records = estimation_service::estimations_for_issue(state.store.as_ref(), &issue_key).await?;

    Ok(HttpResponse::Ok().json(records))
}
