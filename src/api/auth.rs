use actix_web::{web, HttpResponse};
use crate::services::auth_service::{self, SignInRequest};
use crate::state::AppState;
use crate::utils::AppError;

#[utoipa::path(
    post,
    path = "/api/auth/SignIn",
    tag = "Auth",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Credentials accepted by Jira", body = crate::models::User),
        (status = 400, description = "Missing or malformed credentials", body = crate::utils::ErrorResponse),
        (status = 401, description = "Jira rejected the credentials", body = crate::utils::ErrorResponse)
    )
)]
pub async fn sign_in(
    state: web::Data<AppState>,
    request: web::Json<SignInRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔐 POST /auth/SignIn - user: {}", request.jira_user);

    let user = auth_service::sign_in(state.tracker.as_ref(), &request).await?;

    log::info!("✅ Signed in: {}", user.user_name);
    Ok(HttpResponse::Ok().json(user))
}
