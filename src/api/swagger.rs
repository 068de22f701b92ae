use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Estimation Service API",
        version = "0.1.0",
        description = "Backend for sprint story-point estimation.\n\n**Features:**\n- Sign in with Jira credentials\n- Active and future sprints of a board with their estimable issues\n- Write agreed story points back to Jira\n- Store and list per-user estimation votes"
    ),
    paths(
        crate::api::auth::sign_in,
        crate::api::issues::get_active_and_future_sprints,
        crate::api::issues::update_story_point,
        crate::api::estimations::submit_estimation,
        crate::api::estimations::get_estimation_results,
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::services::auth_service::SignInRequest,
            crate::services::issue_service::StoryPointRequest,
            crate::models::User,
            crate::models::Issue,
            crate::models::Sprint,
            crate::models::EstimationRecord,
            crate::utils::ErrorResponse,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Jira sign-in."),
        (name = "Issues", description = "Sprints, issues and story points, backed by Jira."),
        (name = "Estimations", description = "Per-user estimation votes stored in MongoDB."),
        (name = "Health", description = "Service health."),
    )
)]
pub struct ApiDoc;
