pub mod auth;
pub mod estimations;
pub mod health;
pub mod issues;
pub mod swagger;

use actix_web::{web, HttpRequest, HttpResponse};
use crate::utils::{json_error_handler, AppError};

/// Route table shared by the server and the route tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/auth")
                .route("/SignIn", web::post().to(auth::sign_in))
        )
        .service(
            web::scope("/api/issue")
                .service(
                    web::resource("/story-point")
                        .route(web::put().to(issues::update_story_point))
                        .default_service(web::to(method_not_allowed)),
                )
                .service(
                    web::resource("/estimation-result")
                        .route(web::post().to(estimations::submit_estimation))
                        .default_service(web::to(method_not_allowed)),
                )
                .service(
                    web::resource("/{board_name}/active-and-future-sprints")
                        .route(web::get().to(issues::get_active_and_future_sprints))
                        .default_service(web::to(method_not_allowed)),
                )
                .service(
                    web::resource("/{issue_key}/estimation-results")
                        .route(web::get().to(estimations::get_estimation_results))
                        .default_service(web::to(method_not_allowed)),
                )
        );
}

/// Known resource, unsupported method
pub async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::method_not_allowed(format!("Method {} not allowed on {}", req.method(), req.path())))
}

pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::not_found(format!("No route for {} {}", req.method(), req.path())))
}
