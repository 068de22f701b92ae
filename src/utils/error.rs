use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Every failure a request can end with. Adapters and services return these,
/// the HTTP boundary turns them into a status code plus `{"error": ...}`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Framework-level failure such as an unknown route
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("{0}")]
    Validation(String),

    /// Tracker rejected the user's credentials
    #[error("{message}")]
    Auth { status: u16, message: String },

    /// Any other tracker-reported failure
    #[error("{message}")]
    Tracker { status: u16, message: String },

    #[error("Database error: {0}")]
    Store(String),

    #[error("{0}")]
    Unknown(String),
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    pub fn tracker(status: u16, message: impl Into<String>) -> Self {
        AppError::Tracker {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::Http {
            status: 404,
            message: message.into(),
        }
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        AppError::Http {
            status: 405,
            message: message.into(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Http { status, .. }
            | AppError::Auth { status, .. }
            | AppError::Tracker { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) | AppError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        log::error!("❌ {} ({})", self, status.as_u16());

        HttpResponse::build(status).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::Store(e.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(e: mongodb::bson::ser::Error) -> Self {
        AppError::Store(e.to_string())
    }
}

impl From<mongodb::bson::document::ValueAccessError> for AppError {
    fn from(e: mongodb::bson::document::ValueAccessError) -> Self {
        AppError::Store(e.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => AppError::tracker(status.as_u16(), e.to_string()),
            None => AppError::Unknown(format!("Tracker request failed: {}", e)),
        }
    }
}

/// Routes body extraction failures (missing fields, wrong types, bad JSON)
/// into the uniform error shape instead of actix's plain-text 400.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    AppError::Validation(err.to_string()).into()
}
