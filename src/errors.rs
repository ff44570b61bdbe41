use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    /// Client input problem, carrying a short machine-readable reason.
    #[error("Bad request: {0}")]
    BadRequest(&'static str),

    #[error("Not found")]
    NotFound,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound => AppError::NotFound,
            DomainError::Unauthorized => AppError::Unauthorized,
            DomainError::MissingItems
            | DomainError::InvalidInput(_)
            | DomainError::InvalidTransition { .. } => AppError::BadRequest(e.reason()),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::BadRequest(reason) => serde_json::json!({ "error": reason }),
            AppError::NotFound => serde_json::json!({ "error": "NotFound" }),
            AppError::Unauthorized => serde_json::json!({ "error": "Unauthorized" }),
            AppError::Internal(detail) => {
                log::error!("Request failed: {}", detail);
                serde_json::json!({ "error": "Internal server error" })
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
