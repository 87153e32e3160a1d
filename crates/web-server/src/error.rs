use crate::dto::ProblemDetail;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_types::CoreError;
use database::DbError;
use loader::LoaderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] CoreError),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
    #[error("Loader error: {0}")]
    Loader(#[from] LoaderError),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Converts our custom `AppError` into an HTTP problem response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, title, detail) = match self {
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, "Validation Error", e.to_string()),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, "Bad Request", message),
            AppError::Database(e @ DbError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "Not Found", e.to_string())
            }
            AppError::Database(e @ DbError::Duplicate { .. }) => {
                (StatusCode::CONFLICT, "Conflict", e.to_string())
            }
            AppError::Loader(e) => {
                tracing::error!(error = %e, "Loader error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Data Load Error",
                    format!("Failed to reload data: {}", e),
                )
            }
            AppError::Internal(message) => {
                tracing::error!(error = %message, "Internal error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(ProblemDetail::new(title, status.as_u16(), detail));
        (status, body).into_response()
    }
}
