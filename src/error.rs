//! Boundary errors. Every failure is answered as `{ "error": "..." }` with a non-200 status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorOut {
    pub error: String,
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Malformed body, or content that does not match the declared submission type.
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(detail) => {
                tracing::error!(target: "qa_arena", %detail, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "An unexpected error occurred".into())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_message();
        (status, Json(ErrorOut { error })).into_response()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("Invalid submission content: {err}"))
    }
}
