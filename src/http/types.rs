use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody { pub message: String }

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("todo not found")]
    NotFound,
    /// The request body could not be turned into a todo. Carries the status
    /// axum chose for the rejection (400, 415 or 422).
    #[error("{1}")]
    Rejected(StatusCode, String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self { Self::Rejected(rejection.status(), rejection.body_text()) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Rejected(status, message) => {
                tracing::debug!(%status, %message, "rejected request body");
                *status
            }
            Self::Internal(err) => {
                tracing::error!(error = ?err, "storage failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, axum::Json(ErrorBody { message: self.to_string() })).into_response()
    }
}
