use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed request: {0}")]
    Malformed(String),

    #[error("Post {0} not found")]
    PostNotFound(i64),

    #[error("Application state unavailable")]
    StatePoisoned,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Malformed(_) => StatusCode::BAD_REQUEST,
            AppError::PostNotFound(_) => StatusCode::NOT_FOUND,
            AppError::StatePoisoned => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (status, self.to_string()).into_response()
    }
}

impl From<crate::types::UnknownVoteType> for AppError {
    fn from(err: crate::types::UnknownVoteType) -> Self {
        AppError::Malformed(err.to_string())
    }
}
