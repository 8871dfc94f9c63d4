use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;

use crate::state::RoundInProgress;

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A round is already running; a new one cannot start until it finishes.
    #[error("round in progress")]
    RoundInProgress(#[from] RoundInProgress),
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Conflict with current state; the caller should retry later.
    #[error("{0}")]
    Busy(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::RoundInProgress(_) => AppError::Busy("Round in progress".into()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::Busy(_) => StatusCode::CONFLICT,
        };

        let payload = Json(ErrorBody {
            status: "busy",
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}
