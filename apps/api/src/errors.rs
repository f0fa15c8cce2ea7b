use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::application::envelope::{ResultEnvelope, SUBMISSION_FAILED_MESSAGE};
use crate::application::validation::ValidationError;
use crate::harvest::SubmissionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`;
/// every variant renders as a `ResultEnvelope`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<ValidationError>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Submission error: {0}")]
    Submission(#[from] SubmissionError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, envelope) = match self {
            AppError::Validation(errors) => {
                tracing::info!(count = errors.len(), "Application failed validation");
                (StatusCode::BAD_REQUEST, ResultEnvelope::invalid(errors))
            }
            AppError::BadRequest(msg) => {
                tracing::warn!("Bad request: {msg}");
                (StatusCode::BAD_REQUEST, ResultEnvelope::failed(msg, None))
            }
            AppError::Submission(e) => {
                tracing::error!("Error submitting application: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ResultEnvelope::failed(SUBMISSION_FAILED_MESSAGE, Some(e.to_string())),
                )
            }
        };

        (status, Json(envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation(vec![]).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::BadRequest("no form".to_string())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Submission(SubmissionError::Rejected {
                status: 422,
                body: String::new()
            })
            .into_response()
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
