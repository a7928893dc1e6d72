use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::flows::schema::ContractError;
use crate::flows::GenerationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Invalid file: {0}")]
    InvalidFile(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Carries the underlying model or contract message verbatim.
    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Nothing to download")]
    NothingToDownload,

    #[error("A submission is already in flight")]
    Busy,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ContractError> for AppError {
    fn from(err: ContractError) -> Self {
        match err {
            ContractError::Missing(_) => AppError::MissingInput(err.to_string()),
            ContractError::InvalidDocument(_) | ContractError::DocumentTooLarge { .. } => {
                AppError::InvalidFile(err.to_string())
            }
            ContractError::AmbiguousResume => AppError::Validation(err.to_string()),
        }
    }
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::InvalidRequest(contract) => contract.into(),
            other => AppError::Generation(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::MissingInput(msg) => (StatusCode::BAD_REQUEST, "MISSING_INPUT", msg.clone()),
            AppError::InvalidFile(msg) => (StatusCode::BAD_REQUEST, "INVALID_FILE", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Generation(msg) => {
                tracing::error!("Generation error: {msg}");
                (StatusCode::BAD_GATEWAY, "GENERATION_ERROR", msg.clone())
            }
            AppError::NothingToDownload => (
                StatusCode::BAD_REQUEST,
                "NOTHING_TO_DOWNLOAD",
                "Content is empty.".to_string(),
            ),
            AppError::Busy => (
                StatusCode::CONFLICT,
                "SUBMISSION_IN_FLIGHT",
                "A submission is already being processed".to_string(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::schema::ByteSize;

    #[test]
    fn test_missing_contract_field_maps_to_missing_input() {
        let err: AppError = ContractError::Missing("jobDescription").into();
        assert!(matches!(err, AppError::MissingInput(_)));
    }

    #[test]
    fn test_oversized_document_maps_to_invalid_file() {
        let err: AppError = ContractError::DocumentTooLarge {
            limit: ByteSize(2 * 1024 * 1024),
        }
        .into();
        match err {
            AppError::InvalidFile(msg) => {
                assert_eq!(msg, "File is too large. Maximum size is 2MB.")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_generation_error_keeps_message() {
        let err: AppError = GenerationError::InvalidOutput("tailoredResume is empty".into()).into();
        match err {
            AppError::Generation(msg) => assert!(msg.contains("tailoredResume is empty")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::InvalidFile("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Generation("x".into()).into_response().status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(AppError::Busy.into_response().status(), StatusCode::CONFLICT);
    }
}
