//! Error types for fpc-server

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fpc_common::diagnostics::DiagnosticError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Malformed request body or parameter (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Reading rejected by the diagnostic engine (400)
    #[error(transparent)]
    Diagnostic(#[from] DiagnosticError),

    /// fpc-common error
    #[error(transparent)]
    Common(#[from] fpc_common::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

fn diagnostic_parts(err: &DiagnosticError) -> (StatusCode, &'static str) {
    match err {
        DiagnosticError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        DiagnosticError::UnsupportedProcess(_) => (StatusCode::BAD_REQUEST, "UNSUPPORTED_PROCESS"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Diagnostic(err) => diagnostic_parts(err),
            ApiError::Common(fpc_common::Error::Diagnostic(err)) => diagnostic_parts(err),
            ApiError::Common(fpc_common::Error::NotFound(_)) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Common(fpc_common::Error::InvalidInput(_)) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Common(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let message = match &self {
            ApiError::NotFound(msg) | ApiError::BadRequest(msg) => msg.clone(),
            other => other.to_string(),
        };

        if status.is_server_error() {
            error!("Request failed: {}", message);
        }

        let body = Json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = ApiError::from(DiagnosticError::Validation {
            field: "reading.ld.r".to_string(),
            reason: "missing channel".to_string(),
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_wrapped_diagnostic_maps_to_bad_request() {
        let err = ApiError::from(fpc_common::Error::from(DiagnosticError::UnsupportedProcess("e6".into())));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_storage_failure_is_internal() {
        let err = ApiError::from(fpc_common::Error::Config("boom".into()));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
