//! API error handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use lexref_core::error::LexrefError;

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: String,
    upstream_status: Option<u16>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(status: StatusCode, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: code.into(),
            upstream_status: None,
        }
    }

    /// Bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, "BAD_REQUEST")
    }

    /// Upstream answered with an error.
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message, "UPSTREAM_ERROR")
    }

    /// Upstream could not be reached.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message, "SERVICE_UNAVAILABLE")
    }

    /// Internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, "INTERNAL_ERROR")
    }

    /// HTTP status this error renders with.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn with_upstream_status(mut self, status: Option<u16>) -> Self {
        self.upstream_status = status;
        self
    }
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    upstream_status: Option<u16>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
                upstream_status: self.upstream_status,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<LexrefError> for ApiError {
    fn from(err: LexrefError) -> Self {
        if err.is_client_error() {
            tracing::debug!(kind = err.kind(), error = %err, "Rejected request");
        } else if err.is_upstream_failure() {
            tracing::warn!(kind = err.kind(), error = %err, "Upstream failure surfaced to client");
        }

        match &err {
            LexrefError::UnknownEndpoint(_) => {
                ApiError::new(StatusCode::BAD_REQUEST, err.to_string(), "UNKNOWN_ENDPOINT")
            }
            LexrefError::InvalidRegistration(_) => ApiError::bad_request(err.to_string()),
            LexrefError::UpstreamError { status, .. } => {
                let status = *status;
                ApiError::bad_gateway(err.to_string()).with_upstream_status(status)
            }
            LexrefError::TransportFailure { .. } => ApiError::service_unavailable(err.to_string()),
            _ => {
                tracing::error!(error = %err, "Internal error");
                ApiError::internal("An internal error occurred")
            }
        }
    }
}
