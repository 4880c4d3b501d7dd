//! Error handling module for the roster backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and response envelopes.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::query::QueryError;
use crate::roster::ReassignError;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const MEMBER_NOT_FOUND: &str = "MEMBER_NOT_FOUND";
    pub const PROJECT_NOT_FOUND: &str = "PROJECT_NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Message returned for every internal failure; details stay in the logs.
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Application error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Unknown member id
    MemberNotFound(u32),
    /// Unknown project id
    ProjectNotFound(u32),
    /// Malformed client input
    Validation(String),
    /// Unexpected failure; the payload is logged, never returned
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MemberNotFound(_) | AppError::ProjectNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::MemberNotFound(_) => codes::MEMBER_NOT_FOUND,
            AppError::ProjectNotFound(_) => codes::PROJECT_NOT_FOUND,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
        }
    }

    /// Get the client-facing error message.
    pub fn message(&self) -> String {
        match self {
            AppError::MemberNotFound(id) => format!("Member {} not found", id),
            AppError::ProjectNotFound(id) => format!("Project {} not found", id),
            AppError::Validation(msg) => msg.clone(),
            AppError::Internal(_) => INTERNAL_MESSAGE.to_string(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Internal(detail) => write!(f, "{}: {}", self.error_code(), detail),
            _ => write!(f, "{}: {}", self.error_code(), self.message()),
        }
    }
}

impl std::error::Error for AppError {}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        tracing::debug!("Rejected query: {}", err);
        AppError::Validation(err.to_string())
    }
}

impl From<ReassignError> for AppError {
    fn from(err: ReassignError) -> Self {
        match err {
            ReassignError::MemberNotFound(id) => AppError::MemberNotFound(id),
            ReassignError::ProjectNotFound(id) => AppError::ProjectNotFound(id),
        }
    }
}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
    pub revision_id: i64,
}

impl ErrorResponse {
    pub fn new(error: &AppError, revision_id: i64) -> Self {
        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
            },
            revision_id,
        }
    }
}

/// Wrapper type for errors that carry revision_id context.
pub struct AppErrorWithRevision {
    pub error: AppError,
    pub revision_id: i64,
}

impl IntoResponse for AppErrorWithRevision {
    fn into_response(self) -> Response {
        if let AppError::Internal(detail) = &self.error {
            tracing::error!("Internal error: {}", detail);
        }
        let status = self.error.status_code();
        let body = ErrorResponse::new(&self.error, self.revision_id);
        (status, Json(body)).into_response()
    }
}

/// Turn a handler panic into an opaque 500 envelope.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>, revision_id: i64) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppErrorWithRevision {
        error: AppError::Internal(format!("handler panicked: {}", detail)),
        revision_id,
    }
    .into_response()
}
