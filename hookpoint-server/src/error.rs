//! Error handling for the hookpoint server

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use hookpoint::StorageError;
use thiserror::Error;

/// Service error types
///
/// Every variant is terminal for the request it occurred in; nothing is
/// retried. The display string doubles as the response body, so the text of
/// each message is part of the wire contract with registering agents.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Path outside the recognized surface
    #[error("not found")]
    RouteNotFound,

    /// POST with a non-XML declared content type
    #[error("invalid Content-type")]
    UnsupportedMediaType,

    /// Unparseable body or missing required element
    #[error("{0}")]
    MalformedPayload(String),

    /// Version coerced cleanly but is not the supported one
    #[error("version not supported")]
    UnsupportedVersion,

    /// Method outside POST/GET/DELETE on a recognized path
    #[error("method not supported")]
    MethodNotSupported,

    /// Fetch or delete of an absent or unknown identifier
    #[error("not found")]
    ResourceNotFound,

    /// Storage failure; infrastructure, not validation
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ServiceError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::RouteNotFound | ServiceError::ResourceNotFound => StatusCode::NOT_FOUND,
            ServiceError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ServiceError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            ServiceError::UnsupportedVersion | ServiceError::MethodNotSupported => {
                StatusCode::NOT_IMPLEMENTED
            }
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (
            status,
            [(header::CONTENT_TYPE, "text/plain")],
            self.to_string(),
        )
            .into_response()
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
