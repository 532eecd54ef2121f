//! Error types for the collection managers and the HTTP layer.
//!
//! [`CollectionError`] is what the managers return. [`ApiError`] is what
//! handlers return; its [`IntoResponse`] impl renders the failure envelope
//! with the matching HTTP status.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use todo_proto::envelope::{Envelope, ResponseCode};

/// Errors returned by the task and label managers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    /// A required field was missing or blank.
    #[error("{0}")]
    Validation(&'static str),
    /// No record exists with the given id.
    #[error("{kind} not found")]
    NotFound {
        /// Entity name (`"Task"`, `"Label"`).
        kind: &'static str,
        /// Requested identifier.
        id: u32,
    },
    /// The last record holds the largest identifier, so none can follow it.
    #[error("{kind} identifiers exhausted")]
    IdsExhausted {
        /// Entity name (`"Task"`, `"Label"`).
        kind: &'static str,
    },
}

/// Returns the field value if it contains a non-whitespace character.
///
/// # Errors
///
/// Returns [`CollectionError::Validation`] with `message` when the value is
/// absent or blank.
pub fn required_text(
    value: Option<String>,
    message: &'static str,
) -> Result<String, CollectionError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(CollectionError::Validation(message)),
    }
}

/// Failure outcome of an HTTP handler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The `Authorization` header was missing or not accepted by the guard.
    #[error("Invalid token")]
    InvalidToken,
    /// Login credentials did not match.
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// Missing/blank field, malformed body, or malformed path id.
    #[error("{0}")]
    Validation(String),
    /// No record with the requested id, or no route for the path.
    #[error("{0}")]
    NotFound(String),
    /// The path exists but not for this HTTP method.
    #[error("Method not allowed")]
    MethodNotAllowed,
    /// The request was valid but could not be carried out.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidToken | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Application code placed in the envelope.
    #[must_use]
    pub const fn code(&self) -> ResponseCode {
        match self {
            Self::InvalidToken | Self::InvalidCredentials => ResponseCode::Unauthorized,
            Self::Validation(_) | Self::MethodNotAllowed => ResponseCode::ValidationError,
            Self::NotFound(_) => ResponseCode::NotFound,
            Self::Internal(_) => ResponseCode::ServerError,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let envelope: Envelope<()> = Envelope::failure(self.code(), self.to_string());
        (self.status(), Json(envelope)).into_response()
    }
}

impl From<CollectionError> for ApiError {
    fn from(error: CollectionError) -> Self {
        match error {
            CollectionError::Validation(message) => Self::Validation(message.to_string()),
            not_found @ CollectionError::NotFound { .. } => Self::NotFound(not_found.to_string()),
            exhausted @ CollectionError::IdsExhausted { .. } => {
                Self::Internal(exhausted.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}
