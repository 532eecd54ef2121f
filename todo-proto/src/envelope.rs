//! Uniform response wrapper returned by every endpoint.
//!
//! The `code` field is an application-level status, independent of the HTTP
//! status line. Clients branch on it rather than on the payload shape.

use serde::{Deserialize, Serialize};

/// Application status carried in [`Envelope::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseCode {
    /// The operation succeeded.
    #[serde(rename = "0000")]
    Ok,
    /// The bearer token or login credentials were rejected.
    #[serde(rename = "0001")]
    Unauthorized,
    /// A required field was missing or blank, or the request was malformed.
    #[serde(rename = "0002")]
    ValidationError,
    /// No record exists with the requested identifier, or no route matched.
    #[serde(rename = "0003")]
    NotFound,
    /// The server could not complete an otherwise valid request.
    #[serde(rename = "0004")]
    ServerError,
}

impl ResponseCode {
    /// Returns the four-character wire form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "0000",
            Self::Unauthorized => "0001",
            Self::ValidationError => "0002",
            Self::NotFound => "0003",
            Self::ServerError => "0004",
        }
    }
}

impl std::fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response body: `{ "code", "response", "errorMessage" }`.
///
/// `response` is always present (possibly `null`); `errorMessage` is
/// omitted on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    /// Application status.
    pub code: ResponseCode,
    /// Operation result, `None` on failure.
    pub response: Option<T>,
    /// Human-readable failure reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl<T> Envelope<T> {
    /// Wraps a successful result.
    pub const fn ok(payload: T) -> Self {
        Self {
            code: ResponseCode::Ok,
            response: Some(payload),
            error_message: None,
        }
    }

    /// Builds a failure envelope with no payload.
    pub fn failure(code: ResponseCode, message: impl Into<String>) -> Self {
        Self {
            code,
            response: None,
            error_message: Some(message.into()),
        }
    }
}
