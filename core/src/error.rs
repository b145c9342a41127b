//! Error types for the feedback API client.
//!
//! # Design
//! Status-bearing variants follow the backend's failure classes: 404 gets
//! `NotFound`, 401 gets `Unauthorized`, any other 4xx is a rejected payload
//! (`Validation`) and 5xx is `Server`. Each keeps the status and whatever
//! the server said about the failure.

use std::fmt;

use thiserror::Error;

use crate::http::HttpResponse;
use crate::types::ErrorResponse;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by `FeedbackClient` and `FeedbackService`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("resource not found: {details}")]
    NotFound { details: ErrorDetails },

    #[error("unauthorized (HTTP {status}): {details}")]
    Unauthorized { status: u16, details: ErrorDetails },

    /// The server rejected the request payload (4xx other than 401/404).
    #[error("request rejected (HTTP {status}): {details}")]
    Validation { status: u16, details: ErrorDetails },

    #[error("server error (HTTP {status}): {details}")]
    Server { status: u16, details: ErrorDetails },

    /// Informational or redirect status where a body was expected.
    #[error("unexpected HTTP status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The request was refused locally before anything was sent.
    #[error("invalid request: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Classify a non-success response.
    pub fn from_response(response: &HttpResponse) -> Self {
        let status = response.status;
        match status {
            401 => ApiError::Unauthorized {
                status,
                details: ErrorDetails::from_body(&response.body),
            },
            404 => ApiError::NotFound {
                details: ErrorDetails::from_body(&response.body),
            },
            400..=499 => ApiError::Validation {
                status,
                details: ErrorDetails::from_body(&response.body),
            },
            500..=599 => ApiError::Server {
                status,
                details: ErrorDetails::from_body(&response.body),
            },
            _ => ApiError::UnexpectedStatus {
                status,
                body: response.body.clone(),
            },
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Unauthorized { status, .. }
            | ApiError::Validation { status, .. }
            | ApiError::Server { status, .. }
            | ApiError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// What the server said about a failure: the decoded error payload when the
/// body is one, and the raw body either way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorDetails {
    pub response: Option<ErrorResponse>,
    pub raw: String,
}

impl ErrorDetails {
    pub fn from_body(body: &str) -> Self {
        Self {
            response: serde_json::from_str(body).ok(),
            raw: body.to_string(),
        }
    }

    pub fn message(&self) -> Option<String> {
        self.response.as_ref().and_then(ErrorResponse::message)
    }
}

impl fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => f.write_str(&message),
            None if self.raw.is_empty() => f.write_str("<empty body>"),
            None => f.write_str(&self.raw),
        }
    }
}
