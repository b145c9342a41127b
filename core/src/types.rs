//! Domain DTOs for the feedback API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! the integration tests catch schema drift between the two crates. Field
//! names follow the backend's camelCase JSON.

use serde::{Deserialize, Serialize};

/// Request payload for submitting feedback on a book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    /// Rating between 0 and 5.
    pub note: f64,
    pub comment: String,
    pub book_id: i64,
}

/// A single feedback entry as returned by the listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub note: f64,
    pub comment: String,
    /// True when the authenticated caller wrote this entry.
    #[serde(default)]
    pub own_feedback: bool,
}

/// One page of a paginated collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    pub content: Vec<T>,
    /// Zero-based page index.
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub first: bool,
    pub last: bool,
}

impl<T> PagedResponse<T> {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Page of feedback for a single book.
pub type FeedbackPage = PagedResponse<FeedbackResponse>;

/// Error payload returned by the backend on 4xx/5xx. Every field is optional
/// because not every failure carries every detail.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_error_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_error_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validation_errors: Vec<String>,
}

impl ErrorResponse {
    /// Best human-readable summary of the payload, if it has one.
    pub fn message(&self) -> Option<String> {
        if let Some(error) = &self.error {
            return Some(error.clone());
        }
        if !self.validation_errors.is_empty() {
            return Some(self.validation_errors.join("; "));
        }
        self.business_error_description.clone()
    }
}
