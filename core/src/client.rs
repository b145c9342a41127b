//! Stateless HTTP request builder and response parser for the feedback API.
//!
//! # Design
//! `FeedbackClient` holds only a base URL and an optional bearer token and
//! carries no mutable state between calls. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a pair of parsers that
//! consume the `HttpResponse`: `parse_*_response` keeps the envelope,
//! `parse_*` returns only the body.

use serde::de::DeserializeOwned;

use crate::error::{ApiError, Result};
use crate::http::{ApiResponse, HttpMethod, HttpRequest, HttpResponse};
use crate::types::{FeedbackPage, FeedbackRequest};

/// Path of the feedback submission endpoint.
pub const SAVE_FEEDBACK_PATH: &str = "/feedbacks";

/// Path template of the per-book feedback listing endpoint.
pub const FIND_ALL_FEEDBACK_BY_BOOK_PATH: &str = "/feedbacks/book/{book-id}";

const JSON: &str = "application/json";

/// Synchronous, stateless client for the feedback API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct FeedbackClient {
    base_url: String,
    bearer_token: Option<String>,
}

impl FeedbackClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token: None,
        }
    }

    /// Attach `authorization: Bearer <token>` to every built request.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fails with `InvalidInput` for a non-finite `note`, which JSON cannot
    /// carry.
    pub fn build_save_feedback(&self, input: &FeedbackRequest) -> Result<HttpRequest> {
        if !input.note.is_finite() {
            return Err(ApiError::InvalidInput(format!(
                "note must be a finite number, got {}",
                input.note
            )));
        }
        let body = serde_json::to_string(input).map_err(ApiError::Serialization)?;
        let request = HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}{SAVE_FEEDBACK_PATH}", self.base_url),
            headers: self.headers(true),
            body: Some(body),
        };
        tracing::debug!(url = %request.url, book_id = input.book_id, "built save_feedback request");
        Ok(request)
    }

    /// `page` and `size` are sent only when given; the server defaults them.
    pub fn build_find_all_feedback_by_book(
        &self,
        book_id: i64,
        page: Option<u32>,
        size: Option<u32>,
    ) -> HttpRequest {
        let path = FIND_ALL_FEEDBACK_BY_BOOK_PATH.replace("{book-id}", &book_id.to_string());
        let query: Vec<String> = [("page", page), ("size", size)]
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| format!("{name}={v}")))
            .collect();
        let mut url = format!("{}{path}", self.base_url);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.join("&"));
        }
        tracing::debug!(%url, book_id, "built find_all_feedback_by_book request");
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: self.headers(false),
            body: None,
        }
    }

    pub fn parse_save_feedback_response(&self, response: HttpResponse) -> Result<ApiResponse<i64>> {
        decode(response)
    }

    pub fn parse_save_feedback(&self, response: HttpResponse) -> Result<i64> {
        self.parse_save_feedback_response(response)
            .map(ApiResponse::into_body)
    }

    pub fn parse_find_all_feedback_by_book_response(
        &self,
        response: HttpResponse,
    ) -> Result<ApiResponse<FeedbackPage>> {
        decode(response)
    }

    pub fn parse_find_all_feedback_by_book(&self, response: HttpResponse) -> Result<FeedbackPage> {
        self.parse_find_all_feedback_by_book_response(response)
            .map(ApiResponse::into_body)
    }

    fn headers(&self, with_body: bool) -> Vec<(String, String)> {
        let mut headers = vec![("accept".to_string(), JSON.to_string())];
        if with_body {
            headers.push(("content-type".to_string(), JSON.to_string()));
        }
        if let Some(token) = &self.bearer_token {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }
        headers
    }
}

/// Map non-2xx statuses to `ApiError`, otherwise decode the JSON body into
/// the envelope.
fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<ApiResponse<T>> {
    if !(200..300).contains(&response.status) {
        let err = ApiError::from_response(&response);
        tracing::warn!(status = response.status, error = %err, "request failed");
        return Err(err);
    }
    let body = serde_json::from_str(&response.body).map_err(ApiError::Deserialization)?;
    Ok(ApiResponse {
        status: response.status,
        headers: response.headers,
        body,
    })
}
