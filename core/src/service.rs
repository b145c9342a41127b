//! Async facade over `FeedbackClient` and a `Transport`.
//!
//! Each operation comes in two forms: `*_response` returns the full
//! `ApiResponse` envelope, the plain form returns only the body.

use crate::client::FeedbackClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::ApiResponse;
use crate::transport::{Transport, UreqTransport};
use crate::types::{FeedbackPage, FeedbackRequest};

#[derive(Debug, Clone)]
pub struct FeedbackService<T> {
    client: FeedbackClient,
    transport: T,
}

impl FeedbackService<UreqTransport> {
    pub fn from_config(config: &ClientConfig) -> Self {
        let mut client = FeedbackClient::new(&config.base_url);
        if let Some(token) = &config.bearer_token {
            client = client.with_bearer_token(token.clone());
        }
        Self::new(client, UreqTransport::new(config.timeout))
    }
}

impl<T: Transport> FeedbackService<T> {
    pub fn new(client: FeedbackClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &FeedbackClient {
        &self.client
    }

    /// Submit feedback and return the envelope around the new feedback id.
    ///
    /// Cancelling this future does not withdraw the submission: once the
    /// transport has sent it the server may still create the feedback.
    pub async fn save_feedback_response(
        &self,
        input: &FeedbackRequest,
    ) -> Result<ApiResponse<i64>> {
        let request = self.client.build_save_feedback(input)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_save_feedback_response(response)
    }

    /// Submit feedback and return the new feedback id.
    pub async fn save_feedback(&self, input: &FeedbackRequest) -> Result<i64> {
        self.save_feedback_response(input)
            .await
            .map(ApiResponse::into_body)
    }

    pub async fn find_all_feedback_by_book_response(
        &self,
        book_id: i64,
        page: Option<u32>,
        size: Option<u32>,
    ) -> Result<ApiResponse<FeedbackPage>> {
        let request = self
            .client
            .build_find_all_feedback_by_book(book_id, page, size);
        let response = self.transport.execute(request).await?;
        self.client.parse_find_all_feedback_by_book_response(response)
    }

    pub async fn find_all_feedback_by_book(
        &self,
        book_id: i64,
        page: Option<u32>,
        size: Option<u32>,
    ) -> Result<FeedbackPage> {
        self.find_all_feedback_by_book_response(book_id, page, size)
            .await
            .map(ApiResponse::into_body)
    }
}
