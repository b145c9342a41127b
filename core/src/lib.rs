//! Async API client core for the book-network feedback endpoints.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A `Transport` executes the
//! round-trip, and `FeedbackService` ties the two together behind async
//! methods.
//!
//! # Design
//! - `FeedbackClient` is stateless: it holds only the base URL and an
//!   optional bearer token.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Every operation has a raw form returning the `ApiResponse` envelope
//!   and a body-only form.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod transport;
pub mod types;

pub use client::{FeedbackClient, FIND_ALL_FEEDBACK_BY_BOOK_PATH, SAVE_FEEDBACK_PATH};
pub use config::ClientConfig;
pub use error::{ApiError, ErrorDetails, Result};
pub use http::{ApiResponse, HttpMethod, HttpRequest, HttpResponse};
pub use service::FeedbackService;
pub use transport::{Transport, UreqTransport};
pub use types::{ErrorResponse, FeedbackPage, FeedbackRequest, FeedbackResponse, PagedResponse};
