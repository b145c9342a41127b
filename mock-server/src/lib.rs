use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// Prefix every route is mounted under, matching the real service's
/// context path.
pub const API_PREFIX: &str = "/api/v1";

const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub shareable: bool,
    pub archived: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub note: f64,
    pub comment: String,
    pub book_id: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub note: f64,
    pub comment: String,
    pub own_feedback: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub first: bool,
    pub last: bool,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_errors: Vec<String>,
}

#[derive(Clone, Debug)]
struct Feedback {
    book_id: i64,
    note: f64,
    comment: String,
    created_by: i64,
}

#[derive(Debug, Default)]
pub struct Store {
    books: HashMap<i64, Book>,
    feedbacks: Vec<Feedback>,
    last_id: i64,
}

impl Store {
    pub fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
        Self {
            books: books.into_iter().map(|b| (b.id, b)).collect(),
            ..Self::default()
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

/// A handful of books for running the binary by hand.
pub fn demo_books() -> Vec<Book> {
    vec![
        Book {
            id: 1,
            owner_id: 1,
            title: "The Rust Programming Language".to_string(),
            shareable: true,
            archived: false,
        },
        Book {
            id: 2,
            owner_id: 2,
            title: "Programming Rust".to_string(),
            shareable: true,
            archived: false,
        },
        Book {
            id: 3,
            owner_id: 2,
            title: "Rust in Action".to_string(),
            shareable: false,
            archived: true,
        },
    ]
}

pub fn app(books: impl IntoIterator<Item = Book>) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::with_books(books)));
    let api = Router::new()
        .route("/feedbacks", post(save_feedback))
        .route("/feedbacks/book/{book_id}", get(find_all_feedback_by_book))
        .with_state(db);
    Router::new().nest(API_PREFIX, api)
}

pub async fn run(listener: TcpListener, books: Vec<Book>) -> Result<(), std::io::Error> {
    axum::serve(listener, app(books)).await
}

/// A failed request: status plus the JSON error payload.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    body: ExceptionResponse,
}

impl ApiFailure {
    fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ExceptionResponse {
                error: Some(error.into()),
                validation_errors: Vec::new(),
            },
        }
    }

    fn invalid(validation_errors: Vec<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ExceptionResponse {
                error: None,
                validation_errors,
            },
        }
    }

    fn book_not_found(book_id: i64) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("Book not found with id: {book_id}"),
        )
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        tracing::info!(status = %self.status, error = ?self.body.error, "request rejected");
        (self.status, Json(self.body)).into_response()
    }
}

/// The caller's user id, taken from `Authorization: Bearer <user-id>`.
fn connected_user(headers: &HeaderMap) -> Result<i64, ApiFailure> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(|token| token.trim().parse().ok())
        .ok_or_else(|| ApiFailure::new(StatusCode::UNAUTHORIZED, "Authentication required"))
}

fn validate(input: &FeedbackRequest) -> Result<(), ApiFailure> {
    let mut errors = Vec::new();
    if !(0.0..=5.0).contains(&input.note) {
        errors.push("note must be between 0 and 5".to_string());
    }
    if input.comment.trim().is_empty() {
        errors.push("comment must not be blank".to_string());
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiFailure::invalid(errors))
    }
}

async fn save_feedback(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<FeedbackRequest>,
) -> Result<Json<i64>, ApiFailure> {
    let user_id = connected_user(&headers)?;
    validate(&input)?;

    let mut store = db.write().await;
    let book = store
        .books
        .get(&input.book_id)
        .ok_or_else(|| ApiFailure::book_not_found(input.book_id))?;
    if !book.shareable || book.archived {
        return Err(ApiFailure::new(
            StatusCode::FORBIDDEN,
            "You cannot give a feedback for an archived or unshareable book",
        ));
    }
    if book.owner_id == user_id {
        return Err(ApiFailure::new(
            StatusCode::FORBIDDEN,
            "You cannot give a feedback for your own book",
        ));
    }

    store.last_id += 1;
    let id = store.last_id;
    store.feedbacks.push(Feedback {
        book_id: input.book_id,
        note: input.note,
        comment: input.comment,
        created_by: user_id,
    });
    tracing::info!(feedback_id = id, book_id = input.book_id, user_id, "feedback saved");
    Ok(Json(id))
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub size: u32,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

async fn find_all_feedback_by_book(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(book_id): Path<i64>,
    Query(params): Query<PageParams>,
) -> Result<Json<PagedResponse<FeedbackResponse>>, ApiFailure> {
    let user_id = connected_user(&headers)?;
    if params.size == 0 {
        return Err(ApiFailure::invalid(vec![
            "size must be at least 1".to_string(),
        ]));
    }

    let store = db.read().await;
    if !store.books.contains_key(&book_id) {
        return Err(ApiFailure::book_not_found(book_id));
    }

    let matching: Vec<&Feedback> = store
        .feedbacks
        .iter()
        .filter(|f| f.book_id == book_id)
        .collect();
    let total_elements = matching.len() as u64;
    let total_pages = total_elements.div_ceil(u64::from(params.size)) as u32;
    let offset = params.page as usize * params.size as usize;
    let content = matching
        .into_iter()
        .skip(offset)
        .take(params.size as usize)
        .map(|f| FeedbackResponse {
            note: f.note,
            comment: f.comment.clone(),
            own_feedback: f.created_by == user_id,
        })
        .collect();

    Ok(Json(PagedResponse {
        content,
        number: params.page,
        size: params.size,
        total_elements,
        total_pages,
        first: params.page == 0,
        last: params.page.saturating_add(1) >= total_pages,
    }))
}
