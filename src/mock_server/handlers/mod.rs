//! HTTP request handlers for the mock server.

pub mod events;
pub mod instances;
pub mod volumes;

pub use events::*;
pub use instances::*;
pub use volumes::*;

use std::sync::Arc;

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::RwLock;

use super::state::{MockState, StateError};

pub type SharedState = Arc<RwLock<MockState>>;

const DEFAULT_PAGE_SIZE: u32 = 100;
const MAX_PAGE_SIZE: u32 = 500;

/// An error rendered the way the API renders them.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    reasons: Vec<(Option<String>, String)>,
}

impl ApiError {
    pub fn new(status: StatusCode, reason: impl Into<String>) -> Self {
        Self {
            status,
            reasons: vec![(None, reason.into())],
        }
    }

    pub fn field(status: StatusCode, field: &str, reason: impl Into<String>) -> Self {
        Self {
            status,
            reasons: vec![(Some(field.to_string()), reason.into())],
        }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not found")
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Invalid Token")
    }
}

impl From<StateError> for ApiError {
    fn from(err: StateError) -> Self {
        match err {
            StateError::NotFound => Self::not_found(),
            StateError::Conflict(reason) => Self::new(StatusCode::BAD_REQUEST, reason),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let errors: Vec<Value> = self
            .reasons
            .into_iter()
            .map(|(field, reason)| match field {
                Some(f) => json!({"field": f, "reason": reason}),
                None => json!({"reason": reason}),
            })
            .collect();
        (self.status, Json(json!({ "errors": errors }))).into_response()
    }
}

/// Pagination query parameters shared by every list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// The list envelope.
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub pages: u32,
    pub results: usize,
}

/// Slice `items` into the requested page.
///
/// Page sizes are not held to the API's 25 item minimum so small fixture
/// sets can still span several pages.
pub fn paginate<T>(items: Vec<T>, query: &PageQuery) -> Result<PageResponse<T>, ApiError> {
    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(ApiError::field(
            StatusCode::BAD_REQUEST,
            "page_size",
            format!("Must be between 1 and {MAX_PAGE_SIZE}"),
        ));
    }

    let page = query.page.unwrap_or(1).max(1);
    let results = items.len();
    let pages = results.div_ceil(page_size as usize).max(1) as u32;

    let start = (page as usize - 1) * page_size as usize;
    let data = items
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .collect();

    Ok(PageResponse {
        data,
        page,
        pages,
        results,
    })
}

/// The parsed `X-Filter` header, if any.
pub fn filter_header(headers: &HeaderMap) -> Result<Option<Value>, ApiError> {
    let Some(raw) = headers.get("X-Filter") else {
        return Ok(None);
    };
    raw.to_str()
        .ok()
        .and_then(|s| serde_json::from_str(s).ok())
        .map(Some)
        .ok_or_else(|| ApiError::new(StatusCode::BAD_REQUEST, "Cannot parse X-Filter header"))
}

/// Empty object returned by action endpoints.
pub fn empty() -> Json<Value> {
    Json(json!({}))
}
