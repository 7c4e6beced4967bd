//! Account event endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde_json::Value;

use super::{empty, filter_header, paginate, ApiError, PageQuery, PageResponse, SharedState};
use crate::Event;

/// GET /account/events
pub async fn list_events(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse<Event>>, ApiError> {
    let filter = filter_header(&headers)?;
    let state = state.read().await;
    Ok(Json(paginate(state.list_events(filter.as_ref()), &query)?))
}

/// GET /account/events/{id}
pub async fn get_event(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<Json<Event>, ApiError> {
    let state = state.read().await;
    state
        .get_event(id)
        .cloned()
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

/// POST /account/events/{id}/seen
pub async fn mark_event_seen(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    state.write().await.mark_event_seen(id)?;
    Ok(empty())
}
