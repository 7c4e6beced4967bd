//! Volume endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use super::{empty, filter_header, paginate, ApiError, PageQuery, PageResponse, SharedState};
use crate::Volume;

#[derive(Debug, Deserialize)]
pub struct AttachVolumeParams {
    pub linode_id: u64,
    #[allow(dead_code)] // Accepted by the API, ignored by the mock
    pub config_id: Option<u64>,
}

/// GET /volumes
pub async fn list_volumes(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse<Volume>>, ApiError> {
    let filter = filter_header(&headers)?;
    let state = state.read().await;
    Ok(Json(paginate(state.list_volumes(filter.as_ref()), &query)?))
}

/// GET /volumes/{id}
pub async fn get_volume(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<Json<Volume>, ApiError> {
    let state = state.read().await;
    state
        .get_volume(id)
        .cloned()
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

/// DELETE /volumes/{id}
pub async fn delete_volume(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    state.write().await.delete_volume(id)?;
    Ok(empty())
}

/// POST /volumes/{id}/attach
pub async fn attach_volume(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
    Json(params): Json<AttachVolumeParams>,
) -> Result<Json<Volume>, ApiError> {
    let mut state = state.write().await;
    let volume = state.attach_volume(id, params.linode_id)?;
    Ok(Json(volume.clone()))
}

/// POST /volumes/{id}/detach
pub async fn detach_volume(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    state.write().await.detach_volume(id)?;
    Ok(empty())
}
