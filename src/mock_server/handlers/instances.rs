//! Instance endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use super::{empty, filter_header, paginate, ApiError, PageQuery, PageResponse, SharedState};
use crate::{Instance, InstanceStatus, Volume};

/// Fields the mock accepts on `PUT`.
#[derive(Debug, Deserialize)]
pub struct UpdateInstanceParams {
    pub label: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// GET /linode/instances
pub async fn list_instances(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse<Instance>>, ApiError> {
    let filter = filter_header(&headers)?;
    let state = state.read().await;
    Ok(Json(paginate(state.list_instances(filter.as_ref()), &query)?))
}

/// GET /linode/instances/{id}
pub async fn get_instance(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<Json<Instance>, ApiError> {
    let state = state.read().await;
    state
        .get_instance(id)
        .cloned()
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

/// PUT /linode/instances/{id}
pub async fn update_instance(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
    Json(params): Json<UpdateInstanceParams>,
) -> Result<Json<Instance>, ApiError> {
    let mut state = state.write().await;
    state
        .update_instance(id, params.label, params.tags)
        .cloned()
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

/// DELETE /linode/instances/{id}
pub async fn delete_instance(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    state.write().await.delete_instance(id)?;
    Ok(empty())
}

/// POST /linode/instances/{id}/boot
pub async fn boot_instance(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    state
        .write()
        .await
        .set_instance_status(id, InstanceStatus::Running, "linode_boot")?;
    Ok(empty())
}

/// POST /linode/instances/{id}/reboot
pub async fn reboot_instance(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    state
        .write()
        .await
        .set_instance_status(id, InstanceStatus::Running, "linode_reboot")?;
    Ok(empty())
}

/// POST /linode/instances/{id}/shutdown
pub async fn shutdown_instance(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    state
        .write()
        .await
        .set_instance_status(id, InstanceStatus::Offline, "linode_shutdown")?;
    Ok(empty())
}

/// GET /linode/instances/{id}/volumes
pub async fn list_instance_volumes(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse<Volume>>, ApiError> {
    let state = state.read().await;
    if state.get_instance(id).is_none() {
        return Err(ApiError::not_found());
    }
    Ok(Json(paginate(state.list_instance_volumes(id), &query)?))
}
