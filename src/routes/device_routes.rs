use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use validator::Validate;

use crate::dto::DeviceRequest;
use crate::models::Device;
use crate::routes::{json_body, path_id};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::{Page, PageParams};

pub fn create_device_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_devices).post(create_device))
        .route("/:id", get(get_device).put(update_device).delete(delete_device))
}

async fn create_device(
    State(state): State<AppState>,
    payload: Result<Json<DeviceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Device>), AppError> {
    let request = json_body(payload)?;
    request.validate()?;
    let device = state.devices.create(request.into_new()).await?;
    Ok((StatusCode::CREATED, Json(device)))
}

async fn list_devices(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Device>>, AppError> {
    let request = params.resolve(Device::SORT_FIELDS)?;
    Ok(Json(state.devices.list(&request).await?))
}

async fn get_device(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Device>, AppError> {
    let id = path_id(path)?;
    Ok(Json(state.devices.get_by_id(id).await?))
}

async fn update_device(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<DeviceRequest>, JsonRejection>,
) -> Result<Json<Device>, AppError> {
    let id = path_id(path)?;
    let request = json_body(payload)?;
    request.validate()?;
    Ok(Json(state.devices.update(id, request.into_new()).await?))
}

async fn delete_device(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = path_id(path)?;
    state.devices.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
