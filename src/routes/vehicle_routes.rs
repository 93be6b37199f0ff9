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

use crate::dto::VehicleRequest;
use crate::models::Vehicle;
use crate::routes::{json_body, path_id};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::{Page, PageParams};

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/:id", get(get_vehicle).put(update_vehicle).delete(delete_vehicle))
}

async fn create_vehicle(
    State(state): State<AppState>,
    payload: Result<Json<VehicleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Vehicle>), AppError> {
    let request = json_body(payload)?;
    request.validate()?;
    let vehicle = state.vehicles.create(request.into_new()).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Vehicle>>, AppError> {
    let request = params.resolve(Vehicle::SORT_FIELDS)?;
    Ok(Json(state.vehicles.list(&request).await?))
}

async fn get_vehicle(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vehicle>, AppError> {
    let id = path_id(path)?;
    Ok(Json(state.vehicles.get_by_id(id).await?))
}

async fn update_vehicle(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<VehicleRequest>, JsonRejection>,
) -> Result<Json<Vehicle>, AppError> {
    let id = path_id(path)?;
    let request = json_body(payload)?;
    request.validate()?;
    Ok(Json(state.vehicles.update(id, request.into_new()).await?))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = path_id(path)?;
    state.vehicles.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
