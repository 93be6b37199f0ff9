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

use crate::dto::LocationRequest;
use crate::models::Location;
use crate::routes::{json_body, path_id};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::{Page, PageParams};

pub fn create_location_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_locations).post(create_location))
        .route("/:id", get(get_location).put(update_location).delete(delete_location))
}

async fn create_location(
    State(state): State<AppState>,
    payload: Result<Json<LocationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Location>), AppError> {
    let request = json_body(payload)?;
    request.validate()?;
    let location = state.locations.create(request.into_new()).await?;
    Ok((StatusCode::CREATED, Json(location)))
}

async fn list_locations(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Location>>, AppError> {
    let request = params.resolve(Location::SORT_FIELDS)?;
    Ok(Json(state.locations.list(&request).await?))
}

async fn get_location(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Location>, AppError> {
    let id = path_id(path)?;
    Ok(Json(state.locations.get_by_id(id).await?))
}

async fn update_location(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<LocationRequest>, JsonRejection>,
) -> Result<Json<Location>, AppError> {
    let id = path_id(path)?;
    let request = json_body(payload)?;
    request.validate()?;
    Ok(Json(state.locations.update(id, request.into_new()).await?))
}

async fn delete_location(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = path_id(path)?;
    state.locations.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
