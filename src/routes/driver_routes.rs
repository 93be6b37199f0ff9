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

use crate::dto::DriverRequest;
use crate::models::Driver;
use crate::routes::{json_body, path_id};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::{Page, PageParams};

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_drivers).post(create_driver))
        .route("/:id", get(get_driver).put(update_driver).delete(delete_driver))
}

async fn create_driver(
    State(state): State<AppState>,
    payload: Result<Json<DriverRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Driver>), AppError> {
    let request = json_body(payload)?;
    request.validate()?;
    let driver = state.drivers.create(request.into_new()).await?;
    Ok((StatusCode::CREATED, Json(driver)))
}

async fn list_drivers(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Driver>>, AppError> {
    let request = params.resolve(Driver::SORT_FIELDS)?;
    Ok(Json(state.drivers.list(&request).await?))
}

async fn get_driver(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Driver>, AppError> {
    let id = path_id(path)?;
    Ok(Json(state.drivers.get_by_id(id).await?))
}

async fn update_driver(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<DriverRequest>, JsonRejection>,
) -> Result<Json<Driver>, AppError> {
    let id = path_id(path)?;
    let request = json_body(payload)?;
    request.validate()?;
    Ok(Json(state.drivers.update(id, request.into_new()).await?))
}

async fn delete_driver(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = path_id(path)?;
    state.drivers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
