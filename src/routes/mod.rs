//! Rutas HTTP
//!
//! Un router por recurso, montados bajo su prefijo en `create_router`.

pub mod device_routes;
pub mod driver_routes;
pub mod location_routes;
pub mod status_routes;
pub mod transaction_routes;
pub mod vehicle_routes;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors_layer;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .nest("/transactions", transaction_routes::create_transaction_router())
        .nest("/locations", location_routes::create_location_router())
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/drivers", driver_routes::create_driver_router())
        .nest("/devices", device_routes::create_device_router())
        .nest("/status", status_routes::create_status_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}

/// Cuerpos JSON mal formados responden con el mismo formato de error que el resto
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Ids no numéricos en la ruta responden igual que un cuerpo inválido
pub(crate) fn path_id(path: Result<Path<i64>, PathRejection>) -> AppResult<i64> {
    path.map(|Path(id)| id)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}
