use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub host: String,
    pub version: String,
    pub storage: &'static str,
}

pub fn create_status_router() -> Router<AppState> {
    Router::new().route("/", get(status))
}

async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        host: state.config.server_url(),
        version: state.config.version.clone(),
        storage: state.config.storage.name(),
    })
}
