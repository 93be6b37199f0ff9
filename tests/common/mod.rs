#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use logi_api::config::EnvironmentConfig;
use logi_api::models::{LocationType, NewDriver, NewLocation, NewVehicle};
use logi_api::{create_router, AppState};

pub fn memory_config() -> EnvironmentConfig {
    EnvironmentConfig::from_lookup(|key: &str| match key {
        "STORAGE_BACKEND" => Some("memory".to_string()),
        _ => None,
    })
    .expect("memory config")
}

/// Estado en memoria con las localizaciones 1 (0,0) y 2 (0,90),
/// los vehículos 1 y 2 y los conductores 1 y 2
pub async fn seeded_state() -> AppState {
    let state = AppState::in_memory(memory_config());

    for (name, longitude) in [("Origem", 0.0), ("Destino", 90.0)] {
        state
            .locations
            .create(NewLocation {
                name: name.to_string(),
                latitude: 0.0,
                longitude,
                location_type: LocationType::Warehouse,
            })
            .await
            .expect("seed location");
    }
    for plate in ["ABC1234", "XYZ9876"] {
        state
            .vehicles
            .create(NewVehicle {
                name: format!("Truck {}", plate),
                plate: plate.to_string(),
                device_id: None,
            })
            .await
            .expect("seed vehicle");
    }
    for name in ["Ana Souza", "Bruno Lima"] {
        state
            .drivers
            .create(NewDriver {
                name: name.to_string(),
            })
            .await
            .expect("seed driver");
    }
    state
}

pub async fn seeded_app() -> Router {
    create_router(seeded_state().await)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}
