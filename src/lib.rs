//! Logi API
//!
//! Backend de logística: registros de localizaciones, vehículos, conductores
//! y dispositivos, y el ciclo de vida de las transacciones que mueven un
//! vehículo con su conductor entre dos localizaciones.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
