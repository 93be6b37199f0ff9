//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: el ciclo de
//! vida de las transacciones y el cálculo geodésico que usa.

pub mod geodesic;
pub mod transaction_service;

pub use geodesic::{haversine_distance, Coordinates};
pub use transaction_service::TransactionService;
