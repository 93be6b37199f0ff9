//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Los servicios y controladores se construyen
//! una sola vez sobre el mismo conjunto de repositorios.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::controllers::{DeviceController, DriverController, LocationController, VehicleController};
use crate::repositories::in_memory::{
    InMemoryDeviceRepository, InMemoryDriverRepository, InMemoryLocationRepository,
    InMemoryTransactionRepository, InMemoryVehicleRepository,
};
use crate::repositories::{
    DeviceRepository, DriverRepository, LocationRepository, PgDeviceRepository, PgDriverRepository,
    PgLocationRepository, PgTransactionRepository, PgVehicleRepository, TransactionRepository,
    VehicleRepository,
};
use crate::services::TransactionService;

/// Conjunto de repositorios de un backend
#[derive(Clone)]
pub struct Repositories {
    pub transactions: Arc<dyn TransactionRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub drivers: Arc<dyn DriverRepository>,
    pub devices: Arc<dyn DeviceRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool, retry_attempts: u32) -> Self {
        Self {
            transactions: Arc::new(PgTransactionRepository::new(pool.clone(), retry_attempts)),
            locations: Arc::new(PgLocationRepository::new(pool.clone())),
            vehicles: Arc::new(PgVehicleRepository::new(pool.clone())),
            drivers: Arc::new(PgDriverRepository::new(pool.clone())),
            devices: Arc::new(PgDeviceRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            transactions: Arc::new(InMemoryTransactionRepository::new()),
            locations: Arc::new(InMemoryLocationRepository::new()),
            vehicles: Arc::new(InMemoryVehicleRepository::new()),
            drivers: Arc::new(InMemoryDriverRepository::new()),
            devices: Arc::new(InMemoryDeviceRepository::new()),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub transactions: TransactionService,
    pub locations: LocationController,
    pub vehicles: VehicleController,
    pub drivers: DriverController,
    pub devices: DeviceController,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, repositories: Repositories) -> Self {
        let Repositories {
            transactions,
            locations,
            vehicles,
            drivers,
            devices,
        } = repositories;

        Self {
            transactions: TransactionService::new(
                transactions,
                locations.clone(),
                vehicles.clone(),
                drivers.clone(),
            ),
            locations: LocationController::new(
                locations.clone(),
                config.location_proximity_tolerance,
            ),
            vehicles: VehicleController::new(vehicles, devices.clone()),
            drivers: DriverController::new(drivers),
            devices: DeviceController::new(devices, locations),
            config: Arc::new(config),
        }
    }

    pub fn postgres(pool: PgPool, config: EnvironmentConfig) -> Self {
        let repositories = Repositories::postgres(pool, config.conflict_retry_attempts);
        Self::new(config, repositories)
    }

    pub fn in_memory(config: EnvironmentConfig) -> Self {
        Self::new(config, Repositories::in_memory())
    }
}
