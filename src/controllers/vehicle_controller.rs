use std::sync::Arc;

use tracing::info;

use crate::models::{NewVehicle, Vehicle};
use crate::repositories::{DeviceRepository, VehicleRepository};
use crate::utils::errors::{not_found_error, AppError, AppResult, ReferencedEntity};
use crate::utils::pagination::{Page, PageRequest};

#[derive(Clone)]
pub struct VehicleController {
    repository: Arc<dyn VehicleRepository>,
    devices: Arc<dyn DeviceRepository>,
}

impl VehicleController {
    pub fn new(repository: Arc<dyn VehicleRepository>, devices: Arc<dyn DeviceRepository>) -> Self {
        Self { repository, devices }
    }

    pub async fn create(&self, new: NewVehicle) -> AppResult<Vehicle> {
        self.check_device(new.device_id).await?;
        let vehicle = self.repository.create(new).await?;
        info!(id = vehicle.id, plate = %vehicle.plate, "✅ Vehículo creado");
        Ok(vehicle)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Vehicle> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("vehicle", id))
    }

    pub async fn list(&self, page: &PageRequest) -> AppResult<Page<Vehicle>> {
        self.repository.find_all(page).await
    }

    pub async fn update(&self, id: i64, changes: NewVehicle) -> AppResult<Vehicle> {
        self.get_by_id(id).await?;
        self.check_device(changes.device_id).await?;
        self.repository
            .update(id, changes)
            .await?
            .ok_or_else(|| not_found_error("vehicle", id))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("vehicle", id));
        }
        info!(id, "🗑️ Vehículo eliminado");
        Ok(())
    }

    async fn check_device(&self, device_id: Option<i64>) -> AppResult<()> {
        let Some(id) = device_id else {
            return Ok(());
        };
        match self.devices.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::ReferenceNotFound {
                entity: ReferencedEntity::Device,
                id,
            }),
        }
    }
}
