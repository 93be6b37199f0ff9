use std::sync::Arc;

use tracing::info;

use crate::models::{Device, NewDevice};
use crate::repositories::{DeviceRepository, LocationRepository};
use crate::utils::errors::{not_found_error, AppError, AppResult, ReferencedEntity};
use crate::utils::pagination::{Page, PageRequest};

#[derive(Clone)]
pub struct DeviceController {
    repository: Arc<dyn DeviceRepository>,
    locations: Arc<dyn LocationRepository>,
}

impl DeviceController {
    pub fn new(repository: Arc<dyn DeviceRepository>, locations: Arc<dyn LocationRepository>) -> Self {
        Self {
            repository,
            locations,
        }
    }

    pub async fn create(&self, new: NewDevice) -> AppResult<Device> {
        self.check_location(new.location_id).await?;
        let device = self.repository.create(new).await?;
        info!(id = device.id, "✅ Dispositivo creado");
        Ok(device)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Device> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("device", id))
    }

    pub async fn list(&self, page: &PageRequest) -> AppResult<Page<Device>> {
        self.repository.find_all(page).await
    }

    pub async fn update(&self, id: i64, changes: NewDevice) -> AppResult<Device> {
        self.get_by_id(id).await?;
        self.check_location(changes.location_id).await?;
        self.repository
            .update(id, changes)
            .await?
            .ok_or_else(|| not_found_error("device", id))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("device", id));
        }
        info!(id, "🗑️ Dispositivo eliminado");
        Ok(())
    }

    async fn check_location(&self, location_id: Option<i64>) -> AppResult<()> {
        let Some(id) = location_id else {
            return Ok(());
        };
        match self.locations.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::ReferenceNotFound {
                entity: ReferencedEntity::Location,
                id,
            }),
        }
    }
}
