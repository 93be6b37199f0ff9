//! Controlador de localizaciones
//!
//! CRUD de localizaciones. La creación rechaza coordenadas demasiado
//! cercanas a una localización existente.

use std::sync::Arc;

use tracing::{info, warn};

use crate::models::{Location, NewLocation};
use crate::repositories::LocationRepository;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::pagination::{Page, PageRequest};

#[derive(Clone)]
pub struct LocationController {
    repository: Arc<dyn LocationRepository>,
    proximity_tolerance: f64,
}

impl LocationController {
    pub fn new(repository: Arc<dyn LocationRepository>, proximity_tolerance: f64) -> Self {
        Self {
            repository,
            proximity_tolerance,
        }
    }

    pub async fn create(&self, new: NewLocation) -> AppResult<Location> {
        if self
            .repository
            .exists_near(new.latitude, new.longitude, self.proximity_tolerance)
            .await?
        {
            warn!(
                latitude = new.latitude,
                longitude = new.longitude,
                "📍 Localización demasiado cercana a una existente"
            );
            return Err(AppError::Conflict(
                "a location already exists too close to these coordinates".to_string(),
            ));
        }

        let location = self.repository.create(new).await?;
        info!(id = location.id, name = %location.name, "✅ Localización creada");
        Ok(location)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Location> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("location", id))
    }

    pub async fn list(&self, page: &PageRequest) -> AppResult<Page<Location>> {
        self.repository.find_all(page).await
    }

    /// La proximidad solo se comprueba al crear
    pub async fn update(&self, id: i64, changes: NewLocation) -> AppResult<Location> {
        self.repository
            .update(id, changes)
            .await?
            .ok_or_else(|| not_found_error("location", id))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("location", id));
        }
        info!(id, "🗑️ Localización eliminada");
        Ok(())
    }
}
