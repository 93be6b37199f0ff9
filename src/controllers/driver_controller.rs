use std::sync::Arc;

use tracing::info;

use crate::models::{Driver, NewDriver};
use crate::repositories::DriverRepository;
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::pagination::{Page, PageRequest};

#[derive(Clone)]
pub struct DriverController {
    repository: Arc<dyn DriverRepository>,
}

impl DriverController {
    pub fn new(repository: Arc<dyn DriverRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, new: NewDriver) -> AppResult<Driver> {
        let driver = self.repository.create(new).await?;
        info!(id = driver.id, "✅ Conductor creado");
        Ok(driver)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Driver> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("driver", id))
    }

    pub async fn list(&self, page: &PageRequest) -> AppResult<Page<Driver>> {
        self.repository.find_all(page).await
    }

    pub async fn update(&self, id: i64, changes: NewDriver) -> AppResult<Driver> {
        self.repository
            .update(id, changes)
            .await?
            .ok_or_else(|| not_found_error("driver", id))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("driver", id));
        }
        info!(id, "🗑️ Conductor eliminado");
        Ok(())
    }
}
