use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{NewVehicle, Vehicle};
use crate::repositories::fetch_page;
use crate::utils::errors::{persistence_error, AppResult};
use crate::utils::pagination::{Page, PageRequest};

const COLUMNS: &str = "id, name, plate, device_id";

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn create(&self, new: NewVehicle) -> AppResult<Vehicle>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>>;
    async fn find_all(&self, page: &PageRequest) -> AppResult<Page<Vehicle>>;
    async fn update(&self, id: i64, changes: NewVehicle) -> AppResult<Option<Vehicle>>;
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn create(&self, new: NewVehicle) -> AppResult<Vehicle> {
        let sql = format!(
            "INSERT INTO vehicles (name, plate, device_id) VALUES ($1, $2, $3) RETURNING {}",
            COLUMNS
        );
        sqlx::query_as::<_, Vehicle>(&sql)
            .bind(new.name)
            .bind(new.plate)
            .bind(new.device_id)
            .fetch_one(&self.pool)
            .await
            .map_err(persistence_error("creating vehicle"))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>> {
        let sql = format!("SELECT {} FROM vehicles WHERE id = $1", COLUMNS);
        sqlx::query_as::<_, Vehicle>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(persistence_error("finding vehicle"))
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<Page<Vehicle>> {
        fetch_page(&self.pool, "vehicles", COLUMNS, page)
            .await
            .map_err(persistence_error("listing vehicles"))
    }

    async fn update(&self, id: i64, changes: NewVehicle) -> AppResult<Option<Vehicle>> {
        let sql = format!(
            "UPDATE vehicles SET name = $2, plate = $3, device_id = $4 WHERE id = $1 RETURNING {}",
            COLUMNS
        );
        sqlx::query_as::<_, Vehicle>(&sql)
            .bind(id)
            .bind(changes.name)
            .bind(changes.plate)
            .bind(changes.device_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(persistence_error("updating vehicle"))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(persistence_error("deleting vehicle"))?;
        Ok(result.rows_affected() > 0)
    }
}
