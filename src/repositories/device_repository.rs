use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Device, NewDevice};
use crate::repositories::fetch_page;
use crate::utils::errors::{persistence_error, AppResult};
use crate::utils::pagination::{Page, PageRequest};

const COLUMNS: &str = "id, name, location_id, device_type, status, last_tracking";

#[async_trait]
pub trait DeviceRepository: Send + Sync {
    async fn create(&self, new: NewDevice) -> AppResult<Device>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Device>>;
    async fn find_all(&self, page: &PageRequest) -> AppResult<Page<Device>>;
    async fn update(&self, id: i64, changes: NewDevice) -> AppResult<Option<Device>>;
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct PgDeviceRepository {
    pool: PgPool,
}

impl PgDeviceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeviceRepository for PgDeviceRepository {
    async fn create(&self, new: NewDevice) -> AppResult<Device> {
        let sql = format!(
            r#"
            INSERT INTO devices (name, location_id, device_type, status, last_tracking)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            COLUMNS
        );
        sqlx::query_as::<_, Device>(&sql)
            .bind(new.name)
            .bind(new.location_id)
            .bind(new.device_type)
            .bind(new.status)
            .bind(new.last_tracking)
            .fetch_one(&self.pool)
            .await
            .map_err(persistence_error("creating device"))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Device>> {
        let sql = format!("SELECT {} FROM devices WHERE id = $1", COLUMNS);
        sqlx::query_as::<_, Device>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(persistence_error("finding device"))
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<Page<Device>> {
        fetch_page(&self.pool, "devices", COLUMNS, page)
            .await
            .map_err(persistence_error("listing devices"))
    }

    async fn update(&self, id: i64, changes: NewDevice) -> AppResult<Option<Device>> {
        let sql = format!(
            r#"
            UPDATE devices
            SET name = $2, location_id = $3, device_type = $4, status = $5, last_tracking = $6
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        );
        sqlx::query_as::<_, Device>(&sql)
            .bind(id)
            .bind(changes.name)
            .bind(changes.location_id)
            .bind(changes.device_type)
            .bind(changes.status)
            .bind(changes.last_tracking)
            .fetch_optional(&self.pool)
            .await
            .map_err(persistence_error("updating device"))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM devices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(persistence_error("deleting device"))?;
        Ok(result.rows_affected() > 0)
    }
}
