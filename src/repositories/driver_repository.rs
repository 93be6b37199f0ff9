use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Driver, NewDriver};
use crate::repositories::fetch_page;
use crate::utils::errors::{persistence_error, AppResult};
use crate::utils::pagination::{Page, PageRequest};

const COLUMNS: &str = "id, name";

#[async_trait]
pub trait DriverRepository: Send + Sync {
    async fn create(&self, new: NewDriver) -> AppResult<Driver>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Driver>>;
    async fn find_all(&self, page: &PageRequest) -> AppResult<Page<Driver>>;
    async fn update(&self, id: i64, changes: NewDriver) -> AppResult<Option<Driver>>;
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct PgDriverRepository {
    pool: PgPool,
}

impl PgDriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DriverRepository for PgDriverRepository {
    async fn create(&self, new: NewDriver) -> AppResult<Driver> {
        sqlx::query_as::<_, Driver>("INSERT INTO drivers (name) VALUES ($1) RETURNING id, name")
            .bind(new.name)
            .fetch_one(&self.pool)
            .await
            .map_err(persistence_error("creating driver"))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Driver>> {
        sqlx::query_as::<_, Driver>("SELECT id, name FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(persistence_error("finding driver"))
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<Page<Driver>> {
        fetch_page(&self.pool, "drivers", COLUMNS, page)
            .await
            .map_err(persistence_error("listing drivers"))
    }

    async fn update(&self, id: i64, changes: NewDriver) -> AppResult<Option<Driver>> {
        sqlx::query_as::<_, Driver>("UPDATE drivers SET name = $2 WHERE id = $1 RETURNING id, name")
            .bind(id)
            .bind(changes.name)
            .fetch_optional(&self.pool)
            .await
            .map_err(persistence_error("updating driver"))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(persistence_error("deleting driver"))?;
        Ok(result.rows_affected() > 0)
    }
}
