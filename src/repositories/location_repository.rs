use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Location, NewLocation};
use crate::repositories::fetch_page;
use crate::utils::errors::{persistence_error, AppResult};
use crate::utils::pagination::{Page, PageRequest};

const COLUMNS: &str = "id, name, latitude, longitude, location_type";

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn create(&self, new: NewLocation) -> AppResult<Location>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Location>>;
    async fn find_all(&self, page: &PageRequest) -> AppResult<Page<Location>>;
    async fn update(&self, id: i64, changes: NewLocation) -> AppResult<Option<Location>>;
    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// ¿Hay alguna localización a menos de `tolerance` grados en ambos ejes?
    async fn exists_near(&self, latitude: f64, longitude: f64, tolerance: f64) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct PgLocationRepository {
    pool: PgPool,
}

impl PgLocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationRepository for PgLocationRepository {
    async fn create(&self, new: NewLocation) -> AppResult<Location> {
        let sql = format!(
            "INSERT INTO locations (name, latitude, longitude, location_type) VALUES ($1, $2, $3, $4) RETURNING {}",
            COLUMNS
        );
        sqlx::query_as::<_, Location>(&sql)
            .bind(new.name)
            .bind(new.latitude)
            .bind(new.longitude)
            .bind(new.location_type)
            .fetch_one(&self.pool)
            .await
            .map_err(persistence_error("creating location"))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Location>> {
        let sql = format!("SELECT {} FROM locations WHERE id = $1", COLUMNS);
        sqlx::query_as::<_, Location>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(persistence_error("finding location"))
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<Page<Location>> {
        fetch_page(&self.pool, "locations", COLUMNS, page)
            .await
            .map_err(persistence_error("listing locations"))
    }

    async fn update(&self, id: i64, changes: NewLocation) -> AppResult<Option<Location>> {
        let sql = format!(
            r#"
            UPDATE locations
            SET name = $2, latitude = $3, longitude = $4, location_type = $5
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        );
        sqlx::query_as::<_, Location>(&sql)
            .bind(id)
            .bind(changes.name)
            .bind(changes.latitude)
            .bind(changes.longitude)
            .bind(changes.location_type)
            .fetch_optional(&self.pool)
            .await
            .map_err(persistence_error("updating location"))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(persistence_error("deleting location"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn exists_near(&self, latitude: f64, longitude: f64, tolerance: f64) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM locations
                WHERE ABS(latitude - $1) < $3 AND ABS(longitude - $2) < $3
            )
            "#,
        )
        .bind(latitude)
        .bind(longitude)
        .bind(tolerance)
        .fetch_one(&self.pool)
        .await
        .map_err(persistence_error("checking nearby locations"))
    }
}
