//! Repositorio de transacciones
//!
//! Además del CRUD, expone la consulta de conflicto (¿el vehículo o el
//! conductor ya tienen una transacción en curso?) y la inserción exclusiva,
//! que ejecuta esa consulta y el `INSERT` dentro de la misma transacción
//! `SERIALIZABLE` de PostgreSQL.

use async_trait::async_trait;
use sqlx::postgres::PgExecutor;
use sqlx::PgPool;
use tracing::{debug, warn};

use crate::models::{NewTransaction, Transaction};
use crate::repositories::{fetch_page, is_serialization_failure};
use crate::utils::errors::{persistence_error, AppError, AppResult};
use crate::utils::pagination::{Page, PageRequest};

pub const ONGOING_CONFLICT_MESSAGE: &str = "vehicle or driver already has an ongoing transaction";

const COLUMNS: &str = "id, origin_location_id, destiny_location_id, vehicle_id, driver_id, \
                       dispatch_time, arrival_time, cargo_description";

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// ¿Existe una transacción en curso para el vehículo o para el conductor?
    async fn has_ongoing_transaction(&self, vehicle_id: i64, driver_id: i64) -> AppResult<bool>;

    /// Inserta solo si `has_ongoing_transaction` es falso, de forma atómica
    /// frente a otras inserciones concurrentes. Devuelve `AppError::Conflict`
    /// sin escribir nada cuando hay conflicto.
    async fn insert_exclusive(&self, new: NewTransaction) -> AppResult<Transaction>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Transaction>>;

    async fn find_all(&self, page: &PageRequest) -> AppResult<Page<Transaction>>;

    /// Reemplaza todos los campos mutables. `None` si el id no existe.
    async fn update(&self, id: i64, changes: NewTransaction) -> AppResult<Option<Transaction>>;

    /// `false` si el id no existe
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

/// Consulta de conflicto, utilizable con el pool o dentro de una transacción
pub async fn has_ongoing_transaction<'e, E>(
    executor: E,
    vehicle_id: i64,
    driver_id: i64,
) -> Result<bool, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM transactions
            WHERE (vehicle_id = $1 OR driver_id = $2)
              AND dispatch_time IS NOT NULL
              AND arrival_time IS NULL
        )
        "#,
    )
    .bind(vehicle_id)
    .bind(driver_id)
    .fetch_one(executor)
    .await
}

#[derive(Clone)]
pub struct PgTransactionRepository {
    pool: PgPool,
    retry_attempts: u32,
}

impl PgTransactionRepository {
    pub fn new(pool: PgPool, retry_attempts: u32) -> Self {
        Self {
            pool,
            retry_attempts: retry_attempts.max(1),
        }
    }

    /// Un intento completo de comprobación + inserción. `Ok(None)` = conflicto.
    async fn try_insert_exclusive(&self, new: &NewTransaction) -> Result<Option<Transaction>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;

        if has_ongoing_transaction(&mut *tx, new.vehicle_id, new.driver_id).await? {
            tx.rollback().await?;
            return Ok(None);
        }

        let sql = format!(
            r#"
            INSERT INTO transactions (origin_location_id, destiny_location_id, vehicle_id, driver_id,
                                      dispatch_time, arrival_time, cargo_description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            COLUMNS
        );
        let created = sqlx::query_as::<_, Transaction>(&sql)
            .bind(new.origin_location_id)
            .bind(new.destiny_location_id)
            .bind(new.vehicle_id)
            .bind(new.driver_id)
            .bind(new.dispatch_time)
            .bind(new.arrival_time)
            .bind(new.cargo_description.as_deref())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(created))
    }
}

#[async_trait]
impl TransactionRepository for PgTransactionRepository {
    /// Consulta de solo lectura sobre el pool. La creación no la usa: repite
    /// la comprobación dentro de la transacción de `try_insert_exclusive`.
    async fn has_ongoing_transaction(&self, vehicle_id: i64, driver_id: i64) -> AppResult<bool> {
        has_ongoing_transaction(&self.pool, vehicle_id, driver_id)
            .await
            .map_err(persistence_error("checking ongoing transactions"))
    }

    async fn insert_exclusive(&self, new: NewTransaction) -> AppResult<Transaction> {
        let mut attempt = 1;
        loop {
            match self.try_insert_exclusive(&new).await {
                Ok(Some(created)) => return Ok(created),
                Ok(None) => return Err(AppError::Conflict(ONGOING_CONFLICT_MESSAGE.to_string())),
                Err(e) if is_serialization_failure(&e) && attempt < self.retry_attempts => {
                    warn!(
                        attempt,
                        vehicle_id = new.vehicle_id,
                        driver_id = new.driver_id,
                        "🔁 Fallo de serialización al crear transacción, reintentando"
                    );
                    attempt += 1;
                }
                Err(e) => return Err(persistence_error("creating transaction")(e)),
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Transaction>> {
        debug!(id, "Buscando transacción");
        let sql = format!("SELECT {} FROM transactions WHERE id = $1", COLUMNS);
        sqlx::query_as::<_, Transaction>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(persistence_error("finding transaction"))
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<Page<Transaction>> {
        fetch_page(&self.pool, "transactions", COLUMNS, page)
            .await
            .map_err(persistence_error("listing transactions"))
    }

    async fn update(&self, id: i64, changes: NewTransaction) -> AppResult<Option<Transaction>> {
        let sql = format!(
            r#"
            UPDATE transactions
            SET origin_location_id = $2, destiny_location_id = $3, vehicle_id = $4, driver_id = $5,
                dispatch_time = $6, arrival_time = $7, cargo_description = $8
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        );
        sqlx::query_as::<_, Transaction>(&sql)
            .bind(id)
            .bind(changes.origin_location_id)
            .bind(changes.destiny_location_id)
            .bind(changes.vehicle_id)
            .bind(changes.driver_id)
            .bind(changes.dispatch_time)
            .bind(changes.arrival_time)
            .bind(changes.cargo_description)
            .fetch_optional(&self.pool)
            .await
            .map_err(persistence_error("updating transaction"))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(persistence_error("deleting transaction"))?;
        Ok(result.rows_affected() > 0)
    }
}
