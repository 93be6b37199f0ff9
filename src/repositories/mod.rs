//! Repositorios
//!
//! Cada repositorio define un trait (el puerto que consumen servicios y
//! controladores) y su implementación PostgreSQL. `in_memory` contiene las
//! implementaciones en memoria usadas por los tests y por
//! `STORAGE_BACKEND=memory`.

pub mod device_repository;
pub mod driver_repository;
pub mod in_memory;
pub mod location_repository;
pub mod transaction_repository;
pub mod vehicle_repository;

pub use device_repository::{DeviceRepository, PgDeviceRepository};
pub use driver_repository::{DriverRepository, PgDriverRepository};
pub use location_repository::{LocationRepository, PgLocationRepository};
pub use transaction_repository::{PgTransactionRepository, TransactionRepository};
pub use vehicle_repository::{PgVehicleRepository, VehicleRepository};

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

use crate::utils::pagination::{Page, PageRequest};

/// SQLSTATE de PostgreSQL para `serialization_failure`
const SERIALIZATION_FAILURE: &str = "40001";

pub(crate) fn is_serialization_failure(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(SERIALIZATION_FAILURE),
        _ => false,
    }
}

/// Listado paginado genérico. `table` y la columna de orden vienen de
/// constantes del código, nunca de la petición.
pub(crate) async fn fetch_page<T>(
    pool: &PgPool,
    table: &str,
    columns: &str,
    page: &PageRequest,
) -> Result<Page<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let sql = format!(
        "SELECT {} FROM {} {} LIMIT $1 OFFSET $2",
        columns,
        table,
        page.direction.order_by(page.sort.column)
    );
    let content = sqlx::query_as::<_, T>(&sql)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

    let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await?;

    Ok(Page::new(content, page, u64::try_from(total).unwrap_or(0)))
}
