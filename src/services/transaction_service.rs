//! Ciclo de vida de las transacciones
//!
//! `TransactionService` orquesta creación, consulta, cálculo de distancia,
//! actualización y borrado. Resuelve cada referencia (origen, destino,
//! vehículo, conductor) en su repositorio antes de escribir y delega la
//! exclusión de transacciones en curso a `TransactionRepository::insert_exclusive`,
//! que ejecuta la comprobación y la inserción de forma atómica.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::models::{Location, NewTransaction, Transaction};
use crate::repositories::{DriverRepository, LocationRepository, TransactionRepository, VehicleRepository};
use crate::services::geodesic::haversine_distance;
use crate::utils::errors::{not_found_error, AppError, AppResult, ReferencedEntity};
use crate::utils::pagination::{Page, PageRequest};

#[derive(Clone)]
pub struct TransactionService {
    transactions: Arc<dyn TransactionRepository>,
    locations: Arc<dyn LocationRepository>,
    vehicles: Arc<dyn VehicleRepository>,
    drivers: Arc<dyn DriverRepository>,
}

impl TransactionService {
    pub fn new(
        transactions: Arc<dyn TransactionRepository>,
        locations: Arc<dyn LocationRepository>,
        vehicles: Arc<dyn VehicleRepository>,
        drivers: Arc<dyn DriverRepository>,
    ) -> Self {
        Self {
            transactions,
            locations,
            vehicles,
            drivers,
        }
    }

    /// Crear una transacción.
    ///
    /// Errores: `ReferenceNotFound` para la primera referencia inexistente,
    /// `Conflict` si el vehículo o el conductor ya tienen una transacción en
    /// curso, `Persistence` si falla el almacenamiento. En ningún caso queda
    /// un registro parcial.
    pub async fn create(&self, input: NewTransaction) -> AppResult<Transaction> {
        self.resolve_references(&input).await?;

        let created = self.transactions.insert_exclusive(input).await.map_err(|e| {
            if let AppError::Conflict(_) = &e {
                warn!("🚫 Vehículo o conductor con transacción en curso");
            }
            e
        })?;

        info!(
            id = created.id,
            vehicle_id = created.vehicle_id,
            driver_id = created.driver_id,
            state = ?created.state(),
            "✅ Transacción creada"
        );
        Ok(created)
    }

    pub async fn get(&self, id: i64) -> AppResult<Transaction> {
        debug!(id, "Obteniendo transacción");
        self.transactions
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("transaction", id))
    }

    pub async fn list(&self, page: &PageRequest) -> AppResult<Page<Transaction>> {
        self.transactions.find_all(page).await
    }

    /// Distancia en km entre origen y destino. Las localizaciones se vuelven
    /// a leer por id para reflejar cambios posteriores a la transacción.
    pub async fn calculate_distance(&self, id: i64) -> AppResult<f64> {
        let transaction = self.get(id).await?;
        let origin = self
            .find_location(transaction.origin_location_id)
            .await?
            .ok_or_else(|| not_found_error("origin location", transaction.origin_location_id))?;
        let destiny = self
            .find_location(transaction.destiny_location_id)
            .await?
            .ok_or_else(|| not_found_error("destiny location", transaction.destiny_location_id))?;

        Ok(haversine_distance(origin.coordinates(), destiny.coordinates()))
    }

    /// Reemplazar todos los campos de una transacción existente.
    ///
    /// No vuelve a comprobar el conflicto de transacciones en curso: un
    /// despachante puede corregir una transacción ya iniciada aunque eso
    /// deje dos transacciones en curso para el mismo vehículo o conductor.
    pub async fn update(&self, id: i64, input: NewTransaction) -> AppResult<Transaction> {
        self.get(id).await?;
        self.resolve_references(&input).await?;

        let updated = self
            .transactions
            .update(id, input)
            .await?
            .ok_or_else(|| not_found_error("transaction", id))?;

        info!(id, state = ?updated.state(), "✏️ Transacción actualizada");
        Ok(updated)
    }

    /// Borrar una transacción. No afecta a vehículos, conductores ni localizaciones.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.transactions.delete(id).await? {
            return Err(not_found_error("transaction", id));
        }
        info!(id, "🗑️ Transacción eliminada");
        Ok(())
    }

    async fn resolve_references(&self, input: &NewTransaction) -> AppResult<()> {
        require(
            self.find_location(input.origin_location_id).await?.is_some(),
            ReferencedEntity::OriginLocation,
            input.origin_location_id,
        )?;
        require(
            self.find_location(input.destiny_location_id).await?.is_some(),
            ReferencedEntity::DestinyLocation,
            input.destiny_location_id,
        )?;
        require(
            self.vehicles.find_by_id(input.vehicle_id).await?.is_some(),
            ReferencedEntity::Vehicle,
            input.vehicle_id,
        )?;
        require(
            self.drivers.find_by_id(input.driver_id).await?.is_some(),
            ReferencedEntity::Driver,
            input.driver_id,
        )
    }

    async fn find_location(&self, id: i64) -> AppResult<Option<Location>> {
        self.locations.find_by_id(id).await
    }
}

fn require(exists: bool, entity: ReferencedEntity, id: i64) -> AppResult<()> {
    if exists {
        Ok(())
    } else {
        Err(AppError::ReferenceNotFound { entity, id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LocationType, NewDriver, NewLocation, NewVehicle, TransactionState};
    use crate::repositories::in_memory::{
        InMemoryDriverRepository, InMemoryLocationRepository, InMemoryTransactionRepository,
        InMemoryVehicleRepository,
    };
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveDateTime};

    struct Fixture {
        service: TransactionService,
        store: InMemoryTransactionRepository,
        locations: InMemoryLocationRepository,
    }

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(7, 45, 0)
            .unwrap()
    }

    /// Localizaciones 1 (0,0) y 2 (0,90); vehículos 1..=2; conductores 1..=2
    async fn fixture() -> Fixture {
        let store = InMemoryTransactionRepository::new();
        let locations = InMemoryLocationRepository::new();
        let vehicles = InMemoryVehicleRepository::new();
        let drivers = InMemoryDriverRepository::new();

        for (name, longitude) in [("Origin", 0.0), ("Destiny", 90.0)] {
            locations
                .create(NewLocation {
                    name: name.to_string(),
                    latitude: 0.0,
                    longitude,
                    location_type: LocationType::Depot,
                })
                .await
                .unwrap();
        }
        for plate in ["AAA1111", "BBB2222"] {
            vehicles
                .create(NewVehicle {
                    name: format!("Truck {plate}"),
                    plate: plate.to_string(),
                    device_id: None,
                })
                .await
                .unwrap();
        }
        for name in ["Ana", "Bruno"] {
            drivers.create(NewDriver { name: name.to_string() }).await.unwrap();
        }

        let service = TransactionService::new(
            Arc::new(store.clone()),
            Arc::new(locations.clone()),
            Arc::new(vehicles),
            Arc::new(drivers),
        );
        Fixture {
            service,
            store,
            locations,
        }
    }

    fn input(vehicle_id: i64, driver_id: i64) -> NewTransaction {
        NewTransaction {
            origin_location_id: 1,
            destiny_location_id: 2,
            vehicle_id,
            driver_id,
            dispatch_time: Some(t0()),
            arrival_time: None,
            cargo_description: Some("Soja a granel".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_returns_record_equal_to_input() {
        let f = fixture().await;
        let created = f.service.create(input(1, 1)).await.unwrap();

        assert_eq!(created, Transaction::from_new(created.id, input(1, 1)));
        assert_eq!(created.state(), TransactionState::Ongoing);
        assert_eq!(f.service.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_ongoing_conflicts_by_vehicle_or_driver() {
        let f = fixture().await;
        f.service.create(input(1, 1)).await.unwrap();

        let same_vehicle = f.service.create(input(1, 2)).await.unwrap_err();
        assert!(matches!(same_vehicle, AppError::Conflict(ref m) if m == "vehicle or driver already has an ongoing transaction"));

        let same_driver = f.service.create(input(2, 1)).await.unwrap_err();
        assert!(matches!(same_driver, AppError::Conflict(_)));

        let free = f.service.create(input(2, 2)).await.unwrap();
        assert_eq!(free.id, 2);
        assert_eq!(f.store.len().await, 2);
    }

    #[tokio::test]
    async fn test_conflict_ignores_locations() {
        let f = fixture().await;
        f.service.create(input(1, 1)).await.unwrap();

        let mut reversed = input(1, 2);
        reversed.origin_location_id = 2;
        reversed.destiny_location_id = 1;
        assert!(matches!(
            f.service.create(reversed).await.unwrap_err(),
            AppError::Conflict(_)
        ));
    }

    #[tokio::test]
    async fn test_completed_transaction_releases_vehicle_and_driver() {
        let f = fixture().await;
        let mut done = input(1, 1);
        done.arrival_time = Some(t0() + chrono::Duration::hours(5));
        let completed = f.service.create(done).await.unwrap();
        assert_eq!(completed.state(), TransactionState::Completed);

        assert!(f.service.create(input(1, 1)).await.is_ok());
    }

    #[tokio::test]
    async fn test_pending_transaction_is_refused_while_vehicle_busy() {
        let f = fixture().await;
        f.service.create(input(1, 1)).await.unwrap();

        let mut pending = input(1, 2);
        pending.dispatch_time = None;
        assert!(matches!(
            f.service.create(pending).await.unwrap_err(),
            AppError::Conflict(_)
        ));
    }

    #[tokio::test]
    async fn test_missing_destiny_is_reference_not_found_and_nothing_persisted() {
        let f = fixture().await;
        let mut bad = input(1, 1);
        bad.destiny_location_id = 404;

        let err = f.service.create(bad).await.unwrap_err();
        match err {
            AppError::ReferenceNotFound { entity, id } => {
                assert_eq!(entity, ReferencedEntity::DestinyLocation);
                assert_eq!(entity.to_string(), "destiny location");
                assert_eq!(id, 404);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(f.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_references_are_resolved_in_order() {
        let f = fixture().await;
        let mut bad = input(9, 9);
        bad.origin_location_id = 7;

        let err = f.service.create(bad.clone()).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::ReferenceNotFound { entity: ReferencedEntity::OriginLocation, id: 7 }
        ));

        bad.origin_location_id = 1;
        let err = f.service.create(bad.clone()).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::ReferenceNotFound { entity: ReferencedEntity::Vehicle, id: 9 }
        ));

        bad.vehicle_id = 1;
        let err = f.service.create(bad).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::ReferenceNotFound { entity: ReferencedEntity::Driver, id: 9 }
        ));
    }

    #[tokio::test]
    async fn test_distance_between_origin_and_destiny() {
        let f = fixture().await;
        let created = f.service.create(input(1, 1)).await.unwrap();

        let distance = f.service.calculate_distance(created.id).await.unwrap();
        assert!((distance - 10007.543).abs() < 0.01);
    }

    #[tokio::test]
    async fn test_distance_is_symmetric_and_zero_for_same_point() {
        let f = fixture().await;
        let there = f.service.create(input(1, 1)).await.unwrap();

        let mut back = input(2, 2);
        back.origin_location_id = 2;
        back.destiny_location_id = 1;
        let back = f.service.create(back).await.unwrap();

        let d1 = f.service.calculate_distance(there.id).await.unwrap();
        let d2 = f.service.calculate_distance(back.id).await.unwrap();
        assert!((d1 - d2).abs() < 1e-9);

        let mut changes = input(1, 1);
        changes.destiny_location_id = 1;
        f.service.update(there.id, changes).await.unwrap();
        assert!(f.service.calculate_distance(there.id).await.unwrap().abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_distance_reflects_location_updates() {
        let f = fixture().await;
        let created = f.service.create(input(1, 1)).await.unwrap();

        f.locations
            .update(
                2,
                NewLocation {
                    name: "Destiny".to_string(),
                    latitude: 0.0,
                    longitude: 0.0,
                    location_type: LocationType::Depot,
                },
            )
            .await
            .unwrap();

        assert!(f.service.calculate_distance(created.id).await.unwrap().abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_distance_not_found_when_location_deleted() {
        let f = fixture().await;
        let created = f.service.create(input(1, 1)).await.unwrap();
        f.locations.delete(1).await.unwrap();

        let err = f.service.calculate_distance(created.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m.contains("origin location")));
        assert!(matches!(
            f.service.calculate_distance(999).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_update_replaces_every_field() {
        let f = fixture().await;
        let created = f.service.create(input(1, 1)).await.unwrap();

        let changes = NewTransaction {
            origin_location_id: 2,
            destiny_location_id: 1,
            vehicle_id: 2,
            driver_id: 2,
            dispatch_time: Some(t0()),
            arrival_time: Some(t0() + chrono::Duration::hours(2)),
            cargo_description: None,
        };
        let updated = f.service.update(created.id, changes.clone()).await.unwrap();
        assert_eq!(updated, Transaction::from_new(created.id, changes));
        assert_eq!(updated.state(), TransactionState::Completed);
    }

    #[tokio::test]
    async fn test_update_validates_references_and_existence() {
        let f = fixture().await;
        let created = f.service.create(input(1, 1)).await.unwrap();

        let mut bad = input(1, 1);
        bad.driver_id = 50;
        assert!(matches!(
            f.service.update(created.id, bad).await.unwrap_err(),
            AppError::ReferenceNotFound { entity: ReferencedEntity::Driver, id: 50 }
        ));
        assert!(matches!(
            f.service.update(77, input(1, 1)).await.unwrap_err(),
            AppError::NotFound(_)
        ));
        // el registro original no cambió
        assert_eq!(f.service.get(created.id).await.unwrap(), created);
    }

    /// Decisión de diseño a revisar: la actualización no vuelve a comprobar
    /// el conflicto de transacciones en curso.
    #[tokio::test]
    async fn test_update_does_not_recheck_ongoing_conflict() {
        let f = fixture().await;
        f.service.create(input(1, 1)).await.unwrap();

        let mut finished = input(2, 2);
        finished.arrival_time = Some(t0());
        let other = f.service.create(finished).await.unwrap();

        // pasa a estar en curso con el vehículo 1, que ya tiene una en curso
        let moved = f.service.update(other.id, input(1, 2)).await.unwrap();
        assert_eq!(moved.state(), TransactionState::Ongoing);
        assert_eq!(moved.vehicle_id, 1);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent_not_found() {
        let f = fixture().await;
        let created = f.service.create(input(1, 1)).await.unwrap();

        f.service.delete(created.id).await.unwrap();
        assert!(matches!(f.service.get(created.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(f.service.delete(created.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(f.service.delete(created.id).await, Err(AppError::NotFound(_))));

        // el vehículo queda libre y las localizaciones intactas
        assert!(f.service.create(input(1, 1)).await.is_ok());
        assert!(f.locations.find_by_id(1).await.unwrap().is_some());
    }

    struct FailingStore;

    #[async_trait]
    impl TransactionRepository for FailingStore {
        async fn has_ongoing_transaction(&self, _: i64, _: i64) -> AppResult<bool> {
            Ok(false)
        }
        async fn insert_exclusive(&self, _: NewTransaction) -> AppResult<Transaction> {
            Err(crate::utils::errors::persistence_error("creating transaction")(
                sqlx::Error::PoolTimedOut,
            ))
        }
        async fn find_by_id(&self, _: i64) -> AppResult<Option<Transaction>> {
            Ok(None)
        }
        async fn find_all(&self, page: &PageRequest) -> AppResult<Page<Transaction>> {
            Ok(Page::new(Vec::new(), page, 0))
        }
        async fn update(&self, _: i64, _: NewTransaction) -> AppResult<Option<Transaction>> {
            Ok(None)
        }
        async fn delete(&self, _: i64) -> AppResult<bool> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn test_persistence_failure_is_wrapped() {
        let f = fixture().await;
        let service = TransactionService {
            transactions: Arc::new(FailingStore),
            ..f.service
        };

        let err = service.create(input(1, 1)).await.unwrap_err();
        match err {
            AppError::Persistence { context, source } => {
                assert_eq!(context, "creating transaction");
                assert!(matches!(source, sqlx::Error::PoolTimedOut));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
