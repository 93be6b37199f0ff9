//! Repositorios en memoria
//!
//! Cada tabla es un `Arc<RwLock<Table<T>>>` con ids incrementales desde 1,
//! igual que un `BIGSERIAL`. La inserción exclusiva de transacciones mantiene
//! el lock de escritura durante la comprobación de conflicto y la inserción.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{
    Device, Driver, Location, NewDevice, NewDriver, NewLocation, NewTransaction, NewVehicle,
    Transaction, Vehicle,
};
use crate::repositories::transaction_repository::ONGOING_CONFLICT_MESSAGE;
use crate::repositories::{
    DeviceRepository, DriverRepository, LocationRepository, TransactionRepository, VehicleRepository,
};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::pagination::{paginate, Page, PageRequest};

struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Clone> Table<T> {
    fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn replace_with(&mut self, id: i64, build: impl FnOnce(i64) -> T) -> Option<T> {
        let slot = self.rows.get_mut(&id)?;
        *slot = build(id);
        Some(slot.clone())
    }

    fn remove(&mut self, id: i64) -> bool {
        self.rows.remove(&id).is_some()
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }
}

type SharedTable<T> = Arc<RwLock<Table<T>>>;

#[derive(Default, Clone)]
pub struct InMemoryLocationRepository {
    table: SharedTable<Location>,
}

impl InMemoryLocationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocationRepository for InMemoryLocationRepository {
    async fn create(&self, new: NewLocation) -> AppResult<Location> {
        Ok(self.table.write().await.insert_with(|id| Location::from_new(id, new)))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Location>> {
        Ok(self.table.read().await.get(id))
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<Page<Location>> {
        Ok(paginate(self.table.read().await.all(), page))
    }

    async fn update(&self, id: i64, changes: NewLocation) -> AppResult<Option<Location>> {
        Ok(self
            .table
            .write()
            .await
            .replace_with(id, |id| Location::from_new(id, changes)))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.table.write().await.remove(id))
    }

    async fn exists_near(&self, latitude: f64, longitude: f64, tolerance: f64) -> AppResult<bool> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .any(|location| location.is_near(latitude, longitude, tolerance)))
    }
}

#[derive(Default, Clone)]
pub struct InMemoryVehicleRepository {
    table: SharedTable<Vehicle>,
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn create(&self, new: NewVehicle) -> AppResult<Vehicle> {
        Ok(self.table.write().await.insert_with(|id| Vehicle::from_new(id, new)))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>> {
        Ok(self.table.read().await.get(id))
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<Page<Vehicle>> {
        Ok(paginate(self.table.read().await.all(), page))
    }

    async fn update(&self, id: i64, changes: NewVehicle) -> AppResult<Option<Vehicle>> {
        Ok(self
            .table
            .write()
            .await
            .replace_with(id, |id| Vehicle::from_new(id, changes)))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.table.write().await.remove(id))
    }
}

#[derive(Default, Clone)]
pub struct InMemoryDriverRepository {
    table: SharedTable<Driver>,
}

impl InMemoryDriverRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DriverRepository for InMemoryDriverRepository {
    async fn create(&self, new: NewDriver) -> AppResult<Driver> {
        Ok(self.table.write().await.insert_with(|id| Driver::from_new(id, new)))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Driver>> {
        Ok(self.table.read().await.get(id))
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<Page<Driver>> {
        Ok(paginate(self.table.read().await.all(), page))
    }

    async fn update(&self, id: i64, changes: NewDriver) -> AppResult<Option<Driver>> {
        Ok(self
            .table
            .write()
            .await
            .replace_with(id, |id| Driver::from_new(id, changes)))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.table.write().await.remove(id))
    }
}

#[derive(Default, Clone)]
pub struct InMemoryDeviceRepository {
    table: SharedTable<Device>,
}

impl InMemoryDeviceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DeviceRepository for InMemoryDeviceRepository {
    async fn create(&self, new: NewDevice) -> AppResult<Device> {
        Ok(self.table.write().await.insert_with(|id| Device::from_new(id, new)))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Device>> {
        Ok(self.table.read().await.get(id))
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<Page<Device>> {
        Ok(paginate(self.table.read().await.all(), page))
    }

    async fn update(&self, id: i64, changes: NewDevice) -> AppResult<Option<Device>> {
        Ok(self
            .table
            .write()
            .await
            .replace_with(id, |id| Device::from_new(id, changes)))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.table.write().await.remove(id))
    }
}

#[derive(Default, Clone)]
pub struct InMemoryTransactionRepository {
    table: SharedTable<Transaction>,
}

impl InMemoryTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Número de transacciones almacenadas
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn any_blocking(table: &Table<Transaction>, vehicle_id: i64, driver_id: i64) -> bool {
    table.rows.values().any(|t| t.blocks(vehicle_id, driver_id))
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn has_ongoing_transaction(&self, vehicle_id: i64, driver_id: i64) -> AppResult<bool> {
        Ok(any_blocking(&*self.table.read().await, vehicle_id, driver_id))
    }

    async fn insert_exclusive(&self, new: NewTransaction) -> AppResult<Transaction> {
        let mut table = self.table.write().await;
        if any_blocking(&table, new.vehicle_id, new.driver_id) {
            return Err(AppError::Conflict(ONGOING_CONFLICT_MESSAGE.to_string()));
        }
        Ok(table.insert_with(|id| Transaction::from_new(id, new)))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Transaction>> {
        Ok(self.table.read().await.get(id))
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<Page<Transaction>> {
        Ok(paginate(self.table.read().await.all(), page))
    }

    async fn update(&self, id: i64, changes: NewTransaction) -> AppResult<Option<Transaction>> {
        Ok(self
            .table
            .write()
            .await
            .replace_with(id, |id| Transaction::from_new(id, changes)))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.table.write().await.remove(id))
    }
}
