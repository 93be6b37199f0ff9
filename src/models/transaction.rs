//! Modelo de Transaction
//!
//! Una transacción registra el movimiento de un vehículo con su conductor
//! entre dos localizaciones. Las referencias son ids unidireccionales; el
//! estado (pendiente, en curso, completada) se deriva de las fechas.

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use crate::utils::pagination::{SortField, SortValue, Sortable};

/// Estado derivado de `dispatch_time` / `arrival_time`, no se almacena
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionState {
    Pending,
    Ongoing,
    Completed,
}

#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct Transaction {
    pub id: i64,
    pub origin_location_id: i64,
    pub destiny_location_id: i64,
    pub vehicle_id: i64,
    pub driver_id: i64,
    pub dispatch_time: Option<NaiveDateTime>,
    pub arrival_time: Option<NaiveDateTime>,
    pub cargo_description: Option<String>,
}

/// Todos los campos mutables de una transacción
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub origin_location_id: i64,
    pub destiny_location_id: i64,
    pub vehicle_id: i64,
    pub driver_id: i64,
    pub dispatch_time: Option<NaiveDateTime>,
    pub arrival_time: Option<NaiveDateTime>,
    pub cargo_description: Option<String>,
}

impl Transaction {
    pub const SORT_FIELDS: &'static [SortField] = &[
        SortField { name: "id", column: "id" },
        SortField { name: "originLocationId", column: "origin_location_id" },
        SortField { name: "destinyLocationId", column: "destiny_location_id" },
        SortField { name: "vehicleId", column: "vehicle_id" },
        SortField { name: "driverId", column: "driver_id" },
        SortField { name: "dispatchTime", column: "dispatch_time" },
        SortField { name: "arrivalTime", column: "arrival_time" },
    ];

    pub fn from_new(id: i64, new: NewTransaction) -> Self {
        Self {
            id,
            origin_location_id: new.origin_location_id,
            destiny_location_id: new.destiny_location_id,
            vehicle_id: new.vehicle_id,
            driver_id: new.driver_id,
            dispatch_time: new.dispatch_time,
            arrival_time: new.arrival_time,
            cargo_description: new.cargo_description,
        }
    }

    pub fn state(&self) -> TransactionState {
        match (self.dispatch_time, self.arrival_time) {
            (None, _) => TransactionState::Pending,
            (Some(_), None) => TransactionState::Ongoing,
            (Some(_), Some(_)) => TransactionState::Completed,
        }
    }

    pub fn is_ongoing(&self) -> bool {
        self.state() == TransactionState::Ongoing
    }

    /// Misma condición que la consulta `has_ongoing_transaction` en SQL
    pub fn blocks(&self, vehicle_id: i64, driver_id: i64) -> bool {
        self.is_ongoing() && (self.vehicle_id == vehicle_id || self.driver_id == driver_id)
    }
}

impl Sortable for Transaction {
    fn id(&self) -> i64 {
        self.id
    }

    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "origin_location_id" => SortValue::Int(self.origin_location_id),
            "destiny_location_id" => SortValue::Int(self.destiny_location_id),
            "vehicle_id" => SortValue::Int(self.vehicle_id),
            "driver_id" => SortValue::Int(self.driver_id),
            "dispatch_time" => SortValue::Time(self.dispatch_time),
            "arrival_time" => SortValue::Time(self.arrival_time),
            _ => SortValue::Int(self.id),
        }
    }
}
