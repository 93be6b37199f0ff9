//! Modelo de Device
//!
//! Dispositivos IoT (rastreadores, sensores, gateways) con ubicación
//! opcional y la fecha del último reporte.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

use crate::utils::pagination::{SortField, SortValue, Sortable};

/// Tipo de dispositivo - mapea al ENUM device_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "device_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceType {
    Tracker,
    Sensor,
    Gateway,
    Weather,
}

/// Estado del dispositivo - mapea al ENUM device_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "device_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceStatus {
    Active,
    Inactive,
    Maintenance,
    Error,
}

#[derive(Debug, Clone, Serialize, FromRow, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: i64,
    pub name: String,
    pub location_id: Option<i64>,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub status: DeviceStatus,
    pub last_tracking: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDevice {
    pub name: String,
    pub location_id: Option<i64>,
    pub device_type: DeviceType,
    pub status: DeviceStatus,
    pub last_tracking: Option<NaiveDateTime>,
}

impl Device {
    pub const SORT_FIELDS: &'static [SortField] = &[
        SortField { name: "id", column: "id" },
        SortField { name: "name", column: "name" },
        SortField { name: "type", column: "device_type" },
        SortField { name: "status", column: "status" },
        SortField { name: "lastTracking", column: "last_tracking" },
    ];

    pub fn from_new(id: i64, new: NewDevice) -> Self {
        Self {
            id,
            name: new.name,
            location_id: new.location_id,
            device_type: new.device_type,
            status: new.status,
            last_tracking: new.last_tracking,
        }
    }
}

impl Sortable for Device {
    fn id(&self) -> i64 {
        self.id
    }

    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "name" => SortValue::Text(self.name.clone()),
            "device_type" => SortValue::Int(self.device_type as i64),
            "status" => SortValue::Int(self.status as i64),
            "last_tracking" => SortValue::Time(self.last_tracking),
            _ => SortValue::Int(self.id),
        }
    }
}
