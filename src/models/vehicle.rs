//! Modelo de Vehicle
//!
//! Mapea a la tabla `vehicles`. El dispositivo rastreador es una
//! referencia opcional por id.

use serde::Serialize;
use sqlx::FromRow;

use crate::utils::pagination::{SortField, SortValue, Sortable};

#[derive(Debug, Clone, Serialize, FromRow, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i64,
    pub name: String,
    pub plate: String,
    pub device_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVehicle {
    pub name: String,
    pub plate: String,
    pub device_id: Option<i64>,
}

impl Vehicle {
    pub const SORT_FIELDS: &'static [SortField] = &[
        SortField { name: "id", column: "id" },
        SortField { name: "name", column: "name" },
        SortField { name: "plate", column: "plate" },
    ];

    pub fn from_new(id: i64, new: NewVehicle) -> Self {
        Self {
            id,
            name: new.name,
            plate: new.plate,
            device_id: new.device_id,
        }
    }
}

impl Sortable for Vehicle {
    fn id(&self) -> i64 {
        self.id
    }

    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "name" => SortValue::Text(self.name.clone()),
            "plate" => SortValue::Text(self.plate.clone()),
            _ => SortValue::Int(self.id),
        }
    }
}
