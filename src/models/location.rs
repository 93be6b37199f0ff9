//! Modelo de Location
//!
//! Este módulo contiene el struct Location y su variante para CRUD operations.
//! Mapea exactamente a la tabla `locations` del schema PostgreSQL.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

use crate::services::geodesic::Coordinates;
use crate::utils::pagination::{SortField, SortValue, Sortable};

/// Tipo de localización - mapea al ENUM location_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "location_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    Warehouse,
    Depot,
    DistributionCenter,
    CustomerLocation,
}

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "type")]
    pub location_type: LocationType,
}

/// Campos persistidos de una Location (sin id)
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub location_type: LocationType,
}

impl Location {
    /// El primer campo es el orden por defecto del listado
    pub const SORT_FIELDS: &'static [SortField] = &[
        SortField { name: "name", column: "name" },
        SortField { name: "id", column: "id" },
        SortField { name: "latitude", column: "latitude" },
        SortField { name: "longitude", column: "longitude" },
        SortField { name: "type", column: "location_type" },
    ];

    pub fn from_new(id: i64, new: NewLocation) -> Self {
        Self {
            id,
            name: new.name,
            latitude: new.latitude,
            longitude: new.longitude,
            location_type: new.location_type,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Ambos ejes estrictamente dentro de la tolerancia
    pub fn is_near(&self, latitude: f64, longitude: f64, tolerance: f64) -> bool {
        (self.latitude - latitude).abs() < tolerance && (self.longitude - longitude).abs() < tolerance
    }
}

impl Sortable for Location {
    fn id(&self) -> i64 {
        self.id
    }

    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "name" => SortValue::Text(self.name.clone()),
            "latitude" => SortValue::Float(self.latitude),
            "longitude" => SortValue::Float(self.longitude),
            "location_type" => SortValue::Int(self.location_type as i64),
            _ => SortValue::Int(self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depot(latitude: f64, longitude: f64) -> Location {
        Location::from_new(
            1,
            NewLocation {
                name: "Depot".to_string(),
                latitude,
                longitude,
                location_type: LocationType::Depot,
            },
        )
    }

    #[test]
    fn test_is_near_uses_strict_tolerance_on_both_axes() {
        let location = depot(-23.5, -46.6);
        assert!(location.is_near(-23.505, -46.605, 0.01));
        assert!(!location.is_near(-23.52, -46.6, 0.01));
        assert!(!location.is_near(-23.5, -46.62, 0.01));
    }

    #[test]
    fn test_serializes_type_field() {
        let json = serde_json::to_value(depot(1.0, 2.0)).unwrap();
        assert_eq!(json["type"], "DEPOT");
        assert_eq!(json["latitude"], 1.0);
    }
}
