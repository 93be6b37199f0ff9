//! Cálculo de distancia geodésica (fórmula de Haversine)

use serde::Serialize;

/// Radio medio de la Tierra en kilómetros
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Par latitud/longitud en grados
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Distancia de gran círculo en kilómetros entre dos puntos
pub fn haversine_distance(origin: Coordinates, destiny: Coordinates) -> f64 {
    let delta_lat = (destiny.latitude - origin.latitude).to_radians();
    let delta_lon = (destiny.longitude - origin.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + origin.latitude.to_radians().cos()
            * destiny.latitude.to_radians().cos()
            * (delta_lon / 2.0).sin().powi(2);
    // El redondeo puede dejar `a` fuera de [0, 1] en puntos antípodas
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
