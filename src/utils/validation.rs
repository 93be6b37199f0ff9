//! Utilidades de validación
//!
//! Este módulo contiene funciones helper usadas por los atributos
//! `#[validate(...)]` de los DTOs.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Placa de vehículo: 7 caracteres, letras mayúsculas o dígitos (ABC1234, ABC1D23)
    pub static ref PLATE_PATTERN: Regex = Regex::new(r"^[A-Z0-9]{7}$").unwrap();
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de coordenadas GPS
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&lat) {
        let mut error = ValidationError::new("latitude");
        error.add_param("value".into(), &lat);
        error.add_param("range".into(), &"-90.0 to 90.0".to_string());
        return Err(error);
    }

    if !(-180.0..=180.0).contains(&lng) {
        let mut error = ValidationError::new("longitude");
        error.add_param("value".into(), &lng);
        error.add_param("range".into(), &"-180.0 to 180.0".to_string());
        return Err(error);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Depot").is_ok());
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("").is_err());
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(45.0, -75.0).is_ok());
        assert!(validate_coordinates(90.0, 180.0).is_ok());
        assert!(validate_coordinates(91.0, -75.0).is_err());
        assert!(validate_coordinates(45.0, -181.0).is_err());
    }

    #[test]
    fn test_plate_pattern() {
        assert!(PLATE_PATTERN.is_match("ABC1234"));
        assert!(PLATE_PATTERN.is_match("BRA2E19"));
        assert!(!PLATE_PATTERN.is_match("abc1234"));
        assert!(!PLATE_PATTERN.is_match("ABC-123"));
        assert!(!PLATE_PATTERN.is_match("ABC12345"));
    }
}
