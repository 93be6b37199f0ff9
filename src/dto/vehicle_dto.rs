use serde::Deserialize;
use validator::Validate;

use crate::models::NewVehicle;
use crate::utils::validation::{validate_not_blank, PLATE_PATTERN};

// Request para crear o reemplazar un vehículo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRequest {
    #[validate(length(min = 3, max = 32), custom = "validate_not_blank")]
    pub name: String,
    #[validate(regex = "PLATE_PATTERN")]
    pub plate: String,
    #[serde(default)]
    pub device_id: Option<i64>,
}

impl VehicleRequest {
    pub fn into_new(self) -> NewVehicle {
        NewVehicle {
            name: self.name.trim().to_string(),
            plate: self.plate,
            device_id: self.device_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, plate: &str) -> VehicleRequest {
        VehicleRequest {
            name: name.to_string(),
            plate: plate.to_string(),
            device_id: None,
        }
    }

    #[test]
    fn test_plate_format() {
        assert!(request("Volvo FH", "ABC1D23").validate().is_ok());
        assert!(request("Volvo FH", "ABC1234").validate().is_ok());
        assert!(request("Volvo FH", "abc1234").validate().is_err());
        assert!(request("Volvo FH", "ABC-123").validate().is_err());
        assert!(request("Volvo FH", "ABC12345").validate().is_err());
    }

    #[test]
    fn test_name_length() {
        assert!(request("VW", "ABC1234").validate().is_err());
        assert!(request(&"V".repeat(33), "ABC1234").validate().is_err());
    }
}
