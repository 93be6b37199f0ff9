use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::models::{LocationType, NewLocation};
use crate::utils::validation::{validate_coordinates, validate_not_blank};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_location_coordinates"))]
pub struct LocationRequest {
    #[validate(length(min = 3, max = 64), custom = "validate_not_blank")]
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "type")]
    pub location_type: LocationType,
}

fn validate_location_coordinates(request: &LocationRequest) -> Result<(), ValidationError> {
    validate_coordinates(request.latitude, request.longitude)
}

impl LocationRequest {
    pub fn into_new(self) -> NewLocation {
        NewLocation {
            name: self.name.trim().to_string(),
            latitude: self.latitude,
            longitude: self.longitude,
            location_type: self.location_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(name: &str, latitude: f64) -> LocationRequest {
        serde_json::from_value(json!({
            "name": name,
            "latitude": latitude,
            "longitude": -46.63,
            "type": "DISTRIBUTION_CENTER"
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_location() {
        let request = request("CD São Paulo", -23.55);
        assert!(request.validate().is_ok());
        assert_eq!(request.into_new().location_type, LocationType::DistributionCenter);
    }

    #[test]
    fn test_invalid_name_and_coordinates() {
        assert!(request("CD", -23.55).validate().is_err());
        assert!(request("    ", -23.55).validate().is_err());
        assert!(request("CD São Paulo", -95.0).validate().is_err());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let parsed: Result<LocationRequest, _> = serde_json::from_value(json!({
            "name": "Porto",
            "latitude": 0.0,
            "longitude": 0.0,
            "type": "HARBOUR"
        }));
        assert!(parsed.is_err());
    }
}
