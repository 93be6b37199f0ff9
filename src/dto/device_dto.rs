use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

use crate::models::{DeviceStatus, DeviceType, NewDevice};
use crate::utils::validation::validate_not_blank;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRequest {
    #[validate(length(min = 3, max = 64), custom = "validate_not_blank")]
    pub name: String,
    #[serde(default)]
    pub location_id: Option<i64>,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub status: DeviceStatus,
    #[serde(default)]
    pub last_tracking: Option<NaiveDateTime>,
}

impl DeviceRequest {
    pub fn into_new(self) -> NewDevice {
        NewDevice {
            name: self.name.trim().to_string(),
            location_id: self.location_id,
            device_type: self.device_type,
            status: self.status,
            last_tracking: self.last_tracking,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_device_request_from_json() {
        let request: DeviceRequest = serde_json::from_value(json!({
            "name": "Gateway Norte",
            "locationId": 4,
            "type": "GATEWAY",
            "status": "MAINTENANCE",
            "lastTracking": "2024-03-10T09:30:00.250"
        }))
        .unwrap();
        assert!(request.validate().is_ok());

        let new = request.into_new();
        assert_eq!(new.device_type, DeviceType::Gateway);
        assert_eq!(new.status, DeviceStatus::Maintenance);
        assert_eq!(new.location_id, Some(4));
    }
}
