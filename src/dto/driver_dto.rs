use serde::Deserialize;
use validator::Validate;

use crate::models::NewDriver;
use crate::utils::validation::validate_not_blank;

#[derive(Debug, Deserialize, Validate)]
pub struct DriverRequest {
    #[validate(length(min = 3, max = 64), custom = "validate_not_blank")]
    pub name: String,
}

impl DriverRequest {
    pub fn into_new(self) -> NewDriver {
        NewDriver {
            name: self.name.trim().to_string(),
        }
    }
}
