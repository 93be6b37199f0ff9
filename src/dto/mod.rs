//! DTOs de la API
//!
//! Cuerpos de request validados con `validator` y responses serializadas en
//! camelCase.

pub mod device_dto;
pub mod driver_dto;
pub mod location_dto;
pub mod transaction_dto;
pub mod vehicle_dto;

pub use device_dto::DeviceRequest;
pub use driver_dto::DriverRequest;
pub use location_dto::LocationRequest;
pub use transaction_dto::{TransactionRequest, TransactionResponse};
pub use vehicle_dto::VehicleRequest;
