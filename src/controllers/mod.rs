//! Controladores de registros
//!
//! CRUD de localizaciones, vehículos, conductores y dispositivos. Las
//! referencias opcionales se validan antes de escribir.

pub mod device_controller;
pub mod driver_controller;
pub mod location_controller;
pub mod vehicle_controller;

pub use device_controller::DeviceController;
pub use driver_controller::DriverController;
pub use location_controller::LocationController;
pub use vehicle_controller::VehicleController;
