//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL. Las relaciones entre entidades son ids, nunca
//! referencias a objetos.

pub mod device;
pub mod driver;
pub mod location;
pub mod transaction;
pub mod vehicle;

pub use device::{Device, DeviceStatus, DeviceType, NewDevice};
pub use driver::{Driver, NewDriver};
pub use location::{Location, LocationType, NewLocation};
pub use transaction::{NewTransaction, Transaction, TransactionState};
pub use vehicle::{NewVehicle, Vehicle};
