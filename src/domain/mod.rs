//! Vehicle records, catalog entries and the garage document that stores them.

pub mod catalog;
pub mod common;
pub mod garage;
pub mod vehicle;

pub use catalog::{CatalogCar, FuelType};
pub use common::{Displayable, Identifiable, NamedEntity, YearMonth};
pub use garage::Garage;
pub use vehicle::{AcquisitionType, VehicleProfile};
