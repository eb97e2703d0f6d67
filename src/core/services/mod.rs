pub mod catalog_service;
pub mod seed_service;
pub mod vehicle_service;

pub use catalog_service::CatalogService;
pub use seed_service::SeedService;
pub use vehicle_service::{VehicleQuery, VehicleService};

use crate::core::errors::CostError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Cost(#[from] CostError),
    #[error("{0}")]
    Invalid(String),
}
