use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{catalog::CatalogCar, common::NamedEntity, vehicle::VehicleProfile};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Persisted document holding fleet vehicles and catalog cars.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Garage {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub vehicles: Vec<VehicleProfile>,
    #[serde(default)]
    pub catalog: Vec<CatalogCar>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Garage::schema_version_default")]
    pub schema_version: u8,
}

impl Garage {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            vehicles: Vec::new(),
            catalog: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_vehicle(&mut self, vehicle: VehicleProfile) -> Uuid {
        let id = vehicle.id;
        self.vehicles.push(vehicle);
        self.touch();
        id
    }

    pub fn add_catalog_car(&mut self, car: CatalogCar) -> Uuid {
        let id = car.id;
        self.catalog.push(car);
        self.touch();
        id
    }

    pub fn vehicle(&self, id: Uuid) -> Option<&VehicleProfile> {
        self.vehicles.iter().find(|vehicle| vehicle.id == id)
    }

    pub fn vehicle_mut(&mut self, id: Uuid) -> Option<&mut VehicleProfile> {
        self.vehicles.iter_mut().find(|vehicle| vehicle.id == id)
    }

    pub fn vehicle_by_name(&self, name: &str) -> Option<&VehicleProfile> {
        self.vehicles.iter().find(|vehicle| vehicle.name_matches(name))
    }

    pub fn catalog_car(&self, id: Uuid) -> Option<&CatalogCar> {
        self.catalog.iter().find(|car| car.id == id)
    }

    pub fn catalog_car_mut(&mut self, id: Uuid) -> Option<&mut CatalogCar> {
        self.catalog.iter_mut().find(|car| car.id == id)
    }

    pub fn catalog_by_name(&self, name: &str) -> Option<&CatalogCar> {
        self.catalog.iter().find(|car| car.name_matches(name))
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty() && self.catalog.is_empty()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

impl Default for Garage {
    fn default() -> Self {
        Self::new("default")
    }
}
