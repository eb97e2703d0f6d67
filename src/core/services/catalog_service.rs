use uuid::Uuid;

use crate::core::errors::CostError;
use crate::domain::{CatalogCar, Garage, NamedEntity};

use super::ServiceResult;

pub struct CatalogService;

impl CatalogService {
    pub fn add(garage: &mut Garage, car: CatalogCar) -> ServiceResult<Uuid> {
        car.validate()?;
        Self::validate_name(garage, None, &car.name)?;
        Ok(garage.add_catalog_car(car))
    }

    pub fn edit(garage: &mut Garage, id: Uuid, changes: CatalogCar) -> ServiceResult<()> {
        changes.validate()?;
        Self::validate_name(garage, Some(id), &changes.name)?;
        let car = garage
            .catalog_car_mut(id)
            .ok_or_else(|| CostError::VehicleNotFound(id.to_string()))?;
        *car = CatalogCar { id, ..changes };
        garage.touch();
        Ok(())
    }

    pub fn remove(garage: &mut Garage, id: Uuid) -> ServiceResult<CatalogCar> {
        let position = garage
            .catalog
            .iter()
            .position(|car| car.id == id)
            .ok_or_else(|| CostError::VehicleNotFound(id.to_string()))?;
        let removed = garage.catalog.remove(position);
        garage.touch();
        Ok(removed)
    }

    pub fn get(garage: &Garage, id: Uuid) -> ServiceResult<&CatalogCar> {
        garage
            .catalog_car(id)
            .ok_or_else(|| CostError::VehicleNotFound(id.to_string()).into())
    }

    pub fn find_by_name<'a>(garage: &'a Garage, name: &str) -> ServiceResult<&'a CatalogCar> {
        garage
            .catalog_by_name(name)
            .ok_or_else(|| CostError::VehicleNotFound(name.to_string()).into())
    }

    pub fn list(garage: &Garage) -> Vec<&CatalogCar> {
        garage.catalog.iter().collect()
    }

    fn validate_name(garage: &Garage, exclude: Option<Uuid>, candidate: &str) -> ServiceResult<()> {
        let duplicate = garage
            .catalog
            .iter()
            .any(|car| car.name_matches(candidate) && exclude.map_or(true, |id| car.id != id));
        if duplicate {
            Err(CostError::DuplicateVehicle(candidate.to_string()).into())
        } else {
            Ok(())
        }
    }
}
