use std::collections::HashSet;

use uuid::Uuid;

use crate::core::errors::CostError;
use crate::domain::{AcquisitionType, Garage, NamedEntity, VehicleProfile};

use super::{ServiceError, ServiceResult};

/// Optional filters for [`VehicleService::search`].
#[derive(Debug, Clone, Default)]
pub struct VehicleQuery {
    pub name_contains: Option<String>,
    pub acquisition: Option<AcquisitionType>,
}

pub struct VehicleService;

impl VehicleService {
    pub fn add(garage: &mut Garage, vehicle: VehicleProfile) -> ServiceResult<Uuid> {
        vehicle.validate()?;
        Self::validate_name(garage, None, &vehicle.name)?;
        tracing::debug!(name = %vehicle.name, "adding vehicle");
        Ok(garage.add_vehicle(vehicle))
    }

    /// Inserts every vehicle or none of them.
    pub fn bulk_add(garage: &mut Garage, vehicles: Vec<VehicleProfile>) -> ServiceResult<usize> {
        let mut seen = HashSet::new();
        for vehicle in &vehicles {
            vehicle.validate()?;
            Self::validate_name(garage, None, &vehicle.name)?;
            if !seen.insert(vehicle.name.trim().to_ascii_lowercase()) {
                return Err(ServiceError::Invalid(format!(
                    "Vehicle `{}` appears twice in the batch",
                    vehicle.name
                )));
            }
        }
        let count = vehicles.len();
        for vehicle in vehicles {
            garage.add_vehicle(vehicle);
        }
        Ok(count)
    }

    pub fn edit(garage: &mut Garage, id: Uuid, changes: VehicleProfile) -> ServiceResult<()> {
        changes.validate()?;
        Self::validate_name(garage, Some(id), &changes.name)?;
        let vehicle = garage
            .vehicle_mut(id)
            .ok_or_else(|| CostError::VehicleNotFound(id.to_string()))?;
        *vehicle = VehicleProfile { id, ..changes };
        garage.touch();
        Ok(())
    }

    pub fn remove(garage: &mut Garage, id: Uuid) -> ServiceResult<VehicleProfile> {
        let position = garage
            .vehicles
            .iter()
            .position(|vehicle| vehicle.id == id)
            .ok_or_else(|| CostError::VehicleNotFound(id.to_string()))?;
        let removed = garage.vehicles.remove(position);
        garage.touch();
        tracing::debug!(name = %removed.name, "removed vehicle");
        Ok(removed)
    }

    pub fn get(garage: &Garage, id: Uuid) -> ServiceResult<&VehicleProfile> {
        garage
            .vehicle(id)
            .ok_or_else(|| CostError::VehicleNotFound(id.to_string()).into())
    }

    pub fn find_by_name<'a>(garage: &'a Garage, name: &str) -> ServiceResult<&'a VehicleProfile> {
        garage
            .vehicle_by_name(name)
            .ok_or_else(|| CostError::VehicleNotFound(name.to_string()).into())
    }

    pub fn list(garage: &Garage) -> Vec<&VehicleProfile> {
        garage.vehicles.iter().collect()
    }

    pub fn search<'a>(garage: &'a Garage, query: &VehicleQuery) -> Vec<&'a VehicleProfile> {
        let needle = query
            .name_contains
            .as_deref()
            .map(|fragment| fragment.trim().to_ascii_lowercase());
        garage
            .vehicles
            .iter()
            .filter(|vehicle| {
                needle
                    .as_deref()
                    .map_or(true, |fragment| vehicle.name.to_ascii_lowercase().contains(fragment))
            })
            .filter(|vehicle| {
                query
                    .acquisition
                    .map_or(true, |kind| vehicle.acquisition == kind)
            })
            .collect()
    }

    fn validate_name(garage: &Garage, exclude: Option<Uuid>, candidate: &str) -> ServiceResult<()> {
        let duplicate = garage.vehicles.iter().any(|vehicle| {
            vehicle.name_matches(candidate) && exclude.map_or(true, |id| vehicle.id != id)
        });
        if duplicate {
            Err(CostError::DuplicateVehicle(candidate.to_string()).into())
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::YearMonth;

    fn vehicle(name: &str, acquisition: AcquisitionType) -> VehicleProfile {
        VehicleProfile::new(name, acquisition, YearMonth::new(2025, 1).unwrap())
            .with_purchase_cost(20_000.0)
            .with_running_costs(800.0, 180.0, 0.11)
    }

    #[test]
    fn names_are_unique_ignoring_case() {
        let mut garage = Garage::new("test");
        VehicleService::add(&mut garage, vehicle("BMW 3 Series", AcquisitionType::Cash)).unwrap();
        let err = VehicleService::add(&mut garage, vehicle("bmw 3 series", AcquisitionType::Cash))
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Cost(CostError::DuplicateVehicle(_))
        ));
    }

    #[test]
    fn edit_keeps_identity() {
        let mut garage = Garage::new("test");
        let id = VehicleService::add(&mut garage, vehicle("Corsa", AcquisitionType::Cash)).unwrap();
        let changes = vehicle("Corsa-e", AcquisitionType::Cash).with_purchase_cost(17_000.0);
        VehicleService::edit(&mut garage, id, changes).unwrap();
        let stored = VehicleService::get(&garage, id).unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.name, "Corsa-e");
        assert_eq!(stored.purchase_cost, 17_000.0);
    }

    #[test]
    fn remove_unknown_vehicle_fails() {
        let mut garage = Garage::new("test");
        let err = VehicleService::remove(&mut garage, Uuid::new_v4()).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Cost(CostError::VehicleNotFound(_))
        ));
    }

    #[test]
    fn search_filters_by_name_and_type() {
        let mut garage = Garage::new("test");
        VehicleService::bulk_add(
            &mut garage,
            vec![
                vehicle("Tesla Model 3", AcquisitionType::Cash),
                vehicle("Tesla Model Y", AcquisitionType::PersonalLease),
                vehicle("Opel Corsa-e", AcquisitionType::Cash),
            ],
        )
        .unwrap();
        let query = VehicleQuery {
            name_contains: Some("tesla".into()),
            acquisition: Some(AcquisitionType::Cash),
        };
        let found = VehicleService::search(&garage, &query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Tesla Model 3");
        assert_eq!(VehicleService::search(&garage, &VehicleQuery::default()).len(), 3);
    }

    #[test]
    fn bulk_add_is_all_or_nothing() {
        let mut garage = Garage::new("test");
        let result = VehicleService::bulk_add(
            &mut garage,
            vec![
                vehicle("Twin", AcquisitionType::Cash),
                vehicle("twin", AcquisitionType::Cash),
            ],
        );
        assert!(matches!(result, Err(ServiceError::Invalid(_))));
        assert!(garage.vehicles.is_empty());
    }
}
