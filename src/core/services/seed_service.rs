use crate::domain::{AcquisitionType, CatalogCar, FuelType, Garage, VehicleProfile, YearMonth};

use super::{CatalogService, ServiceResult, VehicleService};

/// Populates an empty garage with the sample fleet and catalog.
pub struct SeedService;

impl SeedService {
    /// Returns the number of records inserted; zero when the garage already has data.
    pub fn seed(garage: &mut Garage) -> ServiceResult<usize> {
        if !garage.is_empty() {
            tracing::info!(garage = %garage.name, "garage already seeded, skipping");
            return Ok(0);
        }
        let mut inserted = VehicleService::bulk_add(garage, Self::sample_vehicles()?)?;
        for car in Self::sample_catalog() {
            CatalogService::add(garage, car)?;
            inserted += 1;
        }
        tracing::info!(garage = %garage.name, inserted, "seeded garage");
        Ok(inserted)
    }

    pub fn sample_vehicles() -> ServiceResult<Vec<VehicleProfile>> {
        let bought = YearMonth::new(2025, 11)?;
        Ok(vec![
            VehicleProfile::new("tesla_model_3", AcquisitionType::Cash, bought)
                .with_build(YearMonth::new(2019, 1)?)
                .with_purchase_cost(18_000.0)
                .with_running_costs(1_000.0, 280.0, 0.08)
                .with_depreciation(0.08),
            VehicleProfile::new("opel_corsa_e", AcquisitionType::Cash, bought)
                .with_build(YearMonth::new(2022, 1)?)
                .with_purchase_cost(17_000.0)
                .with_running_costs(700.0, 180.0, 0.08)
                .with_depreciation(0.08),
        ])
    }

    pub fn sample_catalog() -> Vec<CatalogCar> {
        let mut tesla = CatalogCar::new("Tesla Model 3 LR", 47_000.0, 51_000.0);
        tesla.purchase_price_used = Some(17_000.0);
        tesla.business_lease_monthly = 500.0;
        tesla.personal_lease_monthly = 450.0;

        let mut bmw = CatalogCar::new("BMW 3 Series", 45_000.0, 45_000.0);
        bmw.purchase_price_used = Some(20_000.0);
        bmw.is_ev = false;
        bmw.fuel_type = FuelType::Petrol;
        bmw.fuel_cost_per_km = 0.12;
        bmw.insurance_monthly_cash = 150.0;
        bmw.maintenance_yearly_cash = 800.0;
        bmw.road_taxes_yearly_cash = 800.0;

        vec![tesla, bmw]
    }
}
