//! Per-vehicle running totals for the stored fleet.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::errors::Result;
use crate::domain::{AcquisitionType, VehicleProfile};

use super::{
    depreciation::depreciated_value,
    params::{ensure_horizon, ensure_non_negative, RoundingPolicy, ScenarioParameters},
    scenario::{business_lease_monthly_cost, personal_lease_monthly_cost},
    series::CostSeries,
};

pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Cumulative cost of one vehicle, month by month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FleetCost {
    pub vehicle_id: Uuid,
    pub name: String,
    pub totals: CostSeries,
}

impl FleetCost {
    /// Net total cost at the end of the horizon.
    pub fn final_total(&self) -> f64 {
        self.totals.last().unwrap_or(0.0)
    }

    /// Per-month amounts behind the running totals.
    pub fn monthly(&self) -> CostSeries {
        self.totals.deltas()
    }
}

/// Running total of what `vehicle` costs over `years`.
///
/// A bought vehicle is paid for in month 1, accrues running costs plus the
/// month's depreciation, and its remaining value is credited in the last
/// month as if it were sold then. Leased vehicles accrue their scenario cost.
pub fn cost_over_time(
    vehicle: &VehicleProfile,
    years: u32,
    km_per_year: f64,
    params: &ScenarioParameters,
) -> Result<CostSeries> {
    ensure_horizon(years)?;
    ensure_non_negative("annual kilometers", km_per_year)?;
    vehicle.validate()?;

    let horizon = years * 12;
    let fuel_monthly = km_per_year * vehicle.fuel_per_km / 12.0;
    let lease_monthly = match vehicle.acquisition {
        AcquisitionType::Cash => 0.0,
        AcquisitionType::BusinessLease => business_lease_monthly_cost(
            vehicle.monthly_lease,
            vehicle.catalog_value,
            vehicle.is_ev,
            params,
        )?,
        AcquisitionType::PersonalLease => personal_lease_monthly_cost(
            vehicle.monthly_lease,
            vehicle.is_ev,
            km_per_year,
            vehicle.fuel_per_km,
            vehicle.fuel_per_km,
        )?,
    };

    let mut totals = Vec::with_capacity(horizon as usize);
    let mut running = 0.0;
    for month in 1..=horizon {
        let step = if vehicle.acquisition.is_lease() {
            lease_monthly
        } else {
            let depreciation = depreciated_value(
                vehicle.purchase_cost,
                month,
                vehicle.depreciation_k,
                params.residual_fraction,
            )?;
            let mut step = fuel_monthly
                + vehicle.insurance_monthly
                + vehicle.road_tax_yearly / 12.0
                + depreciation.monthly;
            if month == 1 {
                step += vehicle.purchase_cost;
            }
            if month == horizon {
                step -= depreciation.value;
            }
            step
        };
        running += step;
        if params.rounding == RoundingPolicy::PerStep {
            running = round_cents(running);
        }
        totals.push(running);
    }

    if params.rounding == RoundingPolicy::FinalOnly {
        totals.iter_mut().for_each(|total| *total = round_cents(*total));
    }
    Ok(CostSeries::new(totals))
}

/// Projects every vehicle independently, keeping input order.
pub fn simulate_fleet(
    vehicles: &[VehicleProfile],
    years: u32,
    km_per_year: f64,
    params: &ScenarioParameters,
) -> Result<Vec<FleetCost>> {
    tracing::debug!(vehicles = vehicles.len(), years, "simulating fleet");
    vehicles
        .iter()
        .map(|vehicle| {
            Ok(FleetCost {
                vehicle_id: vehicle.id,
                name: vehicle.name.clone(),
                totals: cost_over_time(vehicle, years, km_per_year, params)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::CostError;
    use crate::domain::YearMonth;

    fn tesla() -> VehicleProfile {
        let bought = YearMonth::new(2025, 11).unwrap();
        VehicleProfile::new("tesla_model_3", AcquisitionType::Cash, bought)
            .with_build(YearMonth::new(2019, 1).unwrap())
            .with_purchase_cost(18_000.0)
            .with_running_costs(1_000.0, 280.0, 0.08)
            .with_depreciation(0.08)
    }

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round_cents(10.005_1), 10.01);
        assert_eq!(round_cents(-3.333), -3.33);
    }

    #[test]
    fn purchase_lands_in_first_month() {
        let params = ScenarioParameters::default();
        let totals = cost_over_time(&tesla(), 4, 15_000.0, &params).unwrap();
        assert_eq!(totals.len(), 48);
        let first = totals.month(1).unwrap();
        assert!(first > 18_000.0);
        assert!(first < 18_000.0 + 1_000.0);
    }

    #[test]
    fn lease_vehicle_accrues_flat_cost() {
        let params = ScenarioParameters::default();
        let start = YearMonth::new(2025, 1).unwrap();
        let lease = VehicleProfile::new("lease", AcquisitionType::PersonalLease, start)
            .with_running_costs(0.0, 0.0, 0.08)
            .with_lease(450.0, 40_000.0, true);
        let totals = cost_over_time(&lease, 1, 15_000.0, &params).unwrap();
        assert_eq!(totals.month(1), Some(550.0));
        assert_eq!(totals.last(), Some(6_600.0));
    }

    #[test]
    fn zero_years_is_degenerate() {
        let params = ScenarioParameters::default();
        let err = cost_over_time(&tesla(), 0, 15_000.0, &params).unwrap_err();
        assert!(matches!(err, CostError::DivisionDegenerate(_)));
    }
}
