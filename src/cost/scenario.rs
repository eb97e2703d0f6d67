//! Monthly cost of each acquisition scenario.

use serde::{Deserialize, Serialize};

use crate::core::errors::Result;

use super::{
    depreciation::depreciated_value,
    params::{ensure_non_negative, ScenarioParameters},
    tax::benefit_tax_with_threshold,
};

/// Components of the net monthly cost of a business lease.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BusinessLeaseBreakdown {
    pub benefit_tax: f64,
    pub forfeited_budget: f64,
    /// Net-of-tax lease amount above the mobility budget; negative below it.
    pub excess_lease: f64,
}

impl BusinessLeaseBreakdown {
    pub fn total(&self) -> f64 {
        self.benefit_tax + self.forfeited_budget + self.excess_lease
    }
}

pub fn annual_fuel_cost(
    is_ev: bool,
    km_per_year: f64,
    fuel_cost_per_km: f64,
    ev_cost_per_km: f64,
) -> f64 {
    let per_km = if is_ev { ev_cost_per_km } else { fuel_cost_per_km };
    km_per_year * per_km
}

pub fn business_lease_breakdown(
    monthly_lease: f64,
    catalog_value: f64,
    is_ev: bool,
    params: &ScenarioParameters,
) -> Result<BusinessLeaseBreakdown> {
    ensure_non_negative("monthly lease", monthly_lease)?;
    let tax = benefit_tax_with_threshold(
        catalog_value,
        is_ev,
        params.benefit_rate_ev_low,
        params.benefit_rate_standard,
        params.tax_rate,
        params.benefit_ev_threshold,
    )?;
    let keep_share = 1.0 - params.tax_rate;
    let budget = params.mobility_budget_monthly;
    Ok(BusinessLeaseBreakdown {
        benefit_tax: tax.net_monthly(),
        forfeited_budget: budget * 12.0 * keep_share / 12.0,
        excess_lease: (monthly_lease - budget) * keep_share,
    })
}

pub fn business_lease_monthly_cost(
    monthly_lease: f64,
    catalog_value: f64,
    is_ev: bool,
    params: &ScenarioParameters,
) -> Result<f64> {
    business_lease_breakdown(monthly_lease, catalog_value, is_ev, params).map(|b| b.total())
}

/// Lease instalment plus fuel, which personal leases do not bundle.
pub fn personal_lease_monthly_cost(
    monthly_lease: f64,
    is_ev: bool,
    km_per_year: f64,
    fuel_cost_per_km: f64,
    ev_cost_per_km: f64,
) -> Result<f64> {
    ensure_non_negative("monthly lease", monthly_lease)?;
    ensure_non_negative("annual kilometers", km_per_year)?;
    let fuel = annual_fuel_cost(is_ev, km_per_year, fuel_cost_per_km, ev_cost_per_km);
    Ok(monthly_lease + fuel / 12.0)
}

/// Running costs of an owned car plus the depreciation loss of `month`.
///
/// The opportunity cost is charged on the full purchase price for every month.
pub fn cash_purchase_monthly_cost(
    purchase_price: f64,
    is_used: bool,
    month: u32,
    is_ev: bool,
    params: &ScenarioParameters,
) -> Result<f64> {
    let depreciation = depreciated_value(
        purchase_price,
        month,
        params.decay_rate(is_used),
        params.residual_fraction,
    )?;
    Ok(cash_running_cost(purchase_price, is_ev, params) + depreciation.monthly)
}

/// The month-invariant part of the cash scenario.
pub(crate) fn cash_running_cost(
    purchase_price: f64,
    is_ev: bool,
    params: &ScenarioParameters,
) -> f64 {
    let fuel = annual_fuel_cost(
        is_ev,
        params.km_per_year,
        params.fuel_cost_per_km,
        params.ev_cost_per_km,
    );
    let opportunity = purchase_price * params.opportunity_rate;
    fuel / 12.0
        + params.maintenance_yearly / 12.0
        + params.insurance_monthly
        + opportunity / 12.0
        + params.road_tax_yearly / 12.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn business_lease_at_budget_has_no_excess() {
        let params = ScenarioParameters::default();
        let breakdown = business_lease_breakdown(650.0, 40_000.0, true, &params).unwrap();
        assert!(close(breakdown.benefit_tax, 2_701.0 / 12.0));
        assert!(close(breakdown.forfeited_budget, 409.5));
        assert!(close(breakdown.excess_lease, 0.0));
    }

    #[test]
    fn business_lease_below_budget_yields_rebate() {
        let params = ScenarioParameters::default();
        let at_budget = business_lease_monthly_cost(650.0, 40_000.0, true, &params).unwrap();
        let below = business_lease_monthly_cost(500.0, 40_000.0, true, &params).unwrap();
        assert!(close(at_budget - below, 150.0 * 0.63));
    }

    #[test]
    fn personal_lease_adds_fuel() {
        let cost = personal_lease_monthly_cost(450.0, true, 15_000.0, 0.12, 0.08).unwrap();
        assert!(close(cost, 550.0));
        let petrol = personal_lease_monthly_cost(450.0, false, 15_000.0, 0.12, 0.08).unwrap();
        assert!(close(petrol, 600.0));
    }

    #[test]
    fn cash_cost_combines_running_costs_and_depreciation() {
        let params = ScenarioParameters::default();
        let cost = cash_purchase_monthly_cost(17_000.0, true, 1, true, &params).unwrap();
        let running = 1_200.0 / 12.0 + 500.0 / 12.0 + 265.0 + 17_000.0 * 0.06 / 12.0 + 850.0 / 12.0;
        let value = 17_000.0 * (-0.08_f64 * (0.5 / 12.0)).exp();
        assert!((cost - (running + 0.08 / 12.0 * value)).abs() < 1e-9);
    }
}
