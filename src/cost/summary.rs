use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::errors::{CostError, Result};

use super::{
    depreciation::depreciated_value,
    params::{ensure_horizon, ScenarioParameters},
    scenario::annual_fuel_cost,
    series::{CostComparison, CostSeries, ScenarioInputs},
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    BusinessLease,
    PersonalLease,
    CashPurchase,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [
        Scenario::BusinessLease,
        Scenario::PersonalLease,
        Scenario::CashPurchase,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Scenario::BusinessLease => "Business Lease",
            Scenario::PersonalLease => "Personal Lease",
            Scenario::CashPurchase => "Cash Purchase",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl CostComparison {
    pub fn series(&self, scenario: Scenario) -> &CostSeries {
        match scenario {
            Scenario::BusinessLease => &self.business_lease,
            Scenario::PersonalLease => &self.personal_lease,
            Scenario::CashPurchase => &self.cash,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioSummary {
    pub scenario: Scenario,
    pub monthly_average: f64,
    pub total: f64,
}

/// Headline figures of a comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonSummary {
    pub rows: Vec<ScenarioSummary>,
    /// Purchase price minus the modelled value in the final month.
    pub cash_depreciation: f64,
    pub annual_fuel_petrol: f64,
    pub annual_fuel_ev: f64,
}

impl ComparisonSummary {
    pub fn cheapest(&self) -> Option<&ScenarioSummary> {
        self.rows.iter().min_by(|a, b| a.total.total_cmp(&b.total))
    }
}

pub fn summarize(
    comparison: &CostComparison,
    inputs: &ScenarioInputs,
    params: &ScenarioParameters,
) -> Result<ComparisonSummary> {
    let rows = Scenario::ALL
        .iter()
        .map(|&scenario| {
            let series = comparison.series(scenario);
            ScenarioSummary {
                scenario,
                monthly_average: series.mean(),
                total: series.total(),
            }
        })
        .collect();

    let final_month = u32::try_from(comparison.horizon_months())
        .ok()
        .filter(|months| *months > 0)
        .ok_or_else(|| CostError::DivisionDegenerate("comparison holds no months".into()))?;
    let final_value = depreciated_value(
        inputs.purchase_price,
        final_month,
        params.decay_rate(inputs.is_used),
        params.residual_fraction,
    )?
    .value;

    Ok(ComparisonSummary {
        rows,
        cash_depreciation: inputs.purchase_price - final_value,
        annual_fuel_petrol: annual_fuel_cost(
            false,
            params.km_per_year,
            params.fuel_cost_per_km,
            params.ev_cost_per_km,
        ),
        annual_fuel_ev: annual_fuel_cost(
            true,
            params.km_per_year,
            params.fuel_cost_per_km,
            params.ev_cost_per_km,
        ),
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YearlyValue {
    pub year: u32,
    pub start_value: f64,
    pub end_value: f64,
    pub depreciation: f64,
}

/// Year-by-year value of a bought car.
///
/// A year's depreciation runs from its first month to its last, while the
/// start value carries the previous year's end value (the purchase price in
/// year one), so the two columns need not reconcile exactly.
pub fn yearly_values(
    purchase_price: f64,
    is_used: bool,
    params: &ScenarioParameters,
) -> Result<Vec<YearlyValue>> {
    ensure_horizon(params.years)?;
    let decay = params.decay_rate(is_used);
    let value_at = |month: u32| -> Result<f64> {
        Ok(depreciated_value(purchase_price, month, decay, params.residual_fraction)?.value)
    };

    let mut rows = Vec::with_capacity(params.years as usize);
    let mut start_value = purchase_price;
    for year in 1..=params.years {
        let end_value = value_at(year * 12)?;
        let first_month = value_at((year - 1) * 12 + 1)?;
        rows.push(YearlyValue {
            year,
            start_value,
            end_value,
            depreciation: first_month - end_value,
        });
        start_value = end_value;
    }
    Ok(rows)
}
