use serde::{Deserialize, Serialize};

use crate::core::errors::Result;
use crate::domain::CatalogCar;

use super::{
    params::{ensure_horizon, ensure_non_negative, ScenarioParameters},
    scenario::{
        business_lease_monthly_cost, cash_purchase_monthly_cost, personal_lease_monthly_cost,
    },
};

/// Month-indexed cost values. Index 0 holds month 1.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct CostSeries(Vec<f64>);

impl CostSeries {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn constant(value: f64, months: usize) -> Self {
        Self(vec![value; months])
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value of a 1-based month.
    pub fn month(&self, month: usize) -> Option<f64> {
        month.checked_sub(1).and_then(|idx| self.0.get(idx)).copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.0.last().copied()
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn mean(&self) -> f64 {
        if self.0.is_empty() {
            0.0
        } else {
            self.total() / self.0.len() as f64
        }
    }

    /// Running totals of a per-month series.
    pub fn cumulative(&self) -> CostSeries {
        let mut running = 0.0;
        CostSeries(
            self.0
                .iter()
                .map(|value| {
                    running += value;
                    running
                })
                .collect(),
        )
    }

    /// Per-month amounts recovered from a cumulative series.
    pub fn deltas(&self) -> CostSeries {
        let mut previous = 0.0;
        CostSeries(
            self.0
                .iter()
                .map(|value| {
                    let delta = value - previous;
                    previous = *value;
                    delta
                })
                .collect(),
        )
    }
}

/// Vehicle-specific inputs for one three-way comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioInputs {
    pub business_lease_monthly: f64,
    pub personal_lease_monthly: f64,
    pub purchase_price: f64,
    pub is_used: bool,
    pub catalog_value: f64,
    pub is_ev: bool,
}

impl Default for ScenarioInputs {
    fn default() -> Self {
        Self {
            business_lease_monthly: 500.0,
            personal_lease_monthly: 450.0,
            purchase_price: 17_000.0,
            is_used: true,
            catalog_value: 40_000.0,
            is_ev: true,
        }
    }
}

impl ScenarioInputs {
    pub fn from_catalog(car: &CatalogCar, is_used: bool) -> Self {
        Self {
            business_lease_monthly: car.business_lease_monthly,
            personal_lease_monthly: car.personal_lease_monthly,
            purchase_price: car.purchase_price(is_used),
            is_used,
            catalog_value: car.cataloguswaarde,
            is_ev: car.is_ev,
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("business lease", self.business_lease_monthly)?;
        ensure_non_negative("personal lease", self.personal_lease_monthly)?;
        ensure_non_negative("purchase price", self.purchase_price)?;
        ensure_non_negative("catalog value", self.catalog_value)?;
        Ok(())
    }
}

/// Per-month cost of the three scenarios over the same horizon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostComparison {
    pub months: Vec<u32>,
    pub business_lease: CostSeries,
    pub personal_lease: CostSeries,
    pub cash: CostSeries,
}

impl CostComparison {
    pub fn horizon_months(&self) -> usize {
        self.months.len()
    }
}

/// Evaluates every scenario once per month for `params.years * 12` months.
///
/// Lease costs do not depend on the month, so their series are flat.
pub fn generate_cost_series(
    inputs: &ScenarioInputs,
    params: &ScenarioParameters,
) -> Result<CostComparison> {
    ensure_horizon(params.years)?;
    params.validate()?;
    inputs.validate()?;

    let horizon = params.months();
    tracing::debug!(months = horizon, "generating cost series");
    let months: Vec<u32> = (1..=horizon).collect();

    let business = business_lease_monthly_cost(
        inputs.business_lease_monthly,
        inputs.catalog_value,
        inputs.is_ev,
        params,
    )?;
    let personal = personal_lease_monthly_cost(
        inputs.personal_lease_monthly,
        inputs.is_ev,
        params.km_per_year,
        params.fuel_cost_per_km,
        params.ev_cost_per_km,
    )?;
    let cash = months
        .iter()
        .map(|&month| {
            cash_purchase_monthly_cost(
                inputs.purchase_price,
                inputs.is_used,
                month,
                inputs.is_ev,
                params,
            )
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CostComparison {
        business_lease: CostSeries::constant(business, months.len()),
        personal_lease: CostSeries::constant(personal, months.len()),
        cash: CostSeries::new(cash),
        months,
    })
}
