//! The cost-projection model: benefit tax, depreciation, per-scenario monthly
//! costs and the series built from them.
//!
//! Every function here is pure. Inputs are validated up front and rejected
//! with [`CostError::InvalidParameter`](crate::core::errors::CostError) or
//! [`CostError::DivisionDegenerate`](crate::core::errors::CostError) for an
//! empty horizon; the residual floor and the EV tax threshold are clamps of
//! the model, not errors.

pub mod depreciation;
pub mod fleet;
pub mod params;
pub mod scenario;
pub mod series;
pub mod summary;
pub mod tax;

pub use depreciation::{depreciated_value, Depreciation};
pub use fleet::{cost_over_time, simulate_fleet, FleetCost};
pub use params::{RoundingPolicy, ScenarioParameters};
pub use scenario::{
    annual_fuel_cost, business_lease_breakdown, business_lease_monthly_cost,
    cash_purchase_monthly_cost, personal_lease_monthly_cost, BusinessLeaseBreakdown,
};
pub use series::{generate_cost_series, CostComparison, CostSeries, ScenarioInputs};
pub use summary::{
    summarize, yearly_values, ComparisonSummary, Scenario, ScenarioSummary, YearlyValue,
};
pub use tax::{benefit_tax, benefit_tax_with_threshold, BenefitTax, BENEFIT_TAX_EV_THRESHOLD};
