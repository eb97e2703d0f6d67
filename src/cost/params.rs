use serde::{Deserialize, Serialize};

use crate::core::errors::{CostError, Result};
use crate::domain::CatalogCar;

use super::tax::BENEFIT_TAX_EV_THRESHOLD;

/// Longest projection accepted, in years.
pub const MAX_HORIZON_YEARS: u32 = 100;

/// How the fleet running totals are rounded to cents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Every running total is rounded before the next month is added.
    #[default]
    PerStep,
    /// Totals accumulate at full precision and each output is rounded once.
    FinalOnly,
}

/// Global inputs shared by every scenario projection.
///
/// Defaults are the Dutch 2025 figures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScenarioParameters {
    pub years: u32,
    pub km_per_year: f64,
    pub tax_rate: f64,
    pub benefit_rate_ev_low: f64,
    pub benefit_rate_standard: f64,
    pub benefit_ev_threshold: f64,
    pub mobility_budget_monthly: f64,
    pub opportunity_rate: f64,
    pub residual_fraction: f64,
    pub decay_rate_new: f64,
    pub decay_rate_used: f64,
    pub fuel_cost_per_km: f64,
    pub ev_cost_per_km: f64,
    pub insurance_monthly: f64,
    pub maintenance_yearly: f64,
    pub road_tax_yearly: f64,
    pub rounding: RoundingPolicy,
}

impl Default for ScenarioParameters {
    fn default() -> Self {
        Self {
            years: 5,
            km_per_year: 15_000.0,
            tax_rate: 0.37,
            benefit_rate_ev_low: 0.17,
            benefit_rate_standard: 0.22,
            benefit_ev_threshold: BENEFIT_TAX_EV_THRESHOLD,
            mobility_budget_monthly: 650.0,
            opportunity_rate: 0.06,
            residual_fraction: 0.20,
            decay_rate_new: 0.15,
            decay_rate_used: 0.08,
            fuel_cost_per_km: 0.12,
            ev_cost_per_km: 0.08,
            insurance_monthly: 265.0,
            maintenance_yearly: 500.0,
            road_tax_yearly: 850.0,
            rounding: RoundingPolicy::PerStep,
        }
    }
}

impl ScenarioParameters {
    pub fn months(&self) -> u32 {
        self.years * 12
    }

    pub fn decay_rate(&self, is_used: bool) -> f64 {
        if is_used {
            self.decay_rate_used
        } else {
            self.decay_rate_new
        }
    }

    /// Copy of these parameters with the running costs recorded for `car`.
    pub fn with_catalog_costs(&self, car: &CatalogCar) -> Self {
        let mut adjusted = self.clone();
        if car.is_ev {
            adjusted.ev_cost_per_km = car.fuel_cost_per_km;
        } else {
            adjusted.fuel_cost_per_km = car.fuel_cost_per_km;
        }
        adjusted.insurance_monthly = car.insurance_monthly_cash;
        adjusted.maintenance_yearly = car.maintenance_yearly_cash;
        adjusted.road_tax_yearly = car.road_taxes_yearly_cash;
        adjusted
    }

    pub fn validate(&self) -> Result<()> {
        ensure_horizon(self.years)?;
        for (label, rate) in [
            ("tax rate", self.tax_rate),
            ("EV benefit rate", self.benefit_rate_ev_low),
            ("standard benefit rate", self.benefit_rate_standard),
            ("opportunity rate", self.opportunity_rate),
        ] {
            if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
                return Err(CostError::invalid(format!(
                    "{label} must lie in [0, 1], got {rate}"
                )));
            }
        }
        ensure_residual(self.residual_fraction)?;
        ensure_decay(self.decay_rate_new)?;
        ensure_decay(self.decay_rate_used)?;
        for (label, value) in [
            ("annual kilometers", self.km_per_year),
            ("EV benefit threshold", self.benefit_ev_threshold),
            ("mobility budget", self.mobility_budget_monthly),
            ("fuel cost per km", self.fuel_cost_per_km),
            ("EV cost per km", self.ev_cost_per_km),
            ("insurance", self.insurance_monthly),
            ("maintenance", self.maintenance_yearly),
            ("road tax", self.road_tax_yearly),
        ] {
            ensure_non_negative(label, value)?;
        }
        Ok(())
    }
}

pub(crate) fn ensure_horizon(years: u32) -> Result<()> {
    if years == 0 {
        return Err(CostError::DivisionDegenerate(
            "projection horizon must span at least one year".into(),
        ));
    }
    if years > MAX_HORIZON_YEARS {
        return Err(CostError::invalid(format!(
            "projection horizon is capped at {MAX_HORIZON_YEARS} years, got {years}"
        )));
    }
    Ok(())
}

pub(crate) fn ensure_decay(decay_rate: f64) -> Result<()> {
    if !decay_rate.is_finite() || decay_rate <= 0.0 {
        return Err(CostError::invalid(format!(
            "decay rate must be positive, got {decay_rate}"
        )));
    }
    Ok(())
}

pub(crate) fn ensure_residual(residual_fraction: f64) -> Result<()> {
    if !residual_fraction.is_finite() || !(0.0..1.0).contains(&residual_fraction) {
        return Err(CostError::invalid(format!(
            "residual fraction must lie in [0, 1), got {residual_fraction}"
        )));
    }
    Ok(())
}

pub(crate) fn ensure_non_negative(label: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CostError::invalid(format!(
            "{label} must not be negative, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        ScenarioParameters::default().validate().expect("defaults");
        assert_eq!(ScenarioParameters::default().months(), 60);
    }

    #[test]
    fn zero_horizon_is_degenerate() {
        let params = ScenarioParameters {
            years: 0,
            ..ScenarioParameters::default()
        };
        assert!(matches!(
            params.validate(),
            Err(CostError::DivisionDegenerate(_))
        ));
    }

    #[test]
    fn oversized_horizon_is_rejected() {
        let params = ScenarioParameters {
            years: 357_913_942,
            ..ScenarioParameters::default()
        };
        assert!(matches!(
            params.validate(),
            Err(CostError::InvalidParameter(_))
        ));
        assert!(ensure_horizon(MAX_HORIZON_YEARS).is_ok());
        assert!(ensure_horizon(MAX_HORIZON_YEARS + 1).is_err());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let params: ScenarioParameters =
            serde_json::from_str(r#"{ "years": 3, "rounding": "final_only" }"#).unwrap();
        assert_eq!(params.years, 3);
        assert_eq!(params.rounding, RoundingPolicy::FinalOnly);
        assert_eq!(params.mobility_budget_monthly, 650.0);
    }

    #[test]
    fn catalog_costs_override_running_costs() {
        let mut car = CatalogCar::new("3 Series", 45_000.0, 45_000.0);
        car.is_ev = false;
        car.fuel_type = crate::domain::FuelType::Petrol;
        car.fuel_cost_per_km = 0.14;
        car.insurance_monthly_cash = 150.0;
        let adjusted = ScenarioParameters::default().with_catalog_costs(&car);
        assert_eq!(adjusted.fuel_cost_per_km, 0.14);
        assert_eq!(adjusted.ev_cost_per_km, 0.08);
        assert_eq!(adjusted.insurance_monthly, 150.0);
    }
}
