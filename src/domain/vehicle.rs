use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::errors::{CostError, Result};
use crate::domain::common::*;

fn default_vehicle_id() -> Uuid {
    Uuid::new_v4()
}

/// How the vehicle is acquired.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AcquisitionType {
    #[serde(rename = "lease-business")]
    BusinessLease,
    #[serde(rename = "lease-personal")]
    PersonalLease,
    #[serde(rename = "cash", alias = "buy")]
    Cash,
}

impl AcquisitionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AcquisitionType::BusinessLease => "lease-business",
            AcquisitionType::PersonalLease => "lease-personal",
            AcquisitionType::Cash => "cash",
        }
    }

    pub fn is_lease(&self) -> bool {
        !matches!(self, AcquisitionType::Cash)
    }
}

impl fmt::Display for AcquisitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AcquisitionType {
    type Err = CostError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lease-business" | "business" => Ok(AcquisitionType::BusinessLease),
            "lease-personal" | "personal" => Ok(AcquisitionType::PersonalLease),
            "cash" | "buy" => Ok(AcquisitionType::Cash),
            other => Err(CostError::invalid(format!(
                "unknown acquisition type `{other}`"
            ))),
        }
    }
}

/// A stored vehicle record as used by the fleet projection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleProfile {
    #[serde(default = "default_vehicle_id")]
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "acquisition_type")]
    pub acquisition: AcquisitionType,
    pub build: YearMonth,
    pub acquired: YearMonth,
    pub purchase_cost: f64,
    pub road_tax_yearly: f64,
    pub insurance_monthly: f64,
    pub fuel_per_km: f64,
    pub depreciation_k: f64,
    #[serde(default)]
    pub is_ev: bool,
    #[serde(default)]
    pub catalog_value: f64,
    /// Monthly lease instalment; only read for the lease acquisition types.
    #[serde(default)]
    pub monthly_lease: f64,
}

impl VehicleProfile {
    /// Creates a vehicle with zeroed running costs, built and acquired in `acquired`.
    pub fn new(
        name: impl Into<String>,
        acquisition: AcquisitionType,
        acquired: YearMonth,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            acquisition,
            build: acquired,
            acquired,
            purchase_cost: 0.0,
            road_tax_yearly: 0.0,
            insurance_monthly: 0.0,
            fuel_per_km: 0.0,
            depreciation_k: 0.08,
            is_ev: false,
            catalog_value: 0.0,
            monthly_lease: 0.0,
        }
    }

    pub fn with_build(mut self, build: YearMonth) -> Self {
        self.build = build;
        self
    }

    pub fn with_purchase_cost(mut self, purchase_cost: f64) -> Self {
        self.purchase_cost = purchase_cost;
        self
    }

    pub fn with_running_costs(
        mut self,
        road_tax_yearly: f64,
        insurance_monthly: f64,
        fuel_per_km: f64,
    ) -> Self {
        self.road_tax_yearly = road_tax_yearly;
        self.insurance_monthly = insurance_monthly;
        self.fuel_per_km = fuel_per_km;
        self
    }

    pub fn with_depreciation(mut self, depreciation_k: f64) -> Self {
        self.depreciation_k = depreciation_k;
        self
    }

    pub fn with_lease(mut self, monthly_lease: f64, catalog_value: f64, is_ev: bool) -> Self {
        self.monthly_lease = monthly_lease;
        self.catalog_value = catalog_value;
        self.is_ev = is_ev;
        self
    }

    /// Age of the vehicle in whole months on the acquisition date.
    pub fn age_at_acquisition(&self) -> i64 {
        self.build.months_until(self.acquired)
    }

    pub fn is_used(&self) -> bool {
        self.age_at_acquisition() > 0
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CostError::invalid("vehicle name must not be empty"));
        }
        self.build.validate()?;
        self.acquired.validate()?;
        if self.age_at_acquisition() < 0 {
            return Err(CostError::invalid(format!(
                "`{}` is acquired ({}) before it was built ({})",
                self.name, self.acquired, self.build
            )));
        }
        if !self.depreciation_k.is_finite() || self.depreciation_k <= 0.0 {
            return Err(CostError::invalid(format!(
                "`{}` depreciation rate must be positive, got {}",
                self.name, self.depreciation_k
            )));
        }
        ensure_amount("purchase cost", self.purchase_cost)?;
        ensure_amount("road tax", self.road_tax_yearly)?;
        ensure_amount("insurance", self.insurance_monthly)?;
        ensure_amount("fuel cost per km", self.fuel_per_km)?;
        ensure_amount("catalog value", self.catalog_value)?;
        ensure_amount("monthly lease", self.monthly_lease)?;
        Ok(())
    }
}

impl Identifiable for VehicleProfile {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for VehicleProfile {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for VehicleProfile {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.acquisition)
    }
}
