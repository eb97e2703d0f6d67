use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::errors::{CostError, Result};
use crate::domain::common::*;

/// Share of the new price assumed for a used car when no used price is recorded.
pub const DEFAULT_USED_PRICE_FRACTION: f64 = 0.4;

fn default_catalog_id() -> Uuid {
    Uuid::new_v4()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    #[default]
    Ev,
    Petrol,
}

/// Catalog entry describing a model that can be leased or bought.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogCar {
    #[serde(default = "default_catalog_id")]
    pub id: Uuid,
    pub name: String,
    pub purchase_price_new: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_price_used: Option<f64>,
    pub cataloguswaarde: f64,
    pub is_ev: bool,
    #[serde(default)]
    pub fuel_type: FuelType,
    pub fuel_cost_per_km: f64,
    pub insurance_monthly_cash: f64,
    pub maintenance_yearly_cash: f64,
    pub road_taxes_yearly_cash: f64,
    #[serde(default)]
    pub business_lease_monthly: f64,
    #[serde(default)]
    pub personal_lease_monthly: f64,
}

impl CatalogCar {
    pub fn new(name: impl Into<String>, purchase_price_new: f64, cataloguswaarde: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            purchase_price_new,
            purchase_price_used: None,
            cataloguswaarde,
            is_ev: true,
            fuel_type: FuelType::Ev,
            fuel_cost_per_km: 0.08,
            insurance_monthly_cash: 265.0,
            maintenance_yearly_cash: 500.0,
            road_taxes_yearly_cash: 850.0,
            business_lease_monthly: 0.0,
            personal_lease_monthly: 0.0,
        }
    }

    /// Price paid for a used example, falling back to a fixed share of the new price.
    pub fn used_price(&self) -> f64 {
        self.purchase_price_used
            .unwrap_or(self.purchase_price_new * DEFAULT_USED_PRICE_FRACTION)
    }

    pub fn purchase_price(&self, is_used: bool) -> f64 {
        if is_used {
            self.used_price()
        } else {
            self.purchase_price_new
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CostError::invalid("catalog car name must not be empty"));
        }
        if self.is_ev != (self.fuel_type == FuelType::Ev) {
            return Err(CostError::invalid(format!(
                "`{}` EV flag disagrees with fuel type {:?}",
                self.name, self.fuel_type
            )));
        }
        ensure_amount("new purchase price", self.purchase_price_new)?;
        if let Some(used) = self.purchase_price_used {
            ensure_amount("used purchase price", used)?;
        }
        ensure_amount("cataloguswaarde", self.cataloguswaarde)?;
        ensure_amount("fuel cost per km", self.fuel_cost_per_km)?;
        ensure_amount("insurance", self.insurance_monthly_cash)?;
        ensure_amount("maintenance", self.maintenance_yearly_cash)?;
        ensure_amount("road tax", self.road_taxes_yearly_cash)?;
        ensure_amount("business lease", self.business_lease_monthly)?;
        ensure_amount("personal lease", self.personal_lease_monthly)?;
        Ok(())
    }
}

impl Identifiable for CatalogCar {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for CatalogCar {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for CatalogCar {
    fn display_label(&self) -> String {
        format!("{} ({:?})", self.name, self.fuel_type)
    }
}
