use serde::{Deserialize, Serialize};

use crate::core::errors::{CostError, Result};

use super::params::{ensure_decay, ensure_non_negative, ensure_residual};

/// Modelled value of a vehicle in a given month and the loss attributed to it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Depreciation {
    pub value: f64,
    pub monthly: f64,
}

/// Exponential decay `price * e^(-k t)` evaluated mid-month, `t = (month - 0.5) / 12`,
/// floored at `price * residual_fraction`.
///
/// `monthly` is the instantaneous loss `(k / 12) * value`, so it shrinks with
/// the floored value once the residual is reached. `month` is 1-based.
pub fn depreciated_value(
    purchase_price: f64,
    month: u32,
    decay_rate: f64,
    residual_fraction: f64,
) -> Result<Depreciation> {
    if month == 0 {
        return Err(CostError::invalid("months are counted from 1"));
    }
    ensure_non_negative("purchase price", purchase_price)?;
    ensure_decay(decay_rate)?;
    ensure_residual(residual_fraction)?;

    let elapsed_years = (f64::from(month) - 0.5) / 12.0;
    let decayed = purchase_price * (-decay_rate * elapsed_years).exp();
    let value = decayed.max(purchase_price * residual_fraction);
    Ok(Depreciation {
        value,
        monthly: decay_rate / 12.0 * value,
    })
}
