//! Dutch company-car benefit tax ("bijtelling").

use serde::{Deserialize, Serialize};

use crate::core::errors::Result;

use super::params::ensure_non_negative;

/// Catalog value up to which EVs are taxed at the reduced rate.
pub const BENEFIT_TAX_EV_THRESHOLD: f64 = 30_000.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BenefitTax {
    pub gross_annual: f64,
    pub net_annual: f64,
}

impl BenefitTax {
    pub fn net_monthly(&self) -> f64 {
        self.net_annual / 12.0
    }
}

pub fn benefit_tax(
    catalog_value: f64,
    is_ev: bool,
    rate_ev_low: f64,
    rate_standard: f64,
    tax_rate: f64,
) -> Result<BenefitTax> {
    benefit_tax_with_threshold(
        catalog_value,
        is_ev,
        rate_ev_low,
        rate_standard,
        tax_rate,
        BENEFIT_TAX_EV_THRESHOLD,
    )
}

/// Benefit tax with an explicit EV threshold. Non-EVs pay `rate_standard` on
/// the full value; `net_annual` is the gross addition times the marginal rate.
pub fn benefit_tax_with_threshold(
    catalog_value: f64,
    is_ev: bool,
    rate_ev_low: f64,
    rate_standard: f64,
    tax_rate: f64,
    ev_threshold: f64,
) -> Result<BenefitTax> {
    ensure_non_negative("catalog value", catalog_value)?;
    let gross_annual = if is_ev {
        let low = catalog_value.min(ev_threshold) * rate_ev_low;
        let high = (catalog_value - ev_threshold).max(0.0) * rate_standard;
        low + high
    } else {
        catalog_value * rate_standard
    };
    Ok(BenefitTax {
        gross_annual,
        net_annual: gross_annual * tax_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn ev_at_threshold_uses_low_rate_only() {
        let tax = benefit_tax(30_000.0, true, 0.17, 0.22, 0.37).unwrap();
        assert!(close(tax.gross_annual, 5_100.0));
        assert!(close(tax.net_annual, 1_887.0));
    }

    #[test]
    fn ev_above_threshold_splits_rates() {
        let tax = benefit_tax(40_000.0, true, 0.17, 0.22, 0.37).unwrap();
        assert!(close(tax.gross_annual, 7_300.0));
        assert!(close(tax.net_annual, 2_701.0));
    }

    #[test]
    fn non_ev_uses_standard_rate() {
        let tax = benefit_tax(40_000.0, false, 0.17, 0.22, 0.37).unwrap();
        assert!(close(tax.gross_annual, 8_800.0));
        assert!(close(tax.net_annual, 3_256.0));
    }

    #[test]
    fn negative_catalog_value_is_rejected() {
        assert!(benefit_tax(-1.0, true, 0.17, 0.22, 0.37).is_err());
    }
}
