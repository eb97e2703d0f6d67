use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::errors::{CostError, Result};

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;

    /// Case-insensitive comparison used for uniqueness checks.
    fn name_matches(&self, candidate: &str) -> bool {
        self.name().trim().eq_ignore_ascii_case(candidate.trim())
    }
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Calendar month used for build and acquisition dates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let value = Self { year, month };
        value.validate()?;
        Ok(value)
    }

    pub fn validate(&self) -> Result<()> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|_| ())
            .ok_or_else(|| CostError::invalid(format!("`{}` is not a valid calendar month", self)))
    }

    /// Whole months from `self` to `later`; negative when `later` is earlier.
    pub fn months_until(&self, later: YearMonth) -> i64 {
        let from = i64::from(self.year) * 12 + i64::from(self.month);
        let to = i64::from(later.year) * 12 + i64::from(later.month);
        to - from
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Rejects negative or non-finite money amounts.
pub(crate) fn ensure_amount(label: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CostError::invalid(format!(
            "{label} must be a non-negative amount, got {value}"
        )));
    }
    Ok(())
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use serde;
pub use uuid;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_month_out_of_range() {
        assert!(YearMonth::new(2025, 13).is_err());
        assert!(YearMonth::new(2025, 0).is_err());
        assert!(YearMonth::new(2025, 12).is_ok());
    }

    #[test]
    fn months_until_spans_years() {
        let built = YearMonth::new(2019, 1).unwrap();
        let bought = YearMonth::new(2025, 11).unwrap();
        assert_eq!(built.months_until(bought), 82);
        assert_eq!(bought.months_until(built), -82);
    }

    #[test]
    fn negative_amounts_are_rejected() {
        assert!(ensure_amount("insurance", -1.0).is_err());
        assert!(ensure_amount("insurance", f64::NAN).is_err());
        assert!(ensure_amount("insurance", 0.0).is_ok());
    }
}
