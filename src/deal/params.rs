//! Deal input parameters matching the reference deal form

use serde::{Deserialize, Serialize};

use crate::error::{DealError, DealResult};

/// Inputs for a single deal analysis
///
/// Rates are decimal fractions (0.075 = 7.5%). Missing fields in a JSON
/// document fall back to the reference-form defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DealParameters {
    /// Purchase price / appraised value of the property
    pub property_value: f64,

    /// Down payment paid to the seller at close
    pub seller_down_payment: f64,

    /// Annual nominal rate on the bank loan
    pub bank_interest_rate: f64,

    /// Bank loan amortization term in years
    pub loan_term_years: u32,

    /// Seller note rate. Carried for display only, not used by the calculation.
    pub seller_interest_rate: f64,

    /// Seller note term in months
    pub seller_term_months: u32,

    /// Monthly payment made to the seller
    pub seller_monthly_payment: f64,

    /// Years the property is held before the annualized cost is evaluated
    pub hold_years: f64,
}

impl Default for DealParameters {
    fn default() -> Self {
        Self {
            property_value: 1_200_000.0,
            seller_down_payment: 330_000.0,
            bank_interest_rate: 0.075,
            loan_term_years: 30,
            seller_interest_rate: 0.0,
            seller_term_months: 96,
            seller_monthly_payment: 2_400.0,
            hold_years: 8.0,
        }
    }
}

impl DealParameters {
    /// Check structural validity before any computation happens
    pub fn validate(&self) -> DealResult<()> {
        let amounts = [
            ("property_value", self.property_value),
            ("seller_down_payment", self.seller_down_payment),
            ("bank_interest_rate", self.bank_interest_rate),
            ("seller_interest_rate", self.seller_interest_rate),
            ("seller_monthly_payment", self.seller_monthly_payment),
            ("hold_years", self.hold_years),
        ];
        for (field, value) in amounts {
            if !value.is_finite() {
                return Err(DealError::invalid(field, format!("must be a finite number, got {}", value)));
            }
        }

        if self.property_value <= 0.0 {
            return Err(DealError::invalid("property_value", "must be greater than zero"));
        }
        if self.seller_down_payment < 0.0 {
            return Err(DealError::invalid("seller_down_payment", "must not be negative"));
        }
        if self.seller_down_payment > self.property_value {
            return Err(DealError::invalid("seller_down_payment", "must not exceed property_value"));
        }
        if self.loan_term_years == 0 {
            return Err(DealError::invalid("loan_term_years", "must be greater than zero"));
        }
        if self.seller_term_months == 0 {
            return Err(DealError::invalid("seller_term_months", "must be greater than zero"));
        }
        if self.seller_monthly_payment < 0.0 {
            return Err(DealError::invalid("seller_monthly_payment", "must not be negative"));
        }
        if self.hold_years <= 0.0 {
            return Err(DealError::invalid("hold_years", "must be greater than zero"));
        }

        Ok(())
    }

    /// Total number of bank loan payments over the full term
    ///
    /// Computed in f64 so that no `loan_term_years` can overflow.
    pub fn total_bank_payments(&self) -> f64 {
        self.loan_term_years as f64 * 12.0
    }

    /// Months in the hold period (may be fractional)
    pub fn months_held(&self) -> f64 {
        self.hold_years * 12.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: DealError) -> &'static str {
        match err {
            DealError::InvalidInput { field, .. } => field,
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        let params = DealParameters::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.total_bank_payments(), 360.0);
        assert_eq!(params.months_held(), 96.0);
    }

    #[test]
    fn test_rejects_structural_errors() {
        let base = DealParameters::default();

        let cases = [
            (DealParameters { property_value: -1.0, ..base }, "property_value"),
            (DealParameters { property_value: 0.0, ..base }, "property_value"),
            (DealParameters { seller_down_payment: -5.0, ..base }, "seller_down_payment"),
            (DealParameters { seller_down_payment: 1_300_000.0, ..base }, "seller_down_payment"),
            (DealParameters { loan_term_years: 0, ..base }, "loan_term_years"),
            (DealParameters { seller_term_months: 0, ..base }, "seller_term_months"),
            (DealParameters { seller_monthly_payment: -1.0, ..base }, "seller_monthly_payment"),
            (DealParameters { hold_years: 0.0, ..base }, "hold_years"),
            (DealParameters { hold_years: -2.0, ..base }, "hold_years"),
            (DealParameters { bank_interest_rate: f64::NAN, ..base }, "bank_interest_rate"),
            (DealParameters { hold_years: f64::INFINITY, ..base }, "hold_years"),
        ];

        for (params, expected) in cases {
            let err = params.validate().unwrap_err();
            assert_eq!(field_of(err), expected, "params: {:?}", params);
        }
    }

    #[test]
    fn test_extreme_loan_term_payment_count() {
        let params = DealParameters { loan_term_years: u32::MAX, ..DealParameters::default() };
        assert!(params.validate().is_ok());
        assert_eq!(params.total_bank_payments(), u32::MAX as f64 * 12.0);

        let params = DealParameters { loan_term_years: 400_000_000, ..DealParameters::default() };
        assert_eq!(params.total_bank_payments(), 4_800_000_000.0);
    }

    #[test]
    fn test_down_payment_bounds_inclusive() {
        let base = DealParameters::default();
        assert!(DealParameters { seller_down_payment: 0.0, ..base }.validate().is_ok());
        assert!(DealParameters { seller_down_payment: base.property_value, ..base }.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let params: DealParameters =
            serde_json::from_str(r#"{"property_value": 900000, "hold_years": 5}"#).unwrap();

        assert_eq!(params.property_value, 900_000.0);
        assert_eq!(params.hold_years, 5.0);
        assert_eq!(params.loan_term_years, 30);
        assert_eq!(params.seller_monthly_payment, 2_400.0);
    }
}
