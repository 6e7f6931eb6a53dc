//! Payroll input model.
//!
//! This module contains the [`PayrollInput`] type describing one salary to
//! be broken down into contributions, tax and net pay.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TaxYearConfig;
use crate::error::{PayrollError, PayrollResult};

/// The inputs to a payroll calculation.
///
/// # Example
///
/// ```
/// use greek_payroll::models::PayrollInput;
/// use rust_decimal_macros::dec;
///
/// let input = PayrollInput {
///     gross_annual: dec!(24000),
///     payment_count: 14,
///     moving_residency: false,
/// };
/// assert!(input.has_income());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollInput {
    /// Annual gross salary before any deductions.
    pub gross_annual: Decimal,
    /// Number of salary payments per year (12 or 14 in Greece).
    pub payment_count: u32,
    /// Whether the 50% tax-residency-transfer exemption applies.
    #[serde(default)]
    pub moving_residency: bool,
}

impl PayrollInput {
    /// Returns true if there is any salary to break down.
    ///
    /// A zero salary is not an error; it simply produces no breakdown.
    pub fn has_income(&self) -> bool {
        self.gross_annual > Decimal::ZERO
    }

    /// Validates the input against a tax year's parameters.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the salary is negative or the payment count
    /// is not one of the tax year's allowed counts.
    pub fn validate(&self, tax_year: &TaxYearConfig) -> PayrollResult<()> {
        if self.gross_annual < Decimal::ZERO {
            return Err(PayrollError::InvalidInput {
                field: "gross_annual".to_string(),
                message: format!("must not be negative (got {})", self.gross_annual),
            });
        }

        if !tax_year.allows_payment_count(self.payment_count) {
            return Err(PayrollError::InvalidInput {
                field: "payment_count".to_string(),
                message: format!(
                    "must be one of {:?} for tax year {} (got {})",
                    tax_year.payment_counts, tax_year.year, self.payment_count
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use rust_decimal_macros::dec;

    fn tax_year() -> TaxYearConfig {
        ConfigLoader::load("./config/gr")
            .unwrap()
            .get_tax_year(2025)
            .unwrap()
            .clone()
    }

    fn input(gross: Decimal, payment_count: u32) -> PayrollInput {
        PayrollInput {
            gross_annual: gross,
            payment_count,
            moving_residency: false,
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(input(dec!(24000), 14).validate(&tax_year()).is_ok());
        assert!(input(dec!(24000), 12).validate(&tax_year()).is_ok());
    }

    #[test]
    fn test_zero_salary_is_valid_but_has_no_income() {
        let zero = input(Decimal::ZERO, 14);
        assert!(zero.validate(&tax_year()).is_ok());
        assert!(!zero.has_income());
    }

    #[test]
    fn test_negative_salary_is_rejected() {
        match input(dec!(-1), 14).validate(&tax_year()) {
            Err(PayrollError::InvalidInput { field, message }) => {
                assert_eq!(field, "gross_annual");
                assert!(message.contains("negative"));
            }
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_payment_count_is_rejected() {
        match input(dec!(24000), 13).validate(&tax_year()) {
            Err(PayrollError::InvalidInput { field, message }) => {
                assert_eq!(field, "payment_count");
                assert!(message.contains("[12, 14]"));
            }
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_defaults_moving_residency() {
        let json = r#"{ "gross_annual": "30000", "payment_count": 12 }"#;
        let input: PayrollInput = serde_json::from_str(json).unwrap();

        assert_eq!(input.gross_annual, dec!(30000));
        assert_eq!(input.payment_count, 12);
        assert!(!input.moving_residency);
    }
}
