//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// Number of months the monthly contribution ceiling is multiplied by.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Metadata about the jurisdiction the tax tables belong to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JurisdictionMetadata {
    /// ISO country code (e.g., "GR").
    pub code: String,
    /// The human-readable name of the jurisdiction.
    pub name: String,
    /// ISO currency code used for all amounts (e.g., "EUR").
    pub currency: String,
    /// URL to the official source of the tax tables.
    pub source_url: String,
}

/// Social-security contribution parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionConfig {
    /// The monthly ceiling on insurable earnings.
    pub monthly_cap: Decimal,
    /// The flat employee contribution rate (e.g., 0.1337).
    pub rate: Decimal,
}

impl ContributionConfig {
    /// Returns the annual ceiling (monthly ceiling × 12).
    pub fn annual_cap(&self) -> Decimal {
        self.monthly_cap * MONTHS_PER_YEAR
    }
}

/// A single marginal income-tax bracket.
///
/// Brackets are cumulative: each one taxes the income between the previous
/// bracket's `upper_limit` and its own. The final bracket has no upper limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// The upper bound of this bracket, or `None` for the unbounded top bracket.
    #[serde(default)]
    pub upper_limit: Option<Decimal>,
    /// The marginal rate applied to income inside this bracket.
    pub rate: Decimal,
}

/// Income tax parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxConfig {
    /// Brackets in ascending order.
    pub brackets: Vec<TaxBracket>,
}

/// Residency-transfer exemption parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExemptionConfig {
    /// Share of taxable income exempted from income tax (e.g., 0.5).
    pub share: Decimal,
    /// A description of the exemption.
    pub description: String,
}

/// The full parameter table for one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    /// The calendar year these parameters apply to.
    pub year: i32,
    /// Social-security contribution parameters.
    pub contributions: ContributionConfig,
    /// Income tax bracket table.
    pub income_tax: IncomeTaxConfig,
    /// Residency exemption parameters.
    pub exemption: ExemptionConfig,
    /// Allowed number of salary payments per year.
    pub payment_counts: Vec<u32>,
    /// Payment count used when a request does not specify one.
    pub default_payment_count: u32,
}

impl TaxYearConfig {
    /// Returns true if `count` is one of the allowed payment counts.
    pub fn allows_payment_count(&self, count: u32) -> bool {
        self.payment_counts.contains(&count)
    }

    /// Checks the table for internal consistency.
    ///
    /// Rejects tables whose brackets are not strictly ascending, whose last
    /// bracket is bounded, whose inner brackets are unbounded, or whose
    /// rates, cap or exemption share fall outside their valid ranges.
    pub fn validate(&self) -> PayrollResult<()> {
        let invalid = |message: String| PayrollError::InvalidConfig {
            year: self.year,
            message,
        };

        if self.contributions.monthly_cap <= Decimal::ZERO {
            return Err(invalid("contribution monthly_cap must be positive".into()));
        }
        if !is_unit_rate(self.contributions.rate) {
            return Err(invalid(format!(
                "contribution rate {} must be between 0 and 1",
                self.contributions.rate
            )));
        }
        if !is_unit_rate(self.exemption.share) {
            return Err(invalid(format!(
                "exemption share {} must be between 0 and 1",
                self.exemption.share
            )));
        }

        let brackets = &self.income_tax.brackets;
        let Some((last, inner)) = brackets.split_last() else {
            return Err(invalid("income tax table has no brackets".into()));
        };
        if last.upper_limit.is_some() {
            return Err(invalid("final tax bracket must be unbounded".into()));
        }

        let mut previous = Decimal::ZERO;
        for (index, bracket) in inner.iter().enumerate() {
            let Some(limit) = bracket.upper_limit else {
                return Err(invalid(format!(
                    "bracket {} is unbounded but is not the final bracket",
                    index + 1
                )));
            };
            if limit <= previous {
                return Err(invalid(format!(
                    "bracket {} upper limit {} does not exceed {}",
                    index + 1,
                    limit,
                    previous
                )));
            }
            previous = limit;
        }
        if let Some(bad) = brackets.iter().find(|b| !is_unit_rate(b.rate)) {
            return Err(invalid(format!(
                "tax rate {} must be between 0 and 1",
                bad.rate
            )));
        }

        if self.payment_counts.is_empty() || self.payment_counts.contains(&0) {
            return Err(invalid("payment_counts must be non-empty and positive".into()));
        }
        if !self.allows_payment_count(self.default_payment_count) {
            return Err(invalid(format!(
                "default_payment_count {} is not one of {:?}",
                self.default_payment_count, self.payment_counts
            )));
        }

        Ok(())
    }
}

fn is_unit_rate(rate: Decimal) -> bool {
    rate >= Decimal::ZERO && rate <= Decimal::ONE
}

/// The complete payroll configuration loaded from YAML files.
///
/// Aggregates the jurisdiction metadata and every configured tax year.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    /// Jurisdiction metadata.
    metadata: JurisdictionMetadata,
    /// Tax-year tables (sorted oldest first).
    tax_years: Vec<TaxYearConfig>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(metadata: JurisdictionMetadata, tax_years: Vec<TaxYearConfig>) -> Self {
        let mut sorted = tax_years;
        sorted.sort_by_key(|t| t.year);
        Self {
            metadata,
            tax_years: sorted,
        }
    }

    /// Returns the jurisdiction metadata.
    pub fn jurisdiction(&self) -> &JurisdictionMetadata {
        &self.metadata
    }

    /// Returns all tax-year tables, oldest first.
    pub fn tax_years(&self) -> &[TaxYearConfig] {
        &self.tax_years
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_year() -> TaxYearConfig {
        TaxYearConfig {
            year: 2025,
            contributions: ContributionConfig {
                monthly_cap: dec!(7572.62),
                rate: dec!(0.1337),
            },
            income_tax: IncomeTaxConfig {
                brackets: vec![
                    TaxBracket {
                        upper_limit: Some(dec!(10000)),
                        rate: dec!(0.09),
                    },
                    TaxBracket {
                        upper_limit: Some(dec!(20000)),
                        rate: dec!(0.22),
                    },
                    TaxBracket {
                        upper_limit: None,
                        rate: dec!(0.44),
                    },
                ],
            },
            exemption: ExemptionConfig {
                share: dec!(0.5),
                description: "test".to_string(),
            },
            payment_counts: vec![12, 14],
            default_payment_count: 14,
        }
    }

    #[test]
    fn test_annual_cap_is_twelve_monthly_caps() {
        assert_eq!(sample_year().contributions.annual_cap(), dec!(90871.44));
    }

    #[test]
    fn test_valid_table_passes_validation() {
        assert!(sample_year().validate().is_ok());
    }

    #[test]
    fn test_bounded_final_bracket_is_rejected() {
        let mut year = sample_year();
        year.income_tax.brackets[2].upper_limit = Some(dec!(50000));

        let err = year.validate().unwrap_err();
        assert!(err.to_string().contains("final tax bracket must be unbounded"));
    }

    #[test]
    fn test_descending_brackets_are_rejected() {
        let mut year = sample_year();
        year.income_tax.brackets[1].upper_limit = Some(dec!(5000));

        let err = year.validate().unwrap_err();
        assert!(err.to_string().contains("does not exceed"));
    }

    #[test]
    fn test_unbounded_inner_bracket_is_rejected() {
        let mut year = sample_year();
        year.income_tax.brackets[0].upper_limit = None;

        let err = year.validate().unwrap_err();
        assert!(err.to_string().contains("not the final bracket"));
    }

    #[test]
    fn test_empty_bracket_table_is_rejected() {
        let mut year = sample_year();
        year.income_tax.brackets.clear();

        assert!(matches!(
            year.validate(),
            Err(PayrollError::InvalidConfig { year: 2025, .. })
        ));
    }

    #[test]
    fn test_rate_above_one_is_rejected() {
        let mut year = sample_year();
        year.income_tax.brackets[1].rate = dec!(1.5);

        assert!(year.validate().is_err());
    }

    #[test]
    fn test_default_payment_count_must_be_allowed() {
        let mut year = sample_year();
        year.default_payment_count = 13;

        let err = year.validate().unwrap_err();
        assert!(err.to_string().contains("default_payment_count 13"));
    }

    #[test]
    fn test_allows_payment_count() {
        let year = sample_year();
        assert!(year.allows_payment_count(12));
        assert!(year.allows_payment_count(14));
        assert!(!year.allows_payment_count(13));
    }

    #[test]
    fn test_payroll_config_sorts_tax_years() {
        let mut older = sample_year();
        older.year = 2024;
        let config = PayrollConfig::new(
            JurisdictionMetadata {
                code: "GR".to_string(),
                name: "Greece".to_string(),
                currency: "EUR".to_string(),
                source_url: "https://www.aade.gr".to_string(),
            },
            vec![sample_year(), older],
        );

        let years: Vec<i32> = config.tax_years().iter().map(|t| t.year).collect();
        assert_eq!(years, vec![2024, 2025]);
    }
}
