//! Payroll breakdown models.
//!
//! This module contains the [`Breakdown`] produced for a salary and the
//! [`DistributionSlice`] values that make up the income-distribution chart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The tax charged inside one marginal bracket.
///
/// # Example
///
/// ```
/// use greek_payroll::models::TaxBracketLine;
/// use rust_decimal_macros::dec;
///
/// let line = TaxBracketLine {
///     lower_limit: dec!(0),
///     upper_limit: Some(dec!(10000)),
///     rate: dec!(0.09),
///     taxed_amount: dec!(10000),
///     tax: dec!(900),
/// };
/// assert_eq!(line.taxed_amount * line.rate, line.tax);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracketLine {
    /// Lower bound of the bracket.
    pub lower_limit: Decimal,
    /// Upper bound of the bracket, `None` for the top bracket.
    pub upper_limit: Option<Decimal>,
    /// Marginal rate of the bracket.
    pub rate: Decimal,
    /// The portion of income that fell inside this bracket.
    pub taxed_amount: Decimal,
    /// Tax due on that portion.
    pub tax: Decimal,
}

/// The complete breakdown of an annual salary.
///
/// Monetary values are exact decimals. `total_contributions + income_tax +
/// net_annual` always equals `gross_annual`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    /// Annual gross salary.
    pub gross_annual: Decimal,
    /// Number of salary payments the annual amounts are divided over.
    pub payment_count: u32,
    /// Salary the contribution rate was applied to (gross capped at the ceiling).
    pub contribution_base: Decimal,
    /// Whether the contribution ceiling limited the base.
    pub contribution_cap_applied: bool,
    /// Total employee social-security contributions.
    pub total_contributions: Decimal,
    /// Contributions per salary payment.
    pub contributions_per_payment: Decimal,
    /// Income left after contributions.
    pub taxable_income: Decimal,
    /// Whether the residency exemption was applied.
    pub moving_residency: bool,
    /// Income excluded from tax by the residency exemption.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub exempted_income: Option<Decimal>,
    /// Income the bracket table was actually applied to.
    pub taxable_income_for_tax: Decimal,
    /// Per-bracket tax detail.
    pub tax_brackets: Vec<TaxBracketLine>,
    /// Total income tax due.
    pub income_tax: Decimal,
    /// Income tax per salary payment.
    pub income_tax_per_payment: Decimal,
    /// Net annual salary.
    pub net_annual: Decimal,
    /// Net salary per payment.
    pub net_per_payment: Decimal,
}

impl Breakdown {
    /// Returns the exempted income, or zero if no exemption applied.
    pub fn exempted_or_zero(&self) -> Decimal {
        self.exempted_income.unwrap_or(Decimal::ZERO)
    }
}

/// The category of an income-distribution slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliceKind {
    /// Net pay that went through the bracket table.
    NetPay,
    /// Net pay excluded from tax by the residency exemption.
    ExemptedIncome,
    /// Income tax.
    IncomeTax,
    /// Social-security contributions.
    SocialSecurity,
}

impl SliceKind {
    /// Returns the chart label for this slice.
    pub fn label(&self) -> &'static str {
        match self {
            SliceKind::NetPay => "Net Pay",
            SliceKind::ExemptedIncome => "Exempted Income",
            SliceKind::IncomeTax => "Income Tax",
            SliceKind::SocialSecurity => "Social Security",
        }
    }

    /// Returns the chart colour for this slice.
    pub fn color(&self) -> &'static str {
        match self {
            SliceKind::NetPay => "#4CAF50",
            SliceKind::ExemptedIncome => "#FFC107",
            SliceKind::IncomeTax => "#F44336",
            SliceKind::SocialSecurity => "#2196F3",
        }
    }
}

/// One slice of the income-distribution (pie) chart.
///
/// # Example
///
/// ```
/// use greek_payroll::models::{DistributionSlice, SliceKind};
/// use rust_decimal_macros::dec;
///
/// let slice = DistributionSlice {
///     kind: SliceKind::IncomeTax,
///     label: SliceKind::IncomeTax.label().to_string(),
///     amount: dec!(3321.536),
///     percent: dec!(13.84),
///     color: SliceKind::IncomeTax.color().to_string(),
/// };
/// assert_eq!(slice.color, "#F44336");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionSlice {
    /// The slice category.
    pub kind: SliceKind,
    /// Display label.
    pub label: String,
    /// Annual amount represented by the slice.
    pub amount: Decimal,
    /// Share of gross salary in percent, rounded to two decimal places.
    pub percent: Decimal,
    /// Display colour as a hex string.
    pub color: String,
}
