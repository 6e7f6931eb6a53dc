//! Progressive income tax calculation.
//!
//! This module applies the marginal bracket table of a tax year to taxable
//! income, optionally after the residency-transfer exemption has removed a
//! share of that income from the tax base.
//!
//! ## Algorithm
//!
//! Brackets are walked in ascending order. Each bracket taxes only the part
//! of income between the previous bracket's upper limit and its own, and the
//! walk stops once income is exhausted. The result is continuous and
//! non-decreasing in the taxable income.

use rust_decimal::Decimal;

use crate::config::{ExemptionConfig, IncomeTaxConfig};
use crate::models::{AuditStep, TaxBracketLine};

/// The result of an income tax calculation.
#[derive(Debug, Clone)]
pub struct TaxResult {
    /// The total income tax due.
    pub tax: Decimal,
    /// The income the bracket table was applied to.
    pub taxable_for_tax: Decimal,
    /// Income removed from the tax base by the exemption (zero if not applied).
    pub exempted_income: Decimal,
    /// Per-bracket detail, one line per bracket that received income.
    pub bracket_lines: Vec<TaxBracketLine>,
    /// Audit steps: the exemption decision followed by one step per bracket.
    pub audit_steps: Vec<AuditStep>,
}

/// Applies the bracket table to `income` and returns the per-bracket lines.
///
/// This is the raw marginal walk with no exemption or audit trail.
///
/// # Examples
///
/// ```
/// use greek_payroll::calculation::apply_brackets;
/// use greek_payroll::config::{IncomeTaxConfig, TaxBracket};
/// use rust_decimal_macros::dec;
///
/// let table = IncomeTaxConfig {
///     brackets: vec![
///         TaxBracket { upper_limit: Some(dec!(10000)), rate: dec!(0.09) },
///         TaxBracket { upper_limit: None, rate: dec!(0.22) },
///     ],
/// };
///
/// let lines = apply_brackets(dec!(15000), &table);
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[0].tax, dec!(900));
/// assert_eq!(lines[1].tax, dec!(1100));
/// ```
pub fn apply_brackets(income: Decimal, table: &IncomeTaxConfig) -> Vec<TaxBracketLine> {
    let mut lines = Vec::new();
    let mut lower_limit = Decimal::ZERO;

    for bracket in &table.brackets {
        if income <= lower_limit {
            break;
        }

        let top = match bracket.upper_limit {
            Some(limit) => income.min(limit),
            None => income,
        };
        let taxed_amount = top - lower_limit;

        lines.push(TaxBracketLine {
            lower_limit,
            upper_limit: bracket.upper_limit,
            rate: bracket.rate,
            taxed_amount,
            tax: taxed_amount * bracket.rate,
        });

        match bracket.upper_limit {
            Some(limit) => lower_limit = limit,
            None => break,
        }
    }

    lines
}

/// Calculates income tax on post-contribution income.
///
/// When `moving_residency` is set, `exemption.share` of the taxable income
/// is exempt and only the remainder enters the bracket table. With the 50%
/// share this means `tax(income, exempt) == tax(income × 0.5, not exempt)`.
///
/// # Arguments
///
/// * `taxable_income` - Income after social-security contributions (non-negative)
/// * `moving_residency` - Whether the residency-transfer exemption applies
/// * `table` - The tax year's bracket table
/// * `exemption` - The tax year's exemption parameters
/// * `step_number_start` - The first step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use greek_payroll::calculation::calculate_income_tax;
/// use greek_payroll::config::ConfigLoader;
/// use rust_decimal_macros::dec;
///
/// let loader = ConfigLoader::load("config/gr").unwrap();
/// let year = loader.get_tax_year(2025).unwrap();
///
/// let result = calculate_income_tax(dec!(20791.20), false, &year.income_tax, &year.exemption, 1);
/// assert_eq!(result.tax, dec!(3321.536));
/// assert_eq!(result.exempted_income, dec!(0));
///
/// let exempt = calculate_income_tax(dec!(20000), true, &year.income_tax, &year.exemption, 1);
/// assert_eq!(exempt.taxable_for_tax, dec!(10000));
/// assert_eq!(exempt.tax, dec!(900));
/// ```
pub fn calculate_income_tax(
    taxable_income: Decimal,
    moving_residency: bool,
    table: &IncomeTaxConfig,
    exemption: &ExemptionConfig,
    step_number_start: u32,
) -> TaxResult {
    let mut audit_steps = Vec::new();
    let mut step_number = step_number_start;

    let exempted_income = if moving_residency {
        taxable_income * exemption.share
    } else {
        Decimal::ZERO
    };
    let taxable_for_tax = taxable_income - exempted_income;

    let share_percent = (exemption.share * Decimal::ONE_HUNDRED).normalize();
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "residency_exemption".to_string(),
        rule_name: "Tax Residency Transfer Exemption".to_string(),
        input: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string(),
            "moving_residency": moving_residency,
            "share": exemption.share.normalize().to_string()
        }),
        output: serde_json::json!({
            "exempted_income": exempted_income.normalize().to_string(),
            "taxable_for_tax": taxable_for_tax.normalize().to_string(),
            "exemption_applied": moving_residency
        }),
        reasoning: if moving_residency {
            format!(
                "{}% of €{} exempt: €{} taxed, €{} exempted",
                share_percent,
                taxable_income.normalize(),
                taxable_for_tax.normalize(),
                exempted_income.normalize()
            )
        } else {
            format!(
                "No exemption applied - full €{} is taxed",
                taxable_income.normalize()
            )
        },
    });
    step_number += 1;

    let bracket_lines = apply_brackets(taxable_for_tax, table);

    for line in &bracket_lines {
        let bracket_label = match line.upper_limit {
            Some(upper) => format!("€{}–€{}", line.lower_limit.normalize(), upper.normalize()),
            None => format!("over €{}", line.lower_limit.normalize()),
        };
        audit_steps.push(AuditStep {
            step_number,
            rule_id: "income_tax_bracket".to_string(),
            rule_name: "Income Tax Bracket".to_string(),
            input: serde_json::json!({
                "lower_limit": line.lower_limit.normalize().to_string(),
                "upper_limit": line.upper_limit.map(|u| u.normalize().to_string()),
                "rate": line.rate.normalize().to_string()
            }),
            output: serde_json::json!({
                "taxed_amount": line.taxed_amount.normalize().to_string(),
                "tax": line.tax.normalize().to_string()
            }),
            reasoning: format!(
                "Bracket {}: €{} × {}% = €{}",
                bracket_label,
                line.taxed_amount.normalize(),
                (line.rate * Decimal::ONE_HUNDRED).normalize(),
                line.tax.normalize()
            ),
        });
        step_number += 1;
    }

    let tax: Decimal = bracket_lines.iter().map(|l| l.tax).sum();

    TaxResult {
        tax,
        taxable_for_tax,
        exempted_income,
        bracket_lines,
        audit_steps,
    }
}
