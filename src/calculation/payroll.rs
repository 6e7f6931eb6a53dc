//! End-to-end payroll calculation.
//!
//! Runs contributions, income tax and net pay composition in order for one
//! validated [`PayrollInput`], numbering the audit steps as it goes.

use rust_decimal::Decimal;

use crate::config::TaxYearConfig;
use crate::error::PayrollResult;
use crate::models::{AuditStep, AuditWarning, Breakdown, DistributionSlice, PayrollInput};

use super::contributions::calculate_contributions;
use super::distribution::income_distribution;
use super::income_tax::calculate_income_tax;
use super::net_pay::compose_net_pay;

/// Everything produced by a payroll calculation for a non-zero salary.
#[derive(Debug, Clone)]
pub struct PayrollCalculation {
    /// The salary breakdown.
    pub breakdown: Breakdown,
    /// Income-distribution chart slices.
    pub distribution: Vec<DistributionSlice>,
    /// Audit steps in calculation order.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings raised along the way.
    pub warnings: Vec<AuditWarning>,
}

/// Calculates the full breakdown of a salary under a tax year's parameters.
///
/// # Returns
///
/// * `Ok(Some(_))` - the breakdown for a positive salary
/// * `Ok(None)` - the salary is zero, so there is nothing to compute
///
/// # Errors
///
/// Returns `InvalidInput` for a negative salary or an unsupported payment
/// count.
///
/// # Examples
///
/// ```
/// use greek_payroll::calculation::calculate_payroll;
/// use greek_payroll::config::ConfigLoader;
/// use greek_payroll::models::PayrollInput;
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
///
/// let loader = ConfigLoader::load("config/gr").unwrap();
/// let year = loader.get_tax_year(2025).unwrap();
///
/// let input = PayrollInput {
///     gross_annual: dec!(24000),
///     payment_count: 14,
///     moving_residency: false,
/// };
/// let calculation = calculate_payroll(&input, year).unwrap().unwrap();
/// assert_eq!(calculation.breakdown.net_per_payment.round_dp(2), dec!(1247.83));
///
/// let nothing = PayrollInput { gross_annual: Decimal::ZERO, ..input };
/// assert!(calculate_payroll(&nothing, year).unwrap().is_none());
/// ```
pub fn calculate_payroll(
    input: &PayrollInput,
    tax_year: &TaxYearConfig,
) -> PayrollResult<Option<PayrollCalculation>> {
    input.validate(tax_year)?;

    if !input.has_income() {
        return Ok(None);
    }

    let mut audit_steps = Vec::new();
    let mut warnings = Vec::new();
    let mut step_number: u32 = 1;

    let contributions =
        calculate_contributions(input.gross_annual, &tax_year.contributions, step_number);
    audit_steps.push(contributions.audit_step.clone());
    step_number += 1;

    if contributions.cap_applied {
        warnings.push(AuditWarning {
            code: "CONTRIBUTION_CAP_APPLIED".to_string(),
            message: format!(
                "Gross salary exceeds the annual contribution ceiling of €{}; contributions are capped",
                contributions.annual_cap.normalize()
            ),
            severity: "low".to_string(),
        });
    }

    let taxable_income = (input.gross_annual - contributions.total).max(Decimal::ZERO);
    let tax = calculate_income_tax(
        taxable_income,
        input.moving_residency,
        &tax_year.income_tax,
        &tax_year.exemption,
        step_number,
    );
    step_number += tax.audit_steps.len() as u32;
    audit_steps.extend(tax.audit_steps.iter().cloned());

    let net_pay = compose_net_pay(
        input.gross_annual,
        input.payment_count,
        input.moving_residency,
        &contributions,
        &tax,
        step_number,
    )?;
    audit_steps.push(net_pay.audit_step);

    let distribution = income_distribution(&net_pay.breakdown);

    Ok(Some(PayrollCalculation {
        breakdown: net_pay.breakdown,
        distribution,
        audit_steps,
        warnings,
    }))
}
