//! Net pay composition.
//!
//! Combines a contribution result and a tax result into the final
//! [`Breakdown`]: taxable income = gross − contributions, net annual =
//! taxable income − tax, and per-payment amounts divide by the payment count.

use rust_decimal::Decimal;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{AuditStep, Breakdown};

use super::contributions::ContributionResult;
use super::income_tax::TaxResult;

/// The result of composing net pay.
#[derive(Debug, Clone)]
pub struct NetPayResult {
    /// The complete salary breakdown.
    pub breakdown: Breakdown,
    /// The audit step recording the composition.
    pub audit_step: AuditStep,
}

/// Composes the final breakdown from contribution and tax results.
///
/// # Arguments
///
/// * `gross_annual` - The annual gross salary
/// * `payment_count` - Number of salary payments per year
/// * `moving_residency` - Whether the residency exemption was requested
/// * `contributions` - The contribution calculation result
/// * `tax` - The income tax calculation result
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns `CalculationError` if `payment_count` is zero.
pub fn compose_net_pay(
    gross_annual: Decimal,
    payment_count: u32,
    moving_residency: bool,
    contributions: &ContributionResult,
    tax: &TaxResult,
    step_number: u32,
) -> PayrollResult<NetPayResult> {
    if payment_count == 0 {
        return Err(PayrollError::CalculationError {
            message: "payment count must be positive".to_string(),
        });
    }
    let payments = Decimal::from(payment_count);

    let taxable_income = gross_annual - contributions.total;
    let net_annual = taxable_income - tax.tax;
    let net_per_payment = net_annual / payments;

    let breakdown = Breakdown {
        gross_annual,
        payment_count,
        contribution_base: contributions.capped_base,
        contribution_cap_applied: contributions.cap_applied,
        total_contributions: contributions.total,
        contributions_per_payment: contributions.total / payments,
        taxable_income,
        moving_residency,
        exempted_income: moving_residency.then_some(tax.exempted_income),
        taxable_income_for_tax: tax.taxable_for_tax,
        tax_brackets: tax.bracket_lines.clone(),
        income_tax: tax.tax,
        income_tax_per_payment: tax.tax / payments,
        net_annual,
        net_per_payment,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "gross_annual": gross_annual.normalize().to_string(),
            "total_contributions": contributions.total.normalize().to_string(),
            "income_tax": tax.tax.normalize().to_string(),
            "payment_count": payment_count
        }),
        output: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string(),
            "net_annual": net_annual.normalize().to_string(),
            "net_per_payment": net_per_payment.normalize().to_string()
        }),
        reasoning: format!(
            "€{} - €{} contributions - €{} tax = €{} net; €{} / {} payments = €{}",
            gross_annual.normalize(),
            contributions.total.normalize(),
            tax.tax.normalize(),
            net_annual.normalize(),
            net_annual.normalize(),
            payment_count,
            net_per_payment.normalize()
        ),
    };

    Ok(NetPayResult {
        breakdown,
        audit_step,
    })
}
