//! Income distribution (pie chart data).
//!
//! Splits gross salary into the slices shown on the income-distribution
//! chart. Under the residency exemption the exempted income is carved out of
//! net pay so that the slices always add back up to the gross salary.

use rust_decimal::Decimal;

use crate::models::{Breakdown, DistributionSlice, SliceKind};

/// Builds the income-distribution slices for a breakdown.
///
/// Slices are ordered Net Pay, Exempted Income (only with the exemption),
/// Income Tax, Social Security. Returns no slices for a zero gross salary.
///
/// # Examples
///
/// ```
/// use greek_payroll::calculation::{calculate_payroll, income_distribution};
/// use greek_payroll::config::ConfigLoader;
/// use greek_payroll::models::{PayrollInput, SliceKind};
/// use rust_decimal_macros::dec;
///
/// let loader = ConfigLoader::load("config/gr").unwrap();
/// let input = PayrollInput {
///     gross_annual: dec!(24000),
///     payment_count: 14,
///     moving_residency: true,
/// };
/// let calculation = calculate_payroll(&input, loader.latest_tax_year())
///     .unwrap()
///     .unwrap();
///
/// let slices = income_distribution(&calculation.breakdown);
/// assert_eq!(slices.len(), 4);
/// assert_eq!(slices[1].kind, SliceKind::ExemptedIncome);
/// ```
pub fn income_distribution(breakdown: &Breakdown) -> Vec<DistributionSlice> {
    let gross = breakdown.gross_annual;
    if gross <= Decimal::ZERO {
        return Vec::new();
    }

    let exempted = breakdown.exempted_or_zero();
    let mut parts = vec![(SliceKind::NetPay, breakdown.net_annual - exempted)];
    if breakdown.exempted_income.is_some() {
        parts.push((SliceKind::ExemptedIncome, exempted));
    }
    parts.push((SliceKind::IncomeTax, breakdown.income_tax));
    parts.push((SliceKind::SocialSecurity, breakdown.total_contributions));

    parts
        .into_iter()
        .map(|(kind, amount)| DistributionSlice {
            kind,
            label: kind.label().to_string(),
            amount,
            percent: (amount / gross * Decimal::ONE_HUNDRED).round_dp(2),
            color: kind.color().to_string(),
        })
        .collect()
}
