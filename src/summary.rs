//! Plain-text rendering of a salary breakdown.
//!
//! Produces the summary printed by the `calculate` command: headline
//! amounts, tax detail, social-security detail and the income distribution.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Breakdown, DistributionSlice};

/// Formats an amount as euros with thousands separators, e.g. `€1,247.83`.
///
/// # Examples
///
/// ```
/// use greek_payroll::summary::format_euro;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_euro(dec!(17517.136)), "€17,517.14");
/// assert_eq!(format_euro(dec!(0.5)), "€0.50");
/// ```
pub fn format_euro(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}€{}.{}", sign, grouped, fraction)
}

/// A breakdown and its distribution slices, displayable as a text summary.
pub struct Summary<'a> {
    breakdown: &'a Breakdown,
    distribution: &'a [DistributionSlice],
}

impl<'a> Summary<'a> {
    /// Creates a summary view over a breakdown.
    pub fn new(breakdown: &'a Breakdown, distribution: &'a [DistributionSlice]) -> Self {
        Self {
            breakdown,
            distribution,
        }
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.breakdown;

        writeln!(f, "Summary")?;
        writeln!(f, "  Gross Annual Salary: {}", format_euro(b.gross_annual))?;
        writeln!(f, "  Net Annual Salary: {}", format_euro(b.net_annual))?;
        writeln!(
            f,
            "  Net Salary per Payment ({}): {}",
            b.payment_count,
            format_euro(b.net_per_payment)
        )?;

        writeln!(f)?;
        writeln!(f, "Tax Details")?;
        if let Some(exempted) = b.exempted_income {
            writeln!(
                f,
                "  Tax Residency Mode: income tax exemption applied ({} exempted)",
                format_euro(exempted)
            )?;
            writeln!(
                f,
                "  Taxable Income After Exemption: {}",
                format_euro(b.taxable_income_for_tax)
            )?;
        }
        writeln!(
            f,
            "  Total Income Tax: annual {} | per payment {}",
            format_euro(b.income_tax),
            format_euro(b.income_tax_per_payment)
        )?;

        writeln!(f)?;
        writeln!(f, "Social Security")?;
        writeln!(
            f,
            "  Total Social Security: annual {} | per payment {}",
            format_euro(b.total_contributions),
            format_euro(b.contributions_per_payment)
        )?;
        if b.contribution_cap_applied {
            writeln!(
                f,
                "  Contribution base capped at {}",
                format_euro(b.contribution_base)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Income Distribution")?;
        for slice in self.distribution {
            writeln!(
                f,
                "  {:<16} {:>14} {:>7}%",
                slice.label,
                format_euro(slice.amount),
                slice.percent
            )?;
        }

        Ok(())
    }
}
