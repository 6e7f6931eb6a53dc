//! Social-security contribution calculation.
//!
//! Employee contributions are a flat rate on gross salary, with the base
//! capped at an annual ceiling of twelve monthly insurable-earnings caps.

use rust_decimal::Decimal;

use crate::config::{ContributionConfig, MONTHS_PER_YEAR};
use crate::models::AuditStep;

/// The result of a contribution calculation.
#[derive(Debug, Clone)]
pub struct ContributionResult {
    /// The total annual contribution.
    pub total: Decimal,
    /// The salary the rate was applied to.
    pub capped_base: Decimal,
    /// The annual ceiling in force.
    pub annual_cap: Decimal,
    /// Whether the ceiling limited the base.
    pub cap_applied: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the employee social-security contribution for a gross salary.
///
/// The contribution base is `min(gross_annual, monthly_cap × 12)`, and the
/// contribution is `base × rate`. The result is non-decreasing in the gross
/// salary and constant once the ceiling is reached.
///
/// # Arguments
///
/// * `gross_annual` - The annual gross salary (non-negative)
/// * `config` - The tax year's contribution parameters
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use greek_payroll::calculation::calculate_contributions;
/// use greek_payroll::config::ContributionConfig;
/// use rust_decimal_macros::dec;
///
/// let config = ContributionConfig {
///     monthly_cap: dec!(7572.62),
///     rate: dec!(0.1337),
/// };
///
/// let result = calculate_contributions(dec!(24000), &config, 1);
/// assert_eq!(result.total, dec!(3208.80));
/// assert!(!result.cap_applied);
/// ```
pub fn calculate_contributions(
    gross_annual: Decimal,
    config: &ContributionConfig,
    step_number: u32,
) -> ContributionResult {
    let annual_cap = config.annual_cap();
    let cap_applied = gross_annual > annual_cap;
    let capped_base = gross_annual.min(annual_cap);
    let total = capped_base * config.rate;

    let rate_percent = (config.rate * Decimal::ONE_HUNDRED).normalize();
    let reasoning = if cap_applied {
        format!(
            "Gross €{} exceeds annual ceiling €{} (€{} × {}); €{} × {}% = €{}",
            gross_annual.normalize(),
            annual_cap.normalize(),
            config.monthly_cap.normalize(),
            MONTHS_PER_YEAR,
            capped_base.normalize(),
            rate_percent,
            total.normalize()
        )
    } else {
        format!(
            "€{} × {}% = €{}",
            capped_base.normalize(),
            rate_percent,
            total.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "social_security_contribution".to_string(),
        rule_name: "Social Security Contribution".to_string(),
        input: serde_json::json!({
            "gross_annual": gross_annual.normalize().to_string(),
            "monthly_cap": config.monthly_cap.normalize().to_string(),
            "rate": config.rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "annual_cap": annual_cap.normalize().to_string(),
            "capped_base": capped_base.normalize().to_string(),
            "cap_applied": cap_applied,
            "total_contributions": total.normalize().to_string()
        }),
        reasoning,
    };

    ContributionResult {
        total,
        capped_base,
        annual_cap,
        cap_applied,
        audit_step,
    }
}
