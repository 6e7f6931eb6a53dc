//! Request types for the payroll API.
//!
//! This module defines the JSON request structure for the `/calculate` endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TaxYearConfig;
use crate::models::PayrollInput;

/// Request body for the `/calculate` endpoint.
///
/// Only `gross_annual` is required. The payment count defaults to the tax
/// year's default (14), the exemption defaults to off, and the tax year
/// defaults to the latest configured year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Annual gross salary.
    pub gross_annual: Decimal,
    /// Number of salary payments per year.
    #[serde(default)]
    pub payment_count: Option<u32>,
    /// Whether the residency-transfer exemption applies.
    #[serde(default)]
    pub moving_residency: bool,
    /// The tax year to calculate for.
    #[serde(default)]
    pub tax_year: Option<i32>,
}

impl CalculationRequest {
    /// Resolves the request into calculator input for the given tax year.
    pub fn into_input(self, tax_year: &TaxYearConfig) -> PayrollInput {
        PayrollInput {
            gross_annual: self.gross_annual,
            payment_count: self
                .payment_count
                .unwrap_or(tax_year.default_payment_count),
            moving_residency: self.moving_residency,
        }
    }
}
