//! Calculation logic for the payroll engine.
//!
//! This module contains the calculation functions for a Greek salary:
//! capped social-security contributions, progressive income tax with the
//! optional residency-transfer exemption, net pay composition, the
//! income-distribution chart data, and the end-to-end payroll calculation
//! that ties them together.

mod contributions;
mod distribution;
mod income_tax;
mod net_pay;
mod payroll;

pub use contributions::{ContributionResult, calculate_contributions};
pub use distribution::income_distribution;
pub use income_tax::{TaxResult, apply_brackets, calculate_income_tax};
pub use net_pay::{NetPayResult, compose_net_pay};
pub use payroll::{PayrollCalculation, calculate_payroll};
