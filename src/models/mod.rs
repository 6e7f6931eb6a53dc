//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod breakdown;
mod calculation_result;
mod payroll_input;

pub use breakdown::{Breakdown, DistributionSlice, SliceKind, TaxBracketLine};
pub use calculation_result::{AuditStep, AuditTrace, AuditWarning, CalculationResult};
pub use payroll_input::PayrollInput;
