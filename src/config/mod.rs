//! Configuration loading and management for the payroll engine.
//!
//! This module provides functionality to load per-tax-year parameter tables
//! from YAML files: contribution ceiling and rate, income tax brackets, the
//! residency exemption share, and the allowed payment counts.
//!
//! # Example
//!
//! ```no_run
//! use greek_payroll::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/gr").unwrap();
//! println!("Loaded jurisdiction: {}", config.jurisdiction().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ContributionConfig, ExemptionConfig, IncomeTaxConfig, JurisdictionMetadata, MONTHS_PER_YEAR,
    PayrollConfig, TaxBracket, TaxYearConfig,
};
