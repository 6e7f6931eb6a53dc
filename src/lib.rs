//! Greek payroll engine.
//!
//! This crate calculates employee social-security contributions, progressive
//! income tax (with the optional 50% residency-transfer exemption) and net
//! pay from an annual gross salary, using per-tax-year parameter tables.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod summary;
