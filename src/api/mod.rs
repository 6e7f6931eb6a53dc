//! HTTP API module for the payroll engine.
//!
//! This module provides the REST API endpoints for calculating a Greek
//! salary breakdown and inspecting the configured tax years.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{ApiError, HealthResponse, TaxYearsResponse};
pub use state::AppState;
