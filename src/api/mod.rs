//! HTTP API module for the Payroll Engine.
//!
//! This module provides the REST API endpoints for computing a monthly
//! payroll under the IG Metall Hessen ruleset and for reading the pay grade
//! and tax class tables.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, StandardScheduleRequest};
pub use response::{
    ApiError, HealthResponse, PayGradeResponse, StandardScheduleResponse, TaxClassResponse,
};
pub use state::AppState;
