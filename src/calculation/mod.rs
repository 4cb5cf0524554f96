//! Calculation logic for the Payroll Engine.
//!
//! This module contains the steps of the monthly payroll computation: time
//! parsing, hour expansion with breaks and overnight wrap, monthly overtime
//! classification, supplement classification under the highest-percentage
//! rule, hourly rate derivation and tax and social insurance deductions.
//! [`compute`] chains them into a [`PayrollResult`](crate::models::PayrollResult).

mod deductions;
mod engine;
mod hour_expansion;
mod hourly_rate;
mod overtime;
mod supplements;
mod time_parsing;

pub use deductions::{DeductionResult, calculate_deductions};
pub use engine::{compute, compute_timesheet};
pub use hour_expansion::{HourExpansion, expand_entries, span_hours};
pub use hourly_rate::{HourlyRateResult, calculate_hourly_rate};
pub use overtime::{OvertimeClassification, classify_overtime, overtime_premium};
pub use supplements::{
    SupplementCalculation, calculate_supplements, classify_supplements, is_public_holiday,
};
pub use time_parsing::{parse_end_hour, parse_time_of_day};
