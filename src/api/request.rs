//! Request types for the Payroll Engine API.
//!
//! This module defines the JSON request structures for the `/calculate` and
//! `/timesheet/standard` endpoints.
//!
//! Months travel over HTTP as calendar months, January = 1 to December = 12.
//! A client holding a 0 to 11 month index (as a date picker does) must add
//! one, or convert with [`PayMonth::from_zero_based`] when calling the
//! library directly. A `month` of 0 is rejected with `INVALID_PERIOD`.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{DayEntries, PayMonth};

/// Request body for the `/calculate` endpoint.
///
/// Day entries are keyed by day of month. JSON object keys are strings, so
/// `{"3": {"start": "06:00", "end": "14:00"}}` describes the 3rd.
///
/// # Example
///
/// ```
/// use payroll_engine::api::CalculationRequest;
///
/// let request: CalculationRequest = serde_json::from_str(r#"{
///     "year": 2025,
///     "month": 3,
///     "pay_grade_index": 0,
///     "tax_class_index": 0,
///     "entries": { "3": { "start": "06:00", "end": "14:00" } }
/// }"#).unwrap();
///
/// assert_eq!(request.entries[&3].start.as_deref(), Some("06:00"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The calendar year.
    pub year: i32,
    /// The calendar month, 1 to 12. Not a 0-based index.
    pub month: u32,
    /// Index into the pay grade table.
    pub pay_grade_index: usize,
    /// Index into the tax class table.
    pub tax_class_index: usize,
    /// The day entries of the month; absent days were not worked.
    #[serde(default)]
    pub entries: DayEntries,
}

impl CalculationRequest {
    /// Returns the requested month.
    pub fn period(&self) -> EngineResult<PayMonth> {
        PayMonth::new(self.year, self.month)
    }
}

/// Request body for the `/timesheet/standard` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScheduleRequest {
    /// The calendar year.
    pub year: i32,
    /// The month, 1 to 12.
    pub month: u32,
}

impl StandardScheduleRequest {
    /// Returns the requested month.
    pub fn period(&self) -> EngineResult<PayMonth> {
        PayMonth::new(self.year, self.month)
    }
}
