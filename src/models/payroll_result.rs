//! Payroll result models.
//!
//! This module contains the [`PayrollResult`] type and the structures it is
//! made of: per-hour pay lines, the deduction breakdown and the audit trace
//! that records every step of the computation.

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{PayMonth, SupplementBreakdown, SupplementCategory};

/// One worked hour as it appears on the pay slip.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{SlotPayLine, SupplementCategory};
/// use chrono::{NaiveDate, Weekday};
/// use rust_decimal_macros::dec;
///
/// let line = SlotPayLine {
///     date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
///     weekday: Weekday::Sat,
///     hour: 6,
///     label: "06:00-07:00".to_string(),
///     effective_percentage: dec!(50),
///     category: Some(SupplementCategory::Saturday),
///     rate_with_supplement: dec!(31.56),
///     supplement_amount: dec!(10.52),
///     is_overtime: false,
/// };
/// assert_eq!(line.category, Some(SupplementCategory::Saturday));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPayLine {
    /// The calendar date of the hour.
    pub date: NaiveDate,
    /// The weekday of the hour.
    pub weekday: Weekday,
    /// The hour of day the slot starts at.
    pub hour: u32,
    /// The time range, e.g. `"06:00-07:00"`.
    pub label: String,
    /// The supplement percentage paid for this hour.
    pub effective_percentage: Decimal,
    /// The category that set the paid percentage, if any applied.
    pub category: Option<SupplementCategory>,
    /// Hourly rate including the paid supplement.
    pub rate_with_supplement: Decimal,
    /// The supplement part of the hour's pay.
    pub supplement_amount: Decimal,
    /// Whether the hour is past the monthly threshold.
    pub is_overtime: bool,
}

/// Tax and social insurance deductions, all derived from the gross total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    /// Income tax (Lohnsteuer).
    pub income_tax: Decimal,
    /// Pension insurance (Rentenversicherung).
    pub pension: Decimal,
    /// Unemployment insurance (Arbeitslosenversicherung).
    pub unemployment: Decimal,
    /// Health insurance (Krankenversicherung).
    pub health: Decimal,
    /// Long-term care insurance (Pflegeversicherung).
    pub long_term_care: Decimal,
    /// Sum of the four social insurance contributions.
    pub social_insurance_total: Decimal,
    /// The income the tax rate was applied to.
    pub taxable_income: Decimal,
    /// Sum of all five deductions.
    pub total: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete result of a payroll computation.
///
/// A result is always built from scratch; a new computation replaces the
/// previous result instead of updating it. It carries no timestamps or
/// random identifiers, so identical inputs produce identical results.
///
/// `deductions` is `None` for the estimate produced when no day entries
/// exist at all. In that case `net_total` is the base salary times the
/// configured flat ratio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The month the payroll covers.
    pub period: PayMonth,
    /// The pay grade code, e.g. `"E5"`.
    pub pay_grade: String,
    /// The tax class code, e.g. `"I"`.
    pub tax_class: String,
    /// The fixed monthly base salary of the pay grade.
    pub base_salary: Decimal,
    /// The hourly rate supplements are calculated from.
    pub hourly_rate: Decimal,
    /// Sum of the paid (max-rule) supplements.
    pub total_supplements: Decimal,
    /// Base salary plus supplements.
    pub gross_total: Decimal,
    /// Gross total minus deductions.
    pub net_total: Decimal,
    /// Number of worked hour slots.
    pub worked_hours: Decimal,
    /// Number of hour slots past the monthly threshold.
    pub overtime_hours: Decimal,
    /// Break time inside the worked ranges.
    pub break_hours: Decimal,
    /// Supplement amounts per category (does not reconcile with
    /// `total_supplements` when categories overlap).
    pub supplement_breakdown: SupplementBreakdown,
    /// The deductions, or `None` for the empty-month estimate.
    pub deductions: Option<DeductionBreakdown>,
    /// One line per worked hour, in chronological order.
    pub slot_lines: Vec<SlotPayLine>,
    /// Whether the result is the flat-ratio estimate for an empty month.
    pub is_estimate: bool,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
