//! The payroll computation pipeline.
//!
//! [`compute`] runs the individual calculation steps in order:
//!
//! 1. hourly rate of the pay grade
//! 2. hour expansion of the day entries
//! 3. monthly overtime classification
//! 4. supplement aggregation
//! 5. gross total
//! 6. deductions and net total
//!
//! Each step contributes an [`AuditStep`] to the result's trace. A month
//! without any day entries skips steps 2 to 6 and yields a flat estimate.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::Ruleset;
use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, DayEntries, PayMonth, PayrollResult,
    SupplementBreakdown, SupplementCategory, TimeSheet,
};

use super::{
    calculate_deductions, calculate_hourly_rate, calculate_supplements, classify_overtime,
    expand_entries,
};

/// Computes the payroll of one month.
///
/// # Arguments
///
/// * `entries` - The day entries of the month, keyed by day of month
/// * `pay_grade_index` - Index into the ruleset's pay grade table
/// * `tax_class_index` - Index into the ruleset's tax class table
/// * `period` - The month being computed
/// * `ruleset` - The pay, tax and supplement tables
///
/// # Errors
///
/// - [`EngineError::OutOfRange`](crate::error::EngineError::OutOfRange) for an
///   unknown pay grade or tax class index
/// - [`EngineError::Validation`](crate::error::EngineError::Validation) for a
///   malformed entry, naming its day
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::compute;
/// use payroll_engine::config::Ruleset;
/// use payroll_engine::models::{DayEntries, PayMonth};
/// use rust_decimal_macros::dec;
///
/// let ruleset = Ruleset::default();
/// let result = compute(&DayEntries::new(), 0, 0, PayMonth::new(2025, 3).unwrap(), &ruleset).unwrap();
///
/// assert_eq!(result.gross_total, dec!(3189.00));
/// assert_eq!(result.net_total, dec!(2072.85));
/// assert!(result.is_estimate);
/// ```
pub fn compute(
    entries: &DayEntries,
    pay_grade_index: usize,
    tax_class_index: usize,
    period: PayMonth,
    ruleset: &Ruleset,
) -> EngineResult<PayrollResult> {
    let pay_grade = ruleset.pay_grade(pay_grade_index)?;
    let tax_class = ruleset.tax_class(tax_class_index)?;
    let base_salary = pay_grade.monthly_base_salary;

    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let hourly_rate = calculate_hourly_rate(pay_grade, ruleset.working_time(), step_number);
    let rate = hourly_rate.rate;
    steps.push(hourly_rate.audit_step);
    step_number += 1;

    if entries.is_empty() {
        let ratio = ruleset.empty_state_net_ratio();
        let net_total = base_salary * ratio;
        debug!(%period, pay_grade = %pay_grade.code, %net_total, "No day entries, using flat estimate");

        steps.push(AuditStep {
            step_number,
            rule_id: "empty_state_estimate".to_string(),
            rule_name: "Empty Month Estimate".to_string(),
            input: serde_json::json!({
                "base_salary": base_salary.to_string(),
                "net_ratio": ratio.to_string()
            }),
            output: serde_json::json!({
                "gross_total": base_salary.to_string(),
                "net_total": net_total.to_string()
            }),
            reasoning: format!(
                "No day entries for {}: net estimated as {} × {}",
                period, base_salary, ratio
            ),
        });
        warnings.push(AuditWarning {
            code: "EMPTY_STATE_ESTIMATE".to_string(),
            message: format!(
                "No hours entered for {}; the net total is a flat estimate without deductions",
                period
            ),
            severity: "low".to_string(),
        });

        return Ok(PayrollResult {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            period,
            pay_grade: pay_grade.code.clone(),
            tax_class: tax_class.code.to_string(),
            base_salary,
            hourly_rate: rate,
            total_supplements: Decimal::ZERO,
            gross_total: base_salary,
            net_total,
            worked_hours: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            break_hours: Decimal::ZERO,
            supplement_breakdown: empty_breakdown(),
            deductions: None,
            slot_lines: Vec::new(),
            is_estimate: true,
            audit_trace: AuditTrace { steps, warnings },
        });
    }

    let expansion = expand_entries(entries, period, ruleset.breaks(), step_number)?;
    steps.push(expansion.audit_step);
    step_number += 1;
    for day in &expansion.incomplete_days {
        warn!(%period, day, "Skipping incomplete day entry");
        warnings.push(AuditWarning {
            code: "INCOMPLETE_ENTRY".to_string(),
            message: format!(
                "Day {} has only a start or an end time and was not counted",
                day
            ),
            severity: "medium".to_string(),
        });
    }
    let mut slots = expansion.slots;
    debug!(%period, slots = slots.len(), break_hours = %expansion.break_hours, "Expanded day entries");

    let overtime = classify_overtime(&mut slots, ruleset.working_time(), step_number);
    steps.push(overtime.audit_step);
    step_number += 1;
    debug!(%period, overtime_hours = overtime.overtime_hours, threshold = %overtime.threshold, "Classified overtime");

    let supplements = calculate_supplements(&slots, rate, ruleset.supplements(), step_number);
    steps.push(supplements.audit_step);
    step_number += 1;

    let gross_total = base_salary + supplements.total;
    steps.push(AuditStep {
        step_number,
        rule_id: "gross_total".to_string(),
        rule_name: "Gross Total".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.to_string(),
            "total_supplements": supplements.total.to_string()
        }),
        output: serde_json::json!({
            "gross_total": gross_total.to_string()
        }),
        reasoning: format!(
            "Base salary {} plus supplements {} = {}",
            base_salary,
            supplements.total.round_dp(2),
            gross_total.round_dp(2)
        ),
    });
    step_number += 1;

    let deductions = calculate_deductions(
        gross_total,
        tax_class,
        ruleset.social_insurance(),
        step_number,
    );
    steps.push(deductions.audit_step);
    let net_total = gross_total - deductions.breakdown.total;
    debug!(%period, %gross_total, %net_total, "Computed payroll");

    Ok(PayrollResult {
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        period,
        pay_grade: pay_grade.code.clone(),
        tax_class: tax_class.code.to_string(),
        base_salary,
        hourly_rate: rate,
        total_supplements: supplements.total,
        gross_total,
        net_total,
        worked_hours: Decimal::from(slots.len()),
        overtime_hours: Decimal::from(overtime.overtime_hours),
        break_hours: expansion.break_hours,
        supplement_breakdown: supplements.breakdown,
        deductions: Some(deductions.breakdown),
        slot_lines: supplements.slot_lines,
        is_estimate: false,
        audit_trace: AuditTrace { steps, warnings },
    })
}

/// Computes the payroll of a [`TimeSheet`].
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::compute_timesheet;
/// use payroll_engine::config::Ruleset;
/// use payroll_engine::models::{PayMonth, TimeSheet};
///
/// let ruleset = Ruleset::default();
/// let mut sheet = TimeSheet::new(PayMonth::new(2025, 3).unwrap());
/// sheet.apply_standard_schedule(ruleset.standard_schedule());
///
/// let result = compute_timesheet(&sheet, 0, 0, &ruleset).unwrap();
/// assert!(!result.is_estimate);
/// ```
pub fn compute_timesheet(
    sheet: &TimeSheet,
    pay_grade_index: usize,
    tax_class_index: usize,
    ruleset: &Ruleset,
) -> EngineResult<PayrollResult> {
    compute(
        sheet.entries(),
        pay_grade_index,
        tax_class_index,
        sheet.period(),
        ruleset,
    )
}

fn empty_breakdown() -> SupplementBreakdown {
    SupplementCategory::ALL
        .iter()
        .map(|&category| (category, Decimal::ZERO))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::DayEntry;
    use rust_decimal_macros::dec;

    fn march_2025() -> PayMonth {
        PayMonth::new(2025, 3).unwrap()
    }

    fn entries(items: &[(u32, &str, &str)]) -> DayEntries {
        items
            .iter()
            .map(|&(day, start, end)| (day, DayEntry::new(start, end)))
            .collect()
    }

    // ==========================================================================
    // EN-001: empty month yields the flat estimate
    // ==========================================================================
    #[test]
    fn test_en_001_empty_month_estimate() {
        let ruleset = Ruleset::default();
        let result = compute(&DayEntries::new(), 0, 0, march_2025(), &ruleset).unwrap();

        assert_eq!(result.base_salary, dec!(3189.00));
        assert_eq!(result.total_supplements, Decimal::ZERO);
        assert_eq!(result.gross_total, dec!(3189.00));
        assert_eq!(result.net_total, dec!(2072.85));
        assert_eq!(result.deductions, None);
        assert!(result.is_estimate);
        assert_eq!(result.audit_trace.warnings.len(), 1);
        assert_eq!(result.audit_trace.warnings[0].code, "EMPTY_STATE_ESTIMATE");
        assert_eq!(result.supplement_breakdown.len(), 6);
    }

    // ==========================================================================
    // EN-002: Saturday early shift
    // ==========================================================================
    #[test]
    fn test_en_002_saturday_shift() {
        let ruleset = Ruleset::default();
        let result = compute(
            &entries(&[(1, "06:00", "14:00")]),
            0,
            0,
            march_2025(),
            &ruleset,
        )
        .unwrap();

        assert_eq!(result.worked_hours, dec!(6));
        assert_eq!(result.break_hours, dec!(0.75));
        assert_eq!(result.overtime_hours, Decimal::ZERO);
        assert_eq!(result.hourly_rate.round_dp(2), dec!(21.04));
        assert_eq!(
            result.total_supplements.round_dp(10),
            (result.hourly_rate * dec!(3)).round_dp(10)
        );
        assert_eq!(result.gross_total, result.base_salary + result.total_supplements);
        assert!(!result.is_estimate);

        let deductions = result.deductions.unwrap();
        assert_eq!(result.net_total, result.gross_total - deductions.total);
    }

    // ==========================================================================
    // EN-003: unknown table indices are rejected
    // ==========================================================================
    #[test]
    fn test_en_003_out_of_range_indices() {
        let ruleset = Ruleset::default();
        let result = compute(&DayEntries::new(), 7, 0, march_2025(), &ruleset);
        assert!(matches!(
            result,
            Err(EngineError::OutOfRange {
                table: "pay grade",
                index: 7,
                len: 7
            })
        ));

        let result = compute(&DayEntries::new(), 0, 6, march_2025(), &ruleset);
        assert!(matches!(
            result,
            Err(EngineError::OutOfRange {
                table: "tax class",
                ..
            })
        ));
    }

    // ==========================================================================
    // EN-004: malformed time names the day
    // ==========================================================================
    #[test]
    fn test_en_004_malformed_time() {
        let ruleset = Ruleset::default();
        let result = compute(
            &entries(&[(3, "06:00", "14:00"), (4, "ab:00", "14:00")]),
            0,
            0,
            march_2025(),
            &ruleset,
        );
        assert!(matches!(result, Err(EngineError::Validation { day: 4, .. })));
    }

    // ==========================================================================
    // EN-005: incomplete entries are skipped with a warning
    // ==========================================================================
    #[test]
    fn test_en_005_incomplete_entry_warning() {
        let ruleset = Ruleset::default();
        let mut items = entries(&[(3, "06:00", "14:00")]);
        items.insert(
            4,
            DayEntry {
                start: Some("06:00".to_string()),
                end: None,
            },
        );

        let result = compute(&items, 0, 0, march_2025(), &ruleset).unwrap();
        assert_eq!(result.worked_hours, dec!(6));
        assert!(!result.is_estimate);
        assert_eq!(result.audit_trace.warnings.len(), 1);
        assert_eq!(result.audit_trace.warnings[0].code, "INCOMPLETE_ENTRY");
    }

    #[test]
    fn test_audit_steps_are_numbered_in_order() {
        let ruleset = Ruleset::default();
        let result = compute(
            &entries(&[(3, "06:00", "14:00")]),
            0,
            0,
            march_2025(),
            &ruleset,
        )
        .unwrap();

        let rule_ids: Vec<_> = result
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            rule_ids,
            vec![
                "hourly_rate",
                "hour_expansion",
                "monthly_overtime",
                "supplement_aggregation",
                "gross_total",
                "deductions"
            ]
        );
        for (i, step) in result.audit_trace.steps.iter().enumerate() {
            assert_eq!(step.step_number, i as u32 + 1);
        }
    }

    #[test]
    fn test_higher_grade_raises_gross() {
        let ruleset = Ruleset::default();
        let items = entries(&[(3, "06:00", "14:00")]);
        let e5 = compute(&items, 0, 0, march_2025(), &ruleset).unwrap();
        let e11 = compute(&items, 6, 0, march_2025(), &ruleset).unwrap();
        assert!(e11.gross_total > e5.gross_total);
        assert_eq!(e11.pay_grade, "E11");
    }
}
