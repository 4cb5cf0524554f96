//! Hourly rate derivation.
//!
//! Supplements are paid on an hourly rate derived from the fixed monthly
//! salary of the pay grade: `monthly_base_salary / (weekly_hours ×
//! weeks_per_month)`.

use rust_decimal::Decimal;

use crate::config::{PayGrade, WorkingTime};
use crate::models::AuditStep;

/// The result of an hourly rate derivation, including the rate and audit step.
#[derive(Debug, Clone)]
pub struct HourlyRateResult {
    /// The derived hourly rate, unrounded.
    pub rate: Decimal,
    /// The audit step recording this derivation.
    pub audit_step: AuditStep,
}

/// Derives the hourly rate of a pay grade.
///
/// # Arguments
///
/// * `pay_grade` - The pay grade providing the monthly base salary
/// * `working_time` - The weekly hours and weeks per month of the ruleset
/// * `step_number` - The position of this step in the audit trace
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_hourly_rate;
/// use payroll_engine::config::Ruleset;
/// use rust_decimal_macros::dec;
///
/// let ruleset = Ruleset::default();
/// let e5 = ruleset.pay_grade(0).unwrap();
///
/// let result = calculate_hourly_rate(e5, ruleset.working_time(), 1);
/// assert_eq!(result.rate.round_dp(2), dec!(21.04));
/// ```
pub fn calculate_hourly_rate(
    pay_grade: &PayGrade,
    working_time: &WorkingTime,
    step_number: u32,
) -> HourlyRateResult {
    let monthly_hours = working_time.monthly_hours();
    let rate = pay_grade.monthly_base_salary / monthly_hours;

    let audit_step = AuditStep {
        step_number,
        rule_id: "hourly_rate".to_string(),
        rule_name: "Hourly Rate Derivation".to_string(),
        input: serde_json::json!({
            "pay_grade": pay_grade.code,
            "monthly_base_salary": pay_grade.monthly_base_salary.to_string(),
            "monthly_hours": monthly_hours.normalize().to_string()
        }),
        output: serde_json::json!({
            "rate": rate.to_string()
        }),
        reasoning: format!(
            "{} monthly salary {} divided by {} monthly hours = {} per hour",
            pay_grade.code,
            pay_grade.monthly_base_salary,
            monthly_hours.normalize(),
            rate.round_dp(4)
        ),
    };

    HourlyRateResult { rate, audit_step }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Ruleset;
    use rust_decimal_macros::dec;

    // ==========================================================================
    // HR-001: E5 hourly rate
    // ==========================================================================
    #[test]
    fn test_hr_001_e5_rate() {
        let ruleset = Ruleset::default();
        let e5 = ruleset.pay_grade(0).unwrap();
        assert_eq!(e5.code, "E5");
        assert_eq!(e5.monthly_base_salary, dec!(3189));

        let result = calculate_hourly_rate(e5, ruleset.working_time(), 1);
        assert_eq!(result.rate.round_dp(4), dec!(21.0426));
    }

    // ==========================================================================
    // HR-002: rate scales with the salary
    // ==========================================================================
    #[test]
    fn test_hr_002_rate_is_salary_over_hours() {
        let grade = PayGrade {
            code: "X".to_string(),
            monthly_base_salary: dec!(1515.50),
        };
        let working_time = WorkingTime {
            weekly_hours: dec!(35),
            weeks_per_month: dec!(4.33),
        };
        let result = calculate_hourly_rate(&grade, &working_time, 1);
        assert_eq!(result.rate, dec!(10));
    }

    #[test]
    fn test_audit_step() {
        let ruleset = Ruleset::default();
        let result = calculate_hourly_rate(ruleset.pay_grade(0).unwrap(), ruleset.working_time(), 2);
        assert_eq!(result.audit_step.step_number, 2);
        assert_eq!(result.audit_step.rule_id, "hourly_rate");
        assert_eq!(result.audit_step.input["monthly_hours"], "151.55");
    }
}
