//! Monthly overtime classification.
//!
//! Overtime is counted per month, not per day or week. The monthly
//! threshold is `weekly_hours × weeks_per_month`; walking the chronologically
//! ordered slots, every slot whose 1-based position exceeds the threshold is
//! overtime. Overtime slots are numbered 1..K across the month and the
//! number selects the staffed premium:
//!
//! | Overtime hour | Premium |
//! |---------------|---------|
//! | 1 – 6         | 25 %    |
//! | 7 – 8         | 40 %    |
//! | 9 and later   | 50 %    |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{OvertimeTier, WorkingTime};
use crate::models::{AuditStep, HourSlot};

/// The result of classifying a month's slots into normal and overtime hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeClassification {
    /// The monthly normal-hour threshold.
    pub threshold: Decimal,
    /// Number of slots within the threshold.
    pub normal_hours: u32,
    /// Number of slots past the threshold.
    pub overtime_hours: u32,
    /// The audit step recording this classification.
    pub audit_step: AuditStep,
}

/// Marks the slots past the monthly threshold as overtime.
///
/// The slots must already be in chronological order. Each overtime slot gets
/// its running overtime number in [`HourSlot::overtime_index`]; normal slots
/// are reset to `None`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::classify_overtime;
/// use payroll_engine::config::WorkingTime;
/// use payroll_engine::models::HourSlot;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
/// let mut slots: Vec<HourSlot> = (0..5)
///     .map(|hour| HourSlot { entry_day: 3, date, hour, overtime_index: None })
///     .collect();
///
/// // A 3-hour monthly threshold
/// let working_time = WorkingTime { weekly_hours: dec!(3), weeks_per_month: dec!(1) };
/// let result = classify_overtime(&mut slots, &working_time, 1);
///
/// assert_eq!(result.overtime_hours, 2);
/// assert_eq!(slots[3].overtime_index, Some(1));
/// assert_eq!(slots[4].overtime_index, Some(2));
/// ```
pub fn classify_overtime(
    slots: &mut [HourSlot],
    working_time: &WorkingTime,
    step_number: u32,
) -> OvertimeClassification {
    let threshold = working_time.monthly_hours();
    let mut normal_hours = 0u32;
    let mut overtime_hours = 0u32;

    for (index, slot) in slots.iter_mut().enumerate() {
        let position = Decimal::from(index + 1);
        if position > threshold {
            overtime_hours += 1;
            slot.overtime_index = Some(overtime_hours);
        } else {
            normal_hours += 1;
            slot.overtime_index = None;
        }
    }

    let reasoning = if overtime_hours > 0 {
        format!(
            "{} worked hours exceed the monthly threshold of {} hours ({} × {}) by {} hours",
            slots.len(),
            threshold.normalize(),
            working_time.weekly_hours.normalize(),
            working_time.weeks_per_month.normalize(),
            overtime_hours
        )
    } else {
        format!(
            "{} worked hours are within the monthly threshold of {} hours, no overtime",
            slots.len(),
            threshold.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "monthly_overtime".to_string(),
        rule_name: "Monthly Overtime Classification".to_string(),
        input: serde_json::json!({
            "worked_hours": slots.len(),
            "weekly_hours": working_time.weekly_hours.normalize().to_string(),
            "weeks_per_month": working_time.weeks_per_month.normalize().to_string()
        }),
        output: serde_json::json!({
            "threshold": threshold.normalize().to_string(),
            "normal_hours": normal_hours,
            "overtime_hours": overtime_hours
        }),
        reasoning,
    };

    OvertimeClassification {
        threshold,
        normal_hours,
        overtime_hours,
        audit_step,
    }
}

/// Returns the staffed premium in percent for the n-th overtime hour of the
/// month.
///
/// Returns zero if no tier covers the number, which can only happen for an
/// index of 0.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::overtime_premium;
/// use payroll_engine::config::Ruleset;
/// use rust_decimal_macros::dec;
///
/// let ruleset = Ruleset::default();
/// let tiers = &ruleset.supplements().overtime_tiers;
/// assert_eq!(overtime_premium(6, tiers), dec!(25));
/// assert_eq!(overtime_premium(7, tiers), dec!(40));
/// assert_eq!(overtime_premium(9, tiers), dec!(50));
/// ```
pub fn overtime_premium(overtime_index: u32, tiers: &[OvertimeTier]) -> Decimal {
    tiers
        .iter()
        .find(|tier| {
            overtime_index >= tier.from && tier.to.is_none_or(|to| overtime_index <= to)
        })
        .map(|tier| tier.percentage)
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Ruleset;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn slots(count: u32) -> Vec<HourSlot> {
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        (0..count)
            .map(|i| HourSlot {
                entry_day: 1 + i / 24,
                date: start + chrono::Days::new(u64::from(i / 24)),
                hour: i % 24,
                overtime_index: None,
            })
            .collect()
    }

    fn hessen_working_time() -> WorkingTime {
        Ruleset::default().working_time().clone()
    }

    // ==========================================================================
    // OT-001: threshold of 151.55 leaves 151 normal hours
    // ==========================================================================
    #[test]
    fn test_ot_001_fractional_threshold() {
        let mut s = slots(151);
        let result = classify_overtime(&mut s, &hessen_working_time(), 1);
        assert_eq!(result.threshold, dec!(151.55));
        assert_eq!(result.normal_hours, 151);
        assert_eq!(result.overtime_hours, 0);

        let mut s = slots(152);
        let result = classify_overtime(&mut s, &hessen_working_time(), 1);
        assert_eq!(result.normal_hours, 151);
        assert_eq!(result.overtime_hours, 1);
        assert_eq!(s[151].overtime_index, Some(1));
        assert_eq!(s[150].overtime_index, None);
    }

    // ==========================================================================
    // OT-002: crossing the threshold by three slots numbers them 1, 2, 3
    // ==========================================================================
    #[test]
    fn test_ot_002_overtime_numbered_in_order() {
        let mut s = slots(154);
        let result = classify_overtime(&mut s, &hessen_working_time(), 1);
        assert_eq!(result.overtime_hours, 3);
        let indices: Vec<_> = s[151..].iter().map(|slot| slot.overtime_index).collect();
        assert_eq!(indices, vec![Some(1), Some(2), Some(3)]);

        let ruleset = Ruleset::default();
        let tiers = &ruleset.supplements().overtime_tiers;
        for slot in &s[151..] {
            assert_eq!(overtime_premium(slot.overtime_index.unwrap(), tiers), dec!(25));
        }
    }

    // ==========================================================================
    // OT-003: stale overtime marks are cleared
    // ==========================================================================
    #[test]
    fn test_ot_003_reclassification_clears_old_marks() {
        let mut s = slots(3);
        s[0].overtime_index = Some(9);
        classify_overtime(&mut s, &hessen_working_time(), 1);
        assert!(s.iter().all(|slot| slot.overtime_index.is_none()));
    }

    // ==========================================================================
    // OT-004: staffed premium bands
    // ==========================================================================
    #[test]
    fn test_ot_004_premium_bands() {
        let ruleset = Ruleset::default();
        let tiers = &ruleset.supplements().overtime_tiers;
        let premiums: Vec<_> = (1..=10).map(|n| overtime_premium(n, tiers)).collect();
        assert_eq!(
            premiums,
            vec![
                dec!(25),
                dec!(25),
                dec!(25),
                dec!(25),
                dec!(25),
                dec!(25),
                dec!(40),
                dec!(40),
                dec!(50),
                dec!(50)
            ]
        );
        assert_eq!(overtime_premium(500, tiers), dec!(50));
        assert_eq!(overtime_premium(0, tiers), Decimal::ZERO);
    }

    #[test]
    fn test_empty_month_has_no_overtime() {
        let mut s: Vec<HourSlot> = vec![];
        let result = classify_overtime(&mut s, &hessen_working_time(), 2);
        assert_eq!(result.normal_hours, 0);
        assert_eq!(result.overtime_hours, 0);
        assert_eq!(result.audit_step.step_number, 2);
    }

    #[test]
    fn test_audit_step_records_threshold() {
        let mut s = slots(160);
        let result = classify_overtime(&mut s, &hessen_working_time(), 1);
        assert_eq!(result.audit_step.output["threshold"], "151.55");
        assert_eq!(result.audit_step.output["overtime_hours"], 9);
        assert!(result.audit_step.reasoning.contains("by 9 hours"));
    }
}
