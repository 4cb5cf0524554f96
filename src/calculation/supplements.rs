//! Supplement (Zuschlag) classification and aggregation.
//!
//! Each worked hour is checked against every supplement category:
//!
//! - night: the hour lies in the night window (20:00 to 06:00)
//! - late shift: the hour lies in the late shift window (14:00 to 20:00) and
//!   is not a night hour
//! - Saturday and Sunday by weekday
//! - holiday: the date's month-day is one of the configured public holidays
//! - overtime: the staffed premium of the hour's overtime number
//!
//! Supplements never add up. The hour is paid at the highest applicable
//! percentage only, while the per-category breakdown records every category
//! at its own percentage.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::overtime_premium;
use crate::config::{SupplementRules, parse_month_day};
use crate::models::{
    AuditStep, HourSlot, SlotPayLine, SupplementBreakdown, SupplementCategory, SupplementSet,
};

/// The aggregated supplements of a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementCalculation {
    /// Sum of the paid supplement of every hour.
    pub total: Decimal,
    /// Amount per category, each category counted at its own percentage.
    pub breakdown: SupplementBreakdown,
    /// One pay line per hour, in slot order.
    pub slot_lines: Vec<SlotPayLine>,
    /// The audit step recording this aggregation.
    pub audit_step: AuditStep,
}

/// Returns true if the date is one of the public holidays.
///
/// Holidays are given as `"MM-DD"` strings and match in every year.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::is_public_holiday;
/// use chrono::NaiveDate;
///
/// let holidays = vec!["05-01".to_string(), "12-25".to_string()];
/// assert!(is_public_holiday(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(), &holidays));
/// assert!(!is_public_holiday(NaiveDate::from_ymd_opt(2025, 5, 2).unwrap(), &holidays));
/// ```
pub fn is_public_holiday(date: NaiveDate, holidays: &[String]) -> bool {
    holidays
        .iter()
        .filter_map(|holiday| parse_month_day(holiday))
        .any(|(month, day)| month == date.month() && day == date.day())
}

/// Determines the percentage of every supplement category for one hour.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::classify_supplements;
/// use payroll_engine::config::Ruleset;
/// use payroll_engine::models::HourSlot;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// // Sunday 2 March 2025, 21:00
/// let slot = HourSlot {
///     entry_day: 2,
///     date: NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
///     hour: 21,
///     overtime_index: None,
/// };
/// let set = classify_supplements(&slot, Ruleset::default().supplements());
///
/// assert_eq!(set.night, dec!(25));
/// assert_eq!(set.sunday, dec!(70));
/// assert_eq!(set.effective(), dec!(70));
/// ```
pub fn classify_supplements(slot: &HourSlot, rules: &SupplementRules) -> SupplementSet {
    let rates = &rules.rates;
    let is_night = rules.night_window.contains(slot.hour);
    let is_late_shift = !is_night && rules.late_shift_window.contains(slot.hour);
    let weekday = slot.weekday();

    SupplementSet {
        overtime: slot
            .overtime_index
            .map(|index| overtime_premium(index, &rules.overtime_tiers))
            .unwrap_or(Decimal::ZERO),
        night: if is_night { rates.night } else { Decimal::ZERO },
        saturday: if weekday == Weekday::Sat {
            rates.saturday
        } else {
            Decimal::ZERO
        },
        sunday: if weekday == Weekday::Sun {
            rates.sunday
        } else {
            Decimal::ZERO
        },
        holiday: if is_public_holiday(slot.date, &rules.public_holidays) {
            rates.holiday
        } else {
            Decimal::ZERO
        },
        late_shift: if is_late_shift {
            rates.late_shift
        } else {
            Decimal::ZERO
        },
    }
}

/// Classifies every hour and aggregates the paid supplements.
///
/// For each slot the paid amount is `hourly_rate × effective / 100`, where
/// `effective` is the highest category percentage. The breakdown starts with
/// every category at zero and adds `hourly_rate × percentage / 100` for
/// each category that applies to the hour.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_supplements;
/// use payroll_engine::config::Ruleset;
/// use payroll_engine::models::{HourSlot, SupplementCategory};
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// // Two Saturday hours at 20 €/h
/// let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// let slots: Vec<HourSlot> = (6..8)
///     .map(|hour| HourSlot { entry_day: 1, date, hour, overtime_index: None })
///     .collect();
///
/// let result = calculate_supplements(&slots, dec!(20), Ruleset::default().supplements(), 3);
/// assert_eq!(result.total, dec!(20));
/// assert_eq!(result.breakdown[&SupplementCategory::Saturday], dec!(20));
/// ```
pub fn calculate_supplements(
    slots: &[HourSlot],
    hourly_rate: Decimal,
    rules: &SupplementRules,
    step_number: u32,
) -> SupplementCalculation {
    let mut breakdown: SupplementBreakdown = SupplementCategory::ALL
        .iter()
        .map(|&category| (category, Decimal::ZERO))
        .collect();
    let mut total = Decimal::ZERO;
    let mut slot_lines = Vec::with_capacity(slots.len());
    let mut paid_hours: BTreeMap<SupplementCategory, u32> = BTreeMap::new();

    for slot in slots {
        let set = classify_supplements(slot, rules);

        for (category, percentage) in set.iter() {
            if percentage > Decimal::ZERO {
                *breakdown.entry(category).or_insert(Decimal::ZERO) +=
                    hourly_rate * percentage / Decimal::ONE_HUNDRED;
            }
        }

        let effective = set.effective();
        let category = set.winning_category();
        let supplement_amount = hourly_rate * effective / Decimal::ONE_HUNDRED;
        total += supplement_amount;
        if let Some(category) = category {
            *paid_hours.entry(category).or_insert(0) += 1;
        }

        slot_lines.push(SlotPayLine {
            date: slot.date,
            weekday: slot.weekday(),
            hour: slot.hour,
            label: slot.label(),
            effective_percentage: effective,
            category,
            rate_with_supplement: hourly_rate + supplement_amount,
            supplement_amount,
            is_overtime: slot.is_overtime(),
        });
    }

    let paid_hours_json: serde_json::Map<String, serde_json::Value> = paid_hours
        .iter()
        .map(|(category, hours)| (snake_case_name(*category), serde_json::json!(hours)))
        .collect();
    let breakdown_json: serde_json::Map<String, serde_json::Value> = breakdown
        .iter()
        .map(|(category, amount)| {
            (
                snake_case_name(*category),
                serde_json::json!(amount.to_string()),
            )
        })
        .collect();
    let hours_with_supplement: u32 = paid_hours.values().sum();

    let audit_step = AuditStep {
        step_number,
        rule_id: "supplement_aggregation".to_string(),
        rule_name: "Supplement Aggregation".to_string(),
        input: serde_json::json!({
            "slots": slots.len(),
            "hourly_rate": hourly_rate.to_string()
        }),
        output: serde_json::json!({
            "total_supplements": total.to_string(),
            "paid_hours_by_category": paid_hours_json,
            "breakdown": breakdown_json
        }),
        reasoning: format!(
            "{} of {} hours carry a supplement; each is paid at its highest applicable percentage, totalling {}",
            hours_with_supplement,
            slots.len(),
            total.round_dp(2)
        ),
    };

    SupplementCalculation {
        total,
        breakdown,
        slot_lines,
        audit_step,
    }
}

fn snake_case_name(category: SupplementCategory) -> String {
    match category {
        SupplementCategory::Overtime => "overtime",
        SupplementCategory::Night => "night",
        SupplementCategory::Saturday => "saturday",
        SupplementCategory::Sunday => "sunday",
        SupplementCategory::Holiday => "holiday",
        SupplementCategory::LateShift => "late_shift",
    }
    .to_string()
}
