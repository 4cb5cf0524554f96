//! Hour expansion.
//!
//! This module turns the day entries of a month into the ordered list of
//! worked [`HourSlot`]s. Only the hour component of each time is used: a
//! range from `06:30` to `14:15` covers the hours 6 through 13. Hours that
//! carry a configured break are not emitted as slots; their break duration
//! is reported instead.
//!
//! ## Overnight entries
//!
//! An end hour earlier than the start hour means the shift runs past
//! midnight. Hours after midnight are dated on the following calendar day,
//! so a Saturday 22:00 to 02:00 entry yields two Saturday hours and two
//! Sunday hours. An entry whose start and end hour are equal covers no hours.
//! An end time of `24:00` closes the range at midnight of the entry's own day.

use chrono::{Days, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::BreakRule;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, DayEntries, EntryField, HourSlot, PayMonth};

use super::{parse_end_hour, parse_time_of_day};

/// The result of expanding a month's day entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourExpansion {
    /// Worked slots sorted by date and hour. No overtime is assigned yet.
    pub slots: Vec<HourSlot>,
    /// Total break time inside the worked ranges.
    pub break_hours: Decimal,
    /// Days whose entry has only a start or only an end time.
    pub incomplete_days: Vec<u32>,
    /// The audit step recording this expansion.
    pub audit_step: AuditStep,
}

/// Returns the number of whole hours from `start_hour` to `end_hour`,
/// wrapping past midnight when `end_hour` is earlier.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::span_hours;
///
/// assert_eq!(span_hours(6, 14), 8);
/// assert_eq!(span_hours(22, 6), 8);
/// assert_eq!(span_hours(9, 9), 0);
/// ```
pub fn span_hours(start_hour: u32, end_hour: u32) -> u32 {
    if end_hour >= start_hour {
        end_hour - start_hour
    } else {
        end_hour + 24 - start_hour
    }
}

/// Expands the day entries of a month into worked hour slots.
///
/// Entries are processed in ascending day order. For each complete entry
/// every hour in `[start, end)` becomes one slot, except hours that are a
/// break anchor. The slots of all entries are then sorted chronologically.
///
/// # Arguments
///
/// * `entries` - The day entries, keyed by day of month
/// * `period` - The month the entries belong to
/// * `breaks` - The fixed daily breaks
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns [`EngineError::Validation`] naming the day if:
/// - the day does not exist in the month, even for an incomplete entry
/// - a start or end time is not a valid `"HH:MM"` time
/// - two entries cover the same hour (only possible with overnight entries)
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::expand_entries;
/// use payroll_engine::config::Ruleset;
/// use payroll_engine::models::{DayEntries, DayEntry, PayMonth};
/// use rust_decimal_macros::dec;
///
/// let ruleset = Ruleset::default();
/// let mut entries = DayEntries::new();
/// entries.insert(3, DayEntry::new("06:00", "14:00"));
///
/// let expansion = expand_entries(
///     &entries,
///     PayMonth::new(2025, 3).unwrap(),
///     ruleset.breaks(),
///     1,
/// )
/// .unwrap();
///
/// // 8 hours minus the 09:00 and 12:00 break hours
/// assert_eq!(expansion.slots.len(), 6);
/// assert_eq!(expansion.break_hours, dec!(0.75));
/// ```
pub fn expand_entries(
    entries: &DayEntries,
    period: PayMonth,
    breaks: &[BreakRule],
    step_number: u32,
) -> EngineResult<HourExpansion> {
    let mut slots = Vec::new();
    let mut break_hours = Decimal::ZERO;
    let mut incomplete_days = Vec::new();

    for (&day, entry) in entries {
        let date = period.date(day)?;
        let (Some(start), Some(end)) = (entry.start.as_deref(), entry.end.as_deref()) else {
            incomplete_days.push(day);
            continue;
        };
        if !entry.is_complete() {
            incomplete_days.push(day);
            continue;
        }

        let start_hour = parse_time_of_day(day, EntryField::Start, start)?.hour();
        let end_hour = parse_end_hour(day, end)?;

        for offset in 0..span_hours(start_hour, end_hour) {
            let absolute_hour = start_hour + offset;
            let hour = absolute_hour % 24;

            if let Some(rule) = breaks.iter().find(|b| b.anchor_hour == hour) {
                break_hours += rule.duration_hours;
                continue;
            }

            let slot_date = if absolute_hour < 24 {
                date
            } else {
                date.checked_add_days(Days::new(1))
                    .ok_or_else(|| EngineError::Validation {
                        day,
                        message: "shift runs past the supported calendar range".to_string(),
                    })?
            };

            slots.push(HourSlot {
                entry_day: day,
                date: slot_date,
                hour,
                overtime_index: None,
            });
        }
    }

    slots.sort_by_key(|slot| (slot.date, slot.hour));

    if let Some(pair) = slots
        .windows(2)
        .find(|pair| pair[0].date == pair[1].date && pair[0].hour == pair[1].hour)
    {
        let (first, second) = (pair[0], pair[1]);
        return Err(EngineError::Validation {
            day: first.entry_day.max(second.entry_day),
            message: format!(
                "hour {} on {} is already covered by the entry for day {}",
                first.label(),
                first.date,
                first.entry_day.min(second.entry_day)
            ),
        });
    }

    let worked_days = entries.len() - incomplete_days.len();
    let audit_step = AuditStep {
        step_number,
        rule_id: "hour_expansion".to_string(),
        rule_name: "Hour Expansion".to_string(),
        input: serde_json::json!({
            "entries": entries.len(),
            "break_anchors": breaks.iter().map(|b| b.anchor_hour).collect::<Vec<_>>()
        }),
        output: serde_json::json!({
            "slots": slots.len(),
            "break_hours": break_hours.normalize().to_string(),
            "incomplete_days": incomplete_days
        }),
        reasoning: format!(
            "{} complete entries expanded into {} worked hours after {} hours of breaks",
            worked_days,
            slots.len(),
            break_hours.normalize()
        ),
    };

    Ok(HourExpansion {
        slots,
        break_hours,
        incomplete_days,
        audit_step,
    })
}
