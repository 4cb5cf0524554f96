//! Day entry model and the time sheet that holds them.
//!
//! A [`DayEntry`] is the raw start/end input for one day of the month, exactly
//! as the presentation layer collected it. [`TimeSheet`] owns the entries for
//! one [`PayMonth`] and implements the commands that mutate them before a
//! recomputation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::StandardSchedule;
use crate::error::{EngineError, EngineResult};

use super::PayMonth;

/// Day entries keyed by day of month.
///
/// A `BTreeMap` keeps the days in ascending order, which is the order the
/// engine processes them in.
pub type DayEntries = BTreeMap<u32, DayEntry>;

/// The start and end time typed in for one day.
///
/// Both fields hold the raw `"HH:MM"` text. A day counts as worked only when
/// both fields are filled; parsing happens in the engine so a malformed value
/// can be reported against its day.
///
/// # Example
///
/// ```
/// use payroll_engine::models::DayEntry;
///
/// let entry = DayEntry::new("06:00", "14:00");
/// assert!(entry.is_complete());
///
/// let half = DayEntry { start: Some("22:00".to_string()), end: None };
/// assert!(!half.is_complete());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    /// The start time, e.g. `"06:00"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// The end time, e.g. `"14:00"`. May be earlier than `start` for shifts
    /// that run past midnight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl DayEntry {
    /// Creates a complete entry from a start and end time.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }

    /// Returns true if both the start and the end are filled.
    pub fn is_complete(&self) -> bool {
        is_filled(&self.start) && is_filled(&self.end)
    }

    /// Returns the value of one field.
    pub fn get(&self, field: EntryField) -> Option<&str> {
        match field {
            EntryField::Start => self.start.as_deref(),
            EntryField::End => self.end.as_deref(),
        }
    }
}

fn is_filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Selects the start or end field of a [`DayEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryField {
    /// The start time.
    Start,
    /// The end time.
    End,
}

/// The day entries for one month.
///
/// `TimeSheet` is a plain value: each command mutates it in place and the
/// caller recomputes the payroll afterwards from [`TimeSheet::entries`].
///
/// # Example
///
/// ```
/// use payroll_engine::config::StandardSchedule;
/// use payroll_engine::models::{EntryField, PayMonth, TimeSheet};
///
/// let mut sheet = TimeSheet::new(PayMonth::new(2025, 3).unwrap());
/// sheet.apply_standard_schedule(&StandardSchedule::default());
/// assert_eq!(sheet.entries().len(), 21);
///
/// sheet.set_entry(1, EntryField::Start, "08:00").unwrap();
/// assert_eq!(sheet.entries()[&1].start.as_deref(), Some("08:00"));
///
/// sheet.clear_all();
/// assert!(sheet.entries().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSheet {
    period: PayMonth,
    #[serde(default)]
    entries: DayEntries,
}

impl TimeSheet {
    /// Creates an empty time sheet for a month.
    pub fn new(period: PayMonth) -> Self {
        Self {
            period,
            entries: DayEntries::new(),
        }
    }

    /// Returns the month this sheet covers.
    pub fn period(&self) -> PayMonth {
        self.period
    }

    /// Returns the entries, ordered by day.
    pub fn entries(&self) -> &DayEntries {
        &self.entries
    }

    /// Switches the sheet to another month, keeping the entries by day number.
    ///
    /// Entries for days the new month does not have are dropped.
    pub fn set_period(&mut self, period: PayMonth) {
        let days_in_month = period.days_in_month();
        self.entries.retain(|&day, _| day <= days_in_month);
        self.period = period;
    }

    /// Sets one field of one day's entry, creating the entry if needed.
    ///
    /// The value is stored as typed; it is validated when the payroll is
    /// computed. Fails if the day does not exist in the sheet's month.
    pub fn set_entry(
        &mut self,
        day: u32,
        field: EntryField,
        value: impl Into<String>,
    ) -> EngineResult<()> {
        if day == 0 || day > self.period.days_in_month() {
            return Err(EngineError::Validation {
                day,
                message: format!(
                    "day does not exist in {} ({} days)",
                    self.period,
                    self.period.days_in_month()
                ),
            });
        }

        let entry = self.entries.entry(day).or_default();
        let value = value.into();
        match field {
            EntryField::Start => entry.start = Some(value),
            EntryField::End => entry.end = Some(value),
        }
        Ok(())
    }

    /// Replaces all entries with the standard schedule on every Monday to
    /// Friday of the month.
    pub fn apply_standard_schedule(&mut self, schedule: &StandardSchedule) {
        self.entries = standard_entries(self.period, schedule);
    }

    /// Removes every entry.
    pub fn clear_all(&mut self) {
        self.entries.clear();
    }
}

/// Builds the standard schedule entries for a month: one entry per weekday
/// with the schedule's start and end.
pub fn standard_entries(period: PayMonth, schedule: &StandardSchedule) -> DayEntries {
    period
        .weekdays()
        .into_iter()
        .map(|day| (day, DayEntry::new(&schedule.start, &schedule.end)))
        .collect()
}
