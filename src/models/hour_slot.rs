//! Hour slot model.
//!
//! Every worked hour of the month becomes one [`HourSlot`]. Slots are derived
//! from the day entries on each computation and never stored.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// One worked hour.
///
/// `entry_day` is the day of month of the entry that produced the slot. For
/// overnight entries the hours after midnight carry the following `date` but
/// keep the entry's day.
///
/// # Example
///
/// ```
/// use payroll_engine::models::HourSlot;
/// use chrono::{NaiveDate, Weekday};
///
/// let slot = HourSlot {
///     entry_day: 15,
///     date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
///     hour: 23,
///     overtime_index: None,
/// };
/// assert_eq!(slot.weekday(), Weekday::Sat);
/// assert_eq!(slot.label(), "23:00-24:00");
/// assert!(!slot.is_overtime());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HourSlot {
    /// The day of month of the entry this slot was expanded from.
    pub entry_day: u32,
    /// The calendar date the hour falls on.
    pub date: NaiveDate,
    /// The hour of day (0 to 23) the slot starts at.
    pub hour: u32,
    /// The slot's position among the month's overtime slots (1-based), or
    /// `None` for a normal hour.
    pub overtime_index: Option<u32>,
}

impl HourSlot {
    /// Returns true if the slot is past the monthly threshold.
    pub fn is_overtime(&self) -> bool {
        self.overtime_index.is_some()
    }

    /// Returns the weekday of the slot's date.
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Returns the slot's time range, e.g. `"06:00-07:00"`.
    pub fn label(&self) -> String {
        format!("{:02}:00-{:02}:00", self.hour, self.hour + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(hour: u32, overtime_index: Option<u32>) -> HourSlot {
        HourSlot {
            entry_day: 3,
            date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            hour,
            overtime_index,
        }
    }

    #[test]
    fn test_label_pads_hours() {
        assert_eq!(slot(6, None).label(), "06:00-07:00");
        assert_eq!(slot(0, None).label(), "00:00-01:00");
    }

    #[test]
    fn test_overtime_flag_follows_index() {
        assert!(!slot(6, None).is_overtime());
        assert!(slot(6, Some(1)).is_overtime());
    }

    #[test]
    fn test_weekday_of_monday() {
        assert_eq!(slot(6, None).weekday(), Weekday::Mon);
    }
}
