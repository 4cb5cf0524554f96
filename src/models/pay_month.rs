//! Pay month model.
//!
//! A payroll is always computed for one calendar month. [`PayMonth`] pins the
//! year and month and answers calendar questions the engine needs: how many
//! days the month has, which date a day-of-month refers to, and which days
//! are weekdays.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A calendar month a payroll is computed for.
///
/// Months are numbered 1 to 12. Callers that hold a zero-based month index
/// can use [`PayMonth::from_zero_based`].
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayMonth;
///
/// let february = PayMonth::new(2024, 2).unwrap();
/// assert_eq!(february.days_in_month(), 29);
///
/// let same = PayMonth::from_zero_based(2024, 1).unwrap();
/// assert_eq!(february, same);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawPayMonth")]
pub struct PayMonth {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawPayMonth {
    year: i32,
    month: u32,
}

impl TryFrom<RawPayMonth> for PayMonth {
    type Error = EngineError;

    fn try_from(raw: RawPayMonth) -> Result<Self, Self::Error> {
        PayMonth::new(raw.year, raw.month)
    }
}

impl PayMonth {
    /// Creates a pay month from a year and a month number (1 to 12).
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidPeriod {
                year,
                month,
                message: "month must be between 1 and 12".to_string(),
            });
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(EngineError::InvalidPeriod {
                year,
                month,
                message: "year is outside the supported calendar range".to_string(),
            });
        }
        Ok(Self { year, month })
    }

    /// Creates a pay month from a zero-based month index (0 = January).
    pub fn from_zero_based(year: i32, month_index: u32) -> EngineResult<Self> {
        Self::new(year, month_index.saturating_add(1))
    }

    /// Returns the year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month number (1 to 12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns the number of days in the month.
    pub fn days_in_month(&self) -> u32 {
        match self.month {
            4 | 6 | 9 | 11 => 30,
            2 if NaiveDate::from_ymd_opt(self.year, 2, 29).is_some() => 29,
            2 => 28,
            _ => 31,
        }
    }

    /// Returns the date for a day of this month.
    ///
    /// Fails with [`EngineError::Validation`] if the day does not exist in
    /// the month.
    pub fn date(&self, day: u32) -> EngineResult<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day).ok_or_else(|| {
            EngineError::Validation {
                day,
                message: format!(
                    "day does not exist in {} ({} days)",
                    self,
                    self.days_in_month()
                ),
            }
        })
    }

    /// Returns every Monday-to-Friday day of the month, ascending.
    pub fn weekdays(&self) -> Vec<u32> {
        (1..=self.days_in_month())
            .filter_map(|day| NaiveDate::from_ymd_opt(self.year, self.month, day))
            .filter(|date| !matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
            .map(|date| date.day())
            .collect()
    }
}

impl std::fmt::Display for PayMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
