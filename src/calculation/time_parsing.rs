//! Parsing of the `"HH:MM"` times typed into day entries.

use chrono::{NaiveTime, Timelike};

use crate::error::{EngineError, EngineResult};
use crate::models::EntryField;

/// Parses a `"HH:MM"` time belonging to a day entry.
///
/// Surrounding whitespace is ignored and a single-digit hour is accepted.
/// Anything that is not a valid time of day fails with
/// [`EngineError::Validation`] naming the day, so a typo never turns into a
/// silently wrong payroll.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::parse_time_of_day;
/// use payroll_engine::models::EntryField;
/// use chrono::Timelike;
///
/// let time = parse_time_of_day(3, EntryField::Start, " 6:30 ").unwrap();
/// assert_eq!((time.hour(), time.minute()), (6, 30));
///
/// assert!(parse_time_of_day(3, EntryField::End, "ab:00").is_err());
/// ```
pub fn parse_time_of_day(day: u32, field: EntryField, value: &str) -> EngineResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| EngineError::Validation {
        day,
        message: format!(
            "{} time '{}' is not a valid HH:MM time",
            field_name(field),
            value
        ),
    })
}

/// Parses the end time of a day entry into its hour.
///
/// Besides every time [`parse_time_of_day`] accepts, an end of exactly
/// `"24:00"` is read as hour 24, closing the range at midnight of the same day.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::parse_end_hour;
///
/// assert_eq!(parse_end_hour(3, "14:30").unwrap(), 14);
/// assert_eq!(parse_end_hour(3, "24:00").unwrap(), 24);
/// assert!(parse_end_hour(3, "24:15").is_err());
/// ```
pub fn parse_end_hour(day: u32, value: &str) -> EngineResult<u32> {
    if value.trim() == "24:00" {
        return Ok(24);
    }
    parse_time_of_day(day, EntryField::End, value).map(|time| time.hour())
}

fn field_name(field: EntryField) -> &'static str {
    match field {
        EntryField::Start => "start",
        EntryField::End => "end",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_padded_time() {
        let time = parse_time_of_day(1, EntryField::Start, "06:00").unwrap();
        assert_eq!(time.hour(), 6);
        assert_eq!(time.minute(), 0);
    }

    #[test]
    fn test_parses_last_minute_of_day() {
        let time = parse_time_of_day(1, EntryField::End, "23:59").unwrap();
        assert_eq!((time.hour(), time.minute()), (23, 59));
    }

    #[test]
    fn test_rejects_non_numeric_hour() {
        match parse_time_of_day(7, EntryField::Start, "ab:00") {
            Err(EngineError::Validation { day, message }) => {
                assert_eq!(day, 7);
                assert_eq!(message, "start time 'ab:00' is not a valid HH:MM time");
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert!(parse_time_of_day(1, EntryField::End, "25:00").is_err());
        assert!(parse_time_of_day(1, EntryField::End, "12:60").is_err());
        assert!(parse_end_hour(1, "25:00").is_err());
    }

    #[test]
    fn test_midnight_only_valid_as_end() {
        assert_eq!(parse_end_hour(1, "24:00").unwrap(), 24);
        assert_eq!(parse_end_hour(1, " 24:00 ").unwrap(), 24);
        assert!(parse_time_of_day(1, EntryField::Start, "24:00").is_err());
        assert!(matches!(
            parse_end_hour(9, "24:30"),
            Err(EngineError::Validation { day: 9, .. })
        ));
    }

    #[test]
    fn test_rejects_missing_minutes() {
        assert!(parse_time_of_day(1, EntryField::Start, "6").is_err());
        assert!(parse_time_of_day(1, EntryField::Start, "").is_err());
    }
}
