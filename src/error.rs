//! Error types for the Payroll Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing a payroll.

use thiserror::Error;

/// The main error type for the Payroll Engine.
///
/// All fallible operations in the engine return this error type, so the
/// presentation layer can keep showing the last valid result and report
/// what went wrong.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::Validation {
///     day: 4,
///     message: "start time 'ab:00' is not a valid HH:MM time".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid entry for day 4: start time 'ab:00' is not a valid HH:MM time"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A ruleset was parsed but its contents are inconsistent.
    #[error("Invalid ruleset: {message}")]
    InvalidConfig {
        /// A description of the inconsistency.
        message: String,
    },

    /// A day entry could not be interpreted.
    #[error("Invalid entry for day {day}: {message}")]
    Validation {
        /// The day of month the entry belongs to.
        day: u32,
        /// A description of what made the entry invalid.
        message: String,
    },

    /// A table lookup used an index outside the table.
    #[error("{table} index {index} is out of range (table has {len} entries)")]
    OutOfRange {
        /// The name of the table (e.g. "pay grade").
        table: &'static str,
        /// The requested index.
        index: usize,
        /// The number of entries in the table.
        len: usize,
    },

    /// A month/year combination does not describe a calendar month.
    #[error("Invalid pay period {year}-{month}: {message}")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
        /// A description of the problem.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/ruleset.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/ruleset.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_config_displays_message() {
        let error = EngineError::InvalidConfig {
            message: "no pay grades defined".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid ruleset: no pay grades defined");
    }

    #[test]
    fn test_validation_displays_day_and_message() {
        let error = EngineError::Validation {
            day: 12,
            message: "end time '25:00' is not a valid HH:MM time".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid entry for day 12: end time '25:00' is not a valid HH:MM time"
        );
    }

    #[test]
    fn test_out_of_range_displays_table_and_bounds() {
        let error = EngineError::OutOfRange {
            table: "tax class",
            index: 6,
            len: 6,
        };
        assert_eq!(
            error.to_string(),
            "tax class index 6 is out of range (table has 6 entries)"
        );
    }

    #[test]
    fn test_invalid_period_displays_year_and_month() {
        let error = EngineError::InvalidPeriod {
            year: 2025,
            month: 13,
            message: "month must be between 1 and 12".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid pay period 2025-13: month must be between 1 and 12"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_out_of_range() -> EngineResult<()> {
            Err(EngineError::OutOfRange {
                table: "pay grade",
                index: 9,
                len: 7,
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_out_of_range()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
