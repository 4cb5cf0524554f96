//! Configuration types for the payroll ruleset.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the built-in
//! IG Metall Hessen 2025 ruleset.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Metadata about the ruleset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetMetadata {
    /// Short identifier (e.g., "igm_hessen_2025").
    pub code: String,
    /// The human-readable name of the pay scale.
    pub name: String,
    /// The version or effective year of the tables.
    pub version: String,
}

/// A pay grade (Entgeltgruppe) and its fixed monthly salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayGrade {
    /// The grade code (e.g., "E5").
    pub code: String,
    /// The monthly base salary in Euro.
    pub monthly_base_salary: Decimal,
}

/// The six German income tax classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxClassCode {
    /// Single or divorced.
    I,
    /// Single parent.
    II,
    /// Married, sole earner.
    III,
    /// Married, both earning.
    IV,
    /// Married, second earner.
    V,
    /// Secondary employment.
    VI,
}

impl std::fmt::Display for TaxClassCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            TaxClassCode::I => "I",
            TaxClassCode::II => "II",
            TaxClassCode::III => "III",
            TaxClassCode::IV => "IV",
            TaxClassCode::V => "V",
            TaxClassCode::VI => "VI",
        };
        f.write_str(code)
    }
}

/// A tax class with its flat allowance and rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxClass {
    /// The tax class.
    pub code: TaxClassCode,
    /// Display name (e.g., "I - Ledig/Geschieden").
    pub name: String,
    /// Monthly amount deducted from gross before the rate applies.
    pub allowance: Decimal,
    /// Income tax rate in percent.
    pub rate: Decimal,
}

/// Contractual working time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingTime {
    /// Hours per week (35 in the Hessen metal industry).
    pub weekly_hours: Decimal,
    /// Weeks per month used for both the hourly rate and the overtime
    /// threshold.
    pub weeks_per_month: Decimal,
}

impl WorkingTime {
    /// Returns the monthly normal-hour threshold.
    pub fn monthly_hours(&self) -> Decimal {
        self.weekly_hours * self.weeks_per_month
    }
}

/// A fixed daily break.
///
/// The break is anchored at a whole hour; a worked range containing that
/// hour loses the hour as a paid slot and reports `duration_hours` of break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakRule {
    /// The hour of day the break starts in.
    pub anchor_hour: u32,
    /// The length of the break in hours.
    pub duration_hours: Decimal,
}

/// A half-open range of hours of the day, `[start, end)`.
///
/// A window whose end is not after its start wraps past midnight, so
/// `{ start: 20, end: 6 }` covers 20:00 to 06:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourWindow {
    /// First hour inside the window.
    pub start: u32,
    /// First hour after the window.
    pub end: u32,
}

impl HourWindow {
    /// Returns true if the hour lies inside the window.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::HourWindow;
    ///
    /// let night = HourWindow { start: 20, end: 6 };
    /// assert!(night.contains(23));
    /// assert!(night.contains(0));
    /// assert!(!night.contains(6));
    /// assert!(!night.contains(19));
    /// ```
    pub fn contains(&self, hour: u32) -> bool {
        if self.start < self.end {
            hour >= self.start && hour < self.end
        } else {
            hour >= self.start || hour < self.end
        }
    }
}

/// One band of the staffed overtime premium.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeTier {
    /// First overtime hour (1-based, counted across the month) in this band.
    pub from: u32,
    /// Last overtime hour in this band, or `None` for the open-ended band.
    #[serde(default)]
    pub to: Option<u32>,
    /// Premium in percent.
    pub percentage: Decimal,
}

/// Supplement percentages by category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementRates {
    /// Night work.
    pub night: Decimal,
    /// Late shift.
    pub late_shift: Decimal,
    /// Saturday work.
    pub saturday: Decimal,
    /// Sunday work.
    pub sunday: Decimal,
    /// Public holiday work.
    pub holiday: Decimal,
}

/// Everything needed to classify the supplements of one hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementRules {
    /// Percentages per category.
    pub rates: SupplementRates,
    /// Hours that count as night work.
    pub night_window: HourWindow,
    /// Hours that count as late shift (only outside the night window).
    pub late_shift_window: HourWindow,
    /// Staffed overtime premium bands, ascending.
    pub overtime_tiers: Vec<OvertimeTier>,
    /// Public holidays as `"MM-DD"` strings, repeating every year.
    pub public_holidays: Vec<String>,
}

/// Employee social insurance contribution rates in percent of gross.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialInsuranceRates {
    /// Pension insurance.
    pub pension: Decimal,
    /// Unemployment insurance.
    pub unemployment: Decimal,
    /// Health insurance.
    pub health: Decimal,
    /// Long-term care insurance.
    pub long_term_care: Decimal,
}

/// Deductions configuration file structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionsConfig {
    /// Social insurance rates.
    pub social_insurance: SocialInsuranceRates,
}

/// The working times filled in by the standard schedule command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardSchedule {
    /// Start time, `"HH:MM"`.
    pub start: String,
    /// End time, `"HH:MM"`.
    pub end: String,
}

impl Default for StandardSchedule {
    fn default() -> Self {
        Self {
            start: "06:00".to_string(),
            end: "14:00".to_string(),
        }
    }
}

/// General ruleset settings from ruleset.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Ruleset metadata.
    pub ruleset: RulesetMetadata,
    /// Contractual working time.
    pub working_time: WorkingTime,
    /// Fixed daily breaks.
    #[serde(default)]
    pub breaks: Vec<BreakRule>,
    /// Times used by the standard schedule command.
    #[serde(default)]
    pub standard_schedule: StandardSchedule,
    /// Net/gross ratio reported for a month without any day entries.
    pub empty_state_net_ratio: Decimal,
}

/// Pay grades configuration file structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayGradesConfig {
    /// Pay grades in display order.
    pub pay_grades: Vec<PayGrade>,
}

/// Tax classes configuration file structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxClassesConfig {
    /// Tax classes in display order.
    pub tax_classes: Vec<TaxClass>,
}

/// The complete payroll ruleset.
///
/// Aggregates the constant tables the engine computes against. A ruleset is
/// either the built-in [`Ruleset::ig_metall_hessen_2025`] or loaded from YAML
/// with [`crate::config::RulesetLoader`]; both paths produce a validated
/// value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ruleset {
    general: GeneralConfig,
    pay_grades: Vec<PayGrade>,
    tax_classes: Vec<TaxClass>,
    supplements: SupplementRules,
    social_insurance: SocialInsuranceRates,
}

impl Ruleset {
    /// Creates a ruleset from its component parts and validates it.
    pub fn new(
        general: GeneralConfig,
        pay_grades: Vec<PayGrade>,
        tax_classes: Vec<TaxClass>,
        supplements: SupplementRules,
        social_insurance: SocialInsuranceRates,
    ) -> EngineResult<Self> {
        let ruleset = Self {
            general,
            pay_grades,
            tax_classes,
            supplements,
            social_insurance,
        };
        ruleset.validate()?;
        Ok(ruleset)
    }

    /// The IG Metall Hessen 2025 ruleset.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::Ruleset;
    /// use rust_decimal_macros::dec;
    ///
    /// let ruleset = Ruleset::ig_metall_hessen_2025();
    /// assert_eq!(ruleset.pay_grade(0).unwrap().code, "E5");
    /// assert_eq!(ruleset.working_time().monthly_hours(), dec!(151.55));
    /// ```
    pub fn ig_metall_hessen_2025() -> Self {
        let pay_grade = |code: &str, salary: Decimal| PayGrade {
            code: code.to_string(),
            monthly_base_salary: salary,
        };
        let tax_class = |code, name: &str, allowance, rate| TaxClass {
            code,
            name: name.to_string(),
            allowance,
            rate,
        };

        Self {
            general: GeneralConfig {
                ruleset: RulesetMetadata {
                    code: "igm_hessen_2025".to_string(),
                    name: "IG Metall Hessen".to_string(),
                    version: "2025".to_string(),
                },
                working_time: WorkingTime {
                    weekly_hours: dec!(35),
                    weeks_per_month: dec!(4.33),
                },
                breaks: vec![
                    BreakRule {
                        anchor_hour: 9,
                        duration_hours: dec!(0.25),
                    },
                    BreakRule {
                        anchor_hour: 12,
                        duration_hours: dec!(0.5),
                    },
                ],
                standard_schedule: StandardSchedule::default(),
                empty_state_net_ratio: dec!(0.65),
            },
            pay_grades: vec![
                pay_grade("E5", dec!(3189.00)),
                pay_grade("E6", dec!(3508.00)),
                pay_grade("E7", dec!(3891.00)),
                pay_grade("E8", dec!(4369.00)),
                pay_grade("E9", dec!(4943.00)),
                pay_grade("E10", dec!(5421.00)),
                pay_grade("E11", dec!(5900.00)),
            ],
            tax_classes: vec![
                tax_class(TaxClassCode::I, "I - Ledig/Geschieden", dec!(1200), dec!(25)),
                tax_class(TaxClassCode::II, "II - Alleinerziehend", dec!(1500), dec!(23)),
                tax_class(
                    TaxClassCode::III,
                    "III - Verheiratet (Alleinverdiener)",
                    dec!(2400),
                    dec!(20),
                ),
                tax_class(
                    TaxClassCode::IV,
                    "IV - Verheiratet (beide berufstätig)",
                    dec!(1200),
                    dec!(25),
                ),
                tax_class(
                    TaxClassCode::V,
                    "V - Verheiratet (Zweitverdiener)",
                    dec!(600),
                    dec!(35),
                ),
                tax_class(TaxClassCode::VI, "VI - Nebenjob", dec!(0), dec!(40)),
            ],
            supplements: SupplementRules {
                rates: SupplementRates {
                    night: dec!(25),
                    late_shift: dec!(10),
                    saturday: dec!(50),
                    sunday: dec!(70),
                    holiday: dec!(100),
                },
                night_window: HourWindow { start: 20, end: 6 },
                late_shift_window: HourWindow { start: 14, end: 20 },
                overtime_tiers: vec![
                    OvertimeTier {
                        from: 1,
                        to: Some(6),
                        percentage: dec!(25),
                    },
                    OvertimeTier {
                        from: 7,
                        to: Some(8),
                        percentage: dec!(40),
                    },
                    OvertimeTier {
                        from: 9,
                        to: None,
                        percentage: dec!(50),
                    },
                ],
                public_holidays: ["01-01", "05-01", "10-03", "12-25", "12-26"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
            social_insurance: SocialInsuranceRates {
                pension: dec!(9.3),
                unemployment: dec!(1.3),
                health: dec!(7.3),
                long_term_care: dec!(1.525),
            },
        }
    }

    /// Returns the ruleset metadata.
    pub fn metadata(&self) -> &RulesetMetadata {
        &self.general.ruleset
    }

    /// Returns all pay grades in display order.
    pub fn pay_grades(&self) -> &[PayGrade] {
        &self.pay_grades
    }

    /// Returns all tax classes in display order.
    pub fn tax_classes(&self) -> &[TaxClass] {
        &self.tax_classes
    }

    /// Returns the pay grade at a table index.
    pub fn pay_grade(&self, index: usize) -> EngineResult<&PayGrade> {
        self.pay_grades.get(index).ok_or(EngineError::OutOfRange {
            table: "pay grade",
            index,
            len: self.pay_grades.len(),
        })
    }

    /// Returns the tax class at a table index.
    pub fn tax_class(&self, index: usize) -> EngineResult<&TaxClass> {
        self.tax_classes.get(index).ok_or(EngineError::OutOfRange {
            table: "tax class",
            index,
            len: self.tax_classes.len(),
        })
    }

    /// Returns the contractual working time.
    pub fn working_time(&self) -> &WorkingTime {
        &self.general.working_time
    }

    /// Returns the fixed daily breaks.
    pub fn breaks(&self) -> &[BreakRule] {
        &self.general.breaks
    }

    /// Returns the supplement rules.
    pub fn supplements(&self) -> &SupplementRules {
        &self.supplements
    }

    /// Returns the social insurance rates.
    pub fn social_insurance(&self) -> &SocialInsuranceRates {
        &self.social_insurance
    }

    /// Returns the standard schedule times.
    pub fn standard_schedule(&self) -> &StandardSchedule {
        &self.general.standard_schedule
    }

    /// Returns the net/gross ratio used for a month without entries.
    pub fn empty_state_net_ratio(&self) -> Decimal {
        self.general.empty_state_net_ratio
    }

    fn validate(&self) -> EngineResult<()> {
        if self.pay_grades.is_empty() {
            return invalid("no pay grades defined");
        }
        let mut codes = HashSet::new();
        for grade in &self.pay_grades {
            if grade.monthly_base_salary <= Decimal::ZERO {
                return invalid(format!("pay grade {} has a non-positive salary", grade.code));
            }
            if !codes.insert(grade.code.as_str()) {
                return invalid(format!("pay grade {} is defined twice", grade.code));
            }
        }

        if self.tax_classes.is_empty() {
            return invalid("no tax classes defined");
        }
        for class in &self.tax_classes {
            if class.allowance < Decimal::ZERO {
                return invalid(format!("tax class {} has a negative allowance", class.code));
            }
            if !is_percentage(class.rate) {
                return invalid(format!("tax class {} rate must be 0-100", class.code));
            }
        }

        let working_time = self.working_time();
        if working_time.weekly_hours <= Decimal::ZERO
            || working_time.weeks_per_month <= Decimal::ZERO
        {
            return invalid("working time must be positive");
        }

        for rule in self.breaks() {
            if rule.anchor_hour > 23 {
                return invalid(format!("break anchor hour {} is not 0-23", rule.anchor_hour));
            }
            if rule.duration_hours <= Decimal::ZERO || rule.duration_hours > Decimal::ONE {
                return invalid(format!(
                    "break at hour {} must last more than 0 and at most 1 hour",
                    rule.anchor_hour
                ));
            }
        }

        let schedule = self.standard_schedule();
        for time in [&schedule.start, &schedule.end] {
            if NaiveTime::parse_from_str(time, "%H:%M").is_err() {
                return invalid(format!("standard schedule time '{}' is not HH:MM", time));
            }
        }

        let ratio = self.empty_state_net_ratio();
        if ratio < Decimal::ZERO || ratio > Decimal::ONE {
            return invalid("empty-state net ratio must be between 0 and 1");
        }

        self.validate_supplements()?;

        let rates = &self.social_insurance;
        for rate in [
            rates.pension,
            rates.unemployment,
            rates.health,
            rates.long_term_care,
        ] {
            if !is_percentage(rate) {
                return invalid("social insurance rates must be 0-100");
            }
        }

        Ok(())
    }

    fn validate_supplements(&self) -> EngineResult<()> {
        let rules = &self.supplements;
        let rates = &rules.rates;
        for rate in [
            rates.night,
            rates.late_shift,
            rates.saturday,
            rates.sunday,
            rates.holiday,
        ] {
            if rate < Decimal::ZERO {
                return invalid("supplement rates must not be negative");
            }
        }

        for window in [rules.night_window, rules.late_shift_window] {
            if window.start > 23 || window.end > 24 || window.start == window.end {
                return invalid(format!(
                    "hour window {}-{} is not a valid range",
                    window.start, window.end
                ));
            }
        }

        let Some(first) = rules.overtime_tiers.first() else {
            return invalid("no overtime tiers defined");
        };
        if first.from != 1 {
            return invalid("the first overtime tier must start at hour 1");
        }
        for pair in rules.overtime_tiers.windows(2) {
            match pair[0].to {
                Some(to) if to >= pair[0].from && pair[1].from == to + 1 => {}
                _ => return invalid("overtime tiers must be contiguous and ascending"),
            }
        }
        if rules.overtime_tiers.iter().any(|t| t.percentage < Decimal::ZERO) {
            return invalid("overtime premiums must not be negative");
        }
        if rules.overtime_tiers.last().and_then(|t| t.to).is_some() {
            return invalid("the last overtime tier must be open-ended");
        }

        for holiday in &rules.public_holidays {
            if parse_month_day(holiday).is_none() {
                return invalid(format!("public holiday '{}' is not MM-DD", holiday));
            }
        }

        Ok(())
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::ig_metall_hessen_2025()
    }
}

/// Parses a `"MM-DD"` month-day string, checked against a leap year.
pub(crate) fn parse_month_day(value: &str) -> Option<(u32, u32)> {
    let (month, day) = value.split_once('-')?;
    if month.len() != 2 || day.len() != 2 {
        return None;
    }
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    NaiveDate::from_ymd_opt(2000, month, day).map(|_| (month, day))
}

fn is_percentage(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= Decimal::ONE_HUNDRED
}

fn invalid<T>(message: impl Into<String>) -> EngineResult<T> {
    Err(EngineError::InvalidConfig {
        message: message.into(),
    })
}
