//! Supplement (Zuschlag) models.
//!
//! A worked hour can qualify for several supplement categories at once. The
//! [`SupplementSet`] records the percentage of every category for one hour;
//! only the highest of them is paid.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A supplement category.
///
/// # Example
///
/// ```
/// use payroll_engine::models::SupplementCategory;
///
/// let json = serde_json::to_string(&SupplementCategory::LateShift).unwrap();
/// assert_eq!(json, "\"late_shift\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplementCategory {
    /// Hours past the monthly threshold, staffed by overtime count.
    Overtime,
    /// Hours between 20:00 and 06:00.
    Night,
    /// Hours on a Saturday.
    Saturday,
    /// Hours on a Sunday.
    Sunday,
    /// Hours on a public holiday.
    Holiday,
    /// Hours between 14:00 and 20:00.
    LateShift,
}

impl SupplementCategory {
    /// All categories in reporting order.
    pub const ALL: [SupplementCategory; 6] = [
        SupplementCategory::Overtime,
        SupplementCategory::Night,
        SupplementCategory::Saturday,
        SupplementCategory::Sunday,
        SupplementCategory::Holiday,
        SupplementCategory::LateShift,
    ];
}

impl std::fmt::Display for SupplementCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SupplementCategory::Overtime => write!(f, "Overtime"),
            SupplementCategory::Night => write!(f, "Night"),
            SupplementCategory::Saturday => write!(f, "Saturday"),
            SupplementCategory::Sunday => write!(f, "Sunday"),
            SupplementCategory::Holiday => write!(f, "Holiday"),
            SupplementCategory::LateShift => write!(f, "Late shift"),
        }
    }
}

/// The supplement percentages that apply to one hour.
///
/// Percentages are whole-number percent values (`25` means 25 %), zero when a
/// category does not apply. Supplements are not additive: the hour is paid
/// at [`SupplementSet::effective`], the highest single percentage.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{SupplementCategory, SupplementSet};
/// use rust_decimal_macros::dec;
///
/// // A Sunday night hour
/// let set = SupplementSet {
///     night: dec!(25),
///     sunday: dec!(70),
///     ..SupplementSet::default()
/// };
/// assert_eq!(set.effective(), dec!(70));
/// assert_eq!(set.winning_category(), Some(SupplementCategory::Sunday));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementSet {
    /// Overtime premium.
    pub overtime: Decimal,
    /// Night work supplement.
    pub night: Decimal,
    /// Saturday supplement.
    pub saturday: Decimal,
    /// Sunday supplement.
    pub sunday: Decimal,
    /// Public holiday supplement.
    pub holiday: Decimal,
    /// Late shift supplement.
    pub late_shift: Decimal,
}

impl SupplementSet {
    /// Returns the percentage for one category.
    pub fn get(&self, category: SupplementCategory) -> Decimal {
        match category {
            SupplementCategory::Overtime => self.overtime,
            SupplementCategory::Night => self.night,
            SupplementCategory::Saturday => self.saturday,
            SupplementCategory::Sunday => self.sunday,
            SupplementCategory::Holiday => self.holiday,
            SupplementCategory::LateShift => self.late_shift,
        }
    }

    /// Iterates over every category and its percentage in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (SupplementCategory, Decimal)> + '_ {
        SupplementCategory::ALL
            .iter()
            .map(move |&category| (category, self.get(category)))
    }

    /// Returns the percentage actually paid: the maximum over all categories.
    pub fn effective(&self) -> Decimal {
        self.iter()
            .map(|(_, percentage)| percentage)
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns the category that sets the effective percentage.
    ///
    /// Ties go to the category listed first in [`SupplementCategory::ALL`].
    /// Returns `None` when no category applies.
    pub fn winning_category(&self) -> Option<SupplementCategory> {
        let effective = self.effective();
        if effective <= Decimal::ZERO {
            return None;
        }
        self.iter()
            .find(|(_, percentage)| *percentage == effective)
            .map(|(category, _)| category)
    }
}

/// Supplement amounts accumulated per category.
///
/// Every category an hour qualifies for is recorded at its own percentage,
/// even though only the highest one is paid. The sum over categories
/// therefore exceeds the paid supplement total whenever categories overlap.
pub type SupplementBreakdown = BTreeMap<SupplementCategory, Decimal>;
