//! Euro amount formatting.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount to whole cents, half away from zero.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as a two-decimal Euro string, e.g. `"2072.85 €"`.
///
/// # Example
///
/// ```
/// use payroll_engine::models::format_eur;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_eur(dec!(2072.85)), "2072.85 €");
/// assert_eq!(format_eur(dec!(3189)), "3189.00 €");
/// assert_eq!(format_eur(dec!(21.0425)), "21.04 €");
/// ```
pub fn format_eur(amount: Decimal) -> String {
    format!("{:.2} €", round_cents(amount))
}
