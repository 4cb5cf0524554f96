//! Tax and social insurance deductions.
//!
//! Every deduction is derived from the gross total:
//!
//! - social insurance: pension, unemployment, health and long-term care, each
//!   a flat percentage of gross
//! - income tax: the tax class rate applied to the gross above the class
//!   allowance, never negative

use rust_decimal::Decimal;

use crate::config::{SocialInsuranceRates, TaxClass};
use crate::models::{AuditStep, DeductionBreakdown};

/// The result of a deduction calculation.
#[derive(Debug, Clone)]
pub struct DeductionResult {
    /// The individual deductions and their total.
    pub breakdown: DeductionBreakdown,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates all deductions for a gross total.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_deductions;
/// use payroll_engine::config::Ruleset;
/// use rust_decimal_macros::dec;
///
/// let ruleset = Ruleset::default();
/// let class_i = ruleset.tax_class(0).unwrap();
///
/// let result = calculate_deductions(dec!(3189), class_i, ruleset.social_insurance(), 1);
/// // (3189 - 1200) × 25 %
/// assert_eq!(result.breakdown.income_tax, dec!(497.25));
/// ```
pub fn calculate_deductions(
    gross: Decimal,
    tax_class: &TaxClass,
    rates: &SocialInsuranceRates,
    step_number: u32,
) -> DeductionResult {
    let percent_of_gross = |rate: Decimal| gross * rate / Decimal::ONE_HUNDRED;

    let pension = percent_of_gross(rates.pension);
    let unemployment = percent_of_gross(rates.unemployment);
    let health = percent_of_gross(rates.health);
    let long_term_care = percent_of_gross(rates.long_term_care);
    let social_insurance_total = pension + unemployment + health + long_term_care;

    let taxable_income = (gross - tax_class.allowance).max(Decimal::ZERO);
    let income_tax = taxable_income * tax_class.rate / Decimal::ONE_HUNDRED;

    let total = income_tax + social_insurance_total;

    let audit_step = AuditStep {
        step_number,
        rule_id: "deductions".to_string(),
        rule_name: "Tax and Social Insurance Deductions".to_string(),
        input: serde_json::json!({
            "gross": gross.to_string(),
            "tax_class": tax_class.code.to_string(),
            "allowance": tax_class.allowance.to_string(),
            "tax_rate": tax_class.rate.to_string()
        }),
        output: serde_json::json!({
            "taxable_income": taxable_income.to_string(),
            "income_tax": income_tax.to_string(),
            "social_insurance_total": social_insurance_total.to_string(),
            "total": total.to_string()
        }),
        reasoning: format!(
            "Tax class {}: {} % of {} taxable income; social insurance {} % of gross",
            tax_class.code,
            tax_class.rate,
            taxable_income.round_dp(2),
            (rates.pension + rates.unemployment + rates.health + rates.long_term_care).normalize()
        ),
    };

    DeductionResult {
        breakdown: DeductionBreakdown {
            income_tax,
            pension,
            unemployment,
            health,
            long_term_care,
            social_insurance_total,
            taxable_income,
            total,
        },
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Ruleset;
    use rust_decimal_macros::dec;

    // ==========================================================================
    // DE-001: social insurance shares of the E5 base salary
    // ==========================================================================
    #[test]
    fn test_de_001_social_insurance() {
        let ruleset = Ruleset::default();
        let result = calculate_deductions(
            dec!(3189),
            ruleset.tax_class(0).unwrap(),
            ruleset.social_insurance(),
            1,
        );
        let d = result.breakdown;
        assert_eq!(d.pension, dec!(296.577));
        assert_eq!(d.unemployment, dec!(41.457));
        assert_eq!(d.health, dec!(232.797));
        assert_eq!(d.long_term_care, dec!(48.63225));
        assert_eq!(d.social_insurance_total, dec!(619.46325));
        assert_eq!(d.total, dec!(1116.71325));
    }

    // ==========================================================================
    // DE-002: taxable income never goes below zero
    // ==========================================================================
    #[test]
    fn test_de_002_allowance_above_gross() {
        let ruleset = Ruleset::default();
        let class_iii = ruleset.tax_class(2).unwrap();
        let result = calculate_deductions(dec!(2000), class_iii, ruleset.social_insurance(), 1);
        assert_eq!(result.breakdown.taxable_income, Decimal::ZERO);
        assert_eq!(result.breakdown.income_tax, Decimal::ZERO);
        assert_eq!(result.breakdown.total, result.breakdown.social_insurance_total);
    }

    // ==========================================================================
    // DE-003: tax class VI has no allowance
    // ==========================================================================
    #[test]
    fn test_de_003_class_vi() {
        let ruleset = Ruleset::default();
        let class_vi = ruleset.tax_class(5).unwrap();
        let result = calculate_deductions(dec!(1000), class_vi, ruleset.social_insurance(), 1);
        assert_eq!(result.breakdown.taxable_income, dec!(1000));
        assert_eq!(result.breakdown.income_tax, dec!(400));
    }

    #[test]
    fn test_total_is_sum_of_parts() {
        let ruleset = Ruleset::default();
        for tax_class in ruleset.tax_classes() {
            let d = calculate_deductions(dec!(4321.09), tax_class, ruleset.social_insurance(), 1)
                .breakdown;
            assert_eq!(
                d.total,
                d.income_tax + d.pension + d.unemployment + d.health + d.long_term_care
            );
        }
    }

    #[test]
    fn test_audit_step() {
        let ruleset = Ruleset::default();
        let result = calculate_deductions(
            dec!(3189),
            ruleset.tax_class(0).unwrap(),
            ruleset.social_insurance(),
            5,
        );
        assert_eq!(result.audit_step.step_number, 5);
        assert_eq!(result.audit_step.input["tax_class"], "I");
        assert_eq!(result.audit_step.rule_id, "deductions");
    }
}
