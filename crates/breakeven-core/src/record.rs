use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::BreakevenError;
use crate::types::{saturating_div, saturating_i64, Money, Rate};
use crate::BreakevenResult;

// ---------------------------------------------------------------------------
// Safety classification
// ---------------------------------------------------------------------------

/// Safety margin above which a company is considered safe.
pub const HIGH_SAFETY_THRESHOLD: Rate = dec!(0.40);

/// Safety margin above which a company needs attention rather than action.
pub const MEDIUM_SAFETY_THRESHOLD: Rate = dec!(0.15);

/// Three-tier classification of the safety margin ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SafetyLevel {
    High,
    Medium,
    Low,
}

impl SafetyLevel {
    /// Classify a safety margin ratio. Both thresholds are strict, so a ratio
    /// of exactly 0.40 is `Medium` and exactly 0.15 is `Low`.
    pub fn classify(ratio: Rate) -> Self {
        if ratio > HIGH_SAFETY_THRESHOLD {
            SafetyLevel::High
        } else if ratio > MEDIUM_SAFETY_THRESHOLD {
            SafetyLevel::Medium
        } else {
            SafetyLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SafetyLevel::High => "High",
            SafetyLevel::Medium => "Medium",
            SafetyLevel::Low => "Low",
        }
    }
}

impl std::fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FinancialRecord
// ---------------------------------------------------------------------------

/// One company's financial snapshot.
///
/// Inputs are fixed at construction; every metric is recomputed from them on
/// access.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialRecord {
    name: String,
    variable_cost_ratio: Rate,
    fixed_cost: i64,
    sales: i64,
}

impl FinancialRecord {
    /// Build a validated record.
    ///
    /// Rejects an empty name and a variable cost ratio outside `[0, 1]`.
    /// A ratio of exactly 1 is accepted and yields a zero break-even point.
    pub fn new(
        name: impl Into<String>,
        variable_cost_ratio: Rate,
        fixed_cost: i64,
        sales: i64,
    ) -> BreakevenResult<Self> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(BreakevenError::InvalidInput {
                field: "name".to_string(),
                reason: "Company name must not be empty".to_string(),
            });
        }

        if variable_cost_ratio < Decimal::ZERO || variable_cost_ratio > Decimal::ONE {
            return Err(BreakevenError::InvalidInput {
                field: "variable_cost_ratio".to_string(),
                reason: format!(
                    "Variable cost ratio must be between 0 and 1, got {}",
                    variable_cost_ratio
                ),
            });
        }

        Ok(Self::new_unchecked(name, variable_cost_ratio, fixed_cost, sales))
    }

    /// Build a record without range checks on the inputs.
    pub fn new_unchecked(
        name: impl Into<String>,
        variable_cost_ratio: Rate,
        fixed_cost: i64,
        sales: i64,
    ) -> Self {
        Self {
            name: name.into(),
            variable_cost_ratio,
            fixed_cost,
            sales,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variable_cost_ratio(&self) -> Rate {
        self.variable_cost_ratio
    }

    pub fn fixed_cost(&self) -> i64 {
        self.fixed_cost
    }

    pub fn sales(&self) -> i64 {
        self.sales
    }

    /// Contribution margin ratio: 1 - variable cost ratio.
    pub fn marginal_profit_ratio(&self) -> Rate {
        Decimal::ONE - self.variable_cost_ratio
    }

    /// Sales at which revenue equals total cost.
    ///
    /// Zero when the marginal profit ratio is zero, whatever the fixed cost.
    /// A ratio so close to 1 that the quotient leaves the decimal range
    /// clamps to `Decimal::MAX` (or `Decimal::MIN` for a negative quotient).
    pub fn break_even_point(&self) -> Money {
        let mpr = self.marginal_profit_ratio();
        if mpr.is_zero() {
            return Decimal::ZERO;
        }
        saturating_div(Decimal::from(self.fixed_cost), mpr)
    }

    /// (sales - break-even) / sales, or zero when there are no sales.
    pub fn safety_margin_ratio(&self) -> Rate {
        if self.sales == 0 {
            return Decimal::ZERO;
        }
        let sales = Decimal::from(self.sales);
        saturating_div(sales.saturating_sub(self.break_even_point()), sales)
    }

    pub fn safety_level(&self) -> SafetyLevel {
        SafetyLevel::classify(self.safety_margin_ratio())
    }

    /// Operating profit at current sales, truncated toward zero and clamped
    /// to the `i64` range.
    pub fn profit(&self) -> i64 {
        let sales = Decimal::from(self.sales);
        let total_cost = Decimal::from(self.fixed_cost)
            .saturating_add(sales.saturating_mul(self.variable_cost_ratio));
        saturating_i64(sales.saturating_sub(total_cost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(ratio: Decimal, fixed: i64, sales: i64) -> FinancialRecord {
        FinancialRecord::new("Acme", ratio, fixed, sales).unwrap()
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    #[test]
    fn test_new_rejects_empty_name() {
        let err = FinancialRecord::new("  ", dec!(0.5), 100, 100).unwrap_err();
        match err {
            BreakevenError::InvalidInput { field, .. } => assert_eq!(field, "name"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_new_rejects_ratio_out_of_range() {
        assert!(FinancialRecord::new("A", dec!(-0.01), 100, 100).is_err());
        assert!(FinancialRecord::new("A", dec!(1.01), 100, 100).is_err());
    }

    #[test]
    fn test_new_accepts_ratio_bounds() {
        assert!(FinancialRecord::new("A", dec!(0), 100, 100).is_ok());
        assert!(FinancialRecord::new("A", dec!(1), 100, 100).is_ok());
    }

    #[test]
    fn test_unchecked_keeps_out_of_range_ratio() {
        let r = FinancialRecord::new_unchecked("A", dec!(1.5), 100, 1000);
        assert_eq!(r.marginal_profit_ratio(), dec!(-0.5));
        assert_eq!(r.break_even_point(), dec!(-200));
    }

    // -----------------------------------------------------------------------
    // Derived metrics
    // -----------------------------------------------------------------------

    #[test]
    fn test_loss_making_scenario() {
        let r = record(dec!(0.6), 1000, 2000);
        assert_eq!(r.marginal_profit_ratio(), dec!(0.4));
        assert_eq!(r.break_even_point(), dec!(2500));
        assert_eq!(r.safety_margin_ratio(), dec!(-0.25));
        assert_eq!(r.safety_level(), SafetyLevel::Low);
        assert_eq!(r.profit(), -200);
    }

    #[test]
    fn test_no_fixed_cost_scenario() {
        let r = record(dec!(0.5), 0, 1000);
        assert_eq!(r.break_even_point(), Decimal::ZERO);
        assert_eq!(r.safety_margin_ratio(), Decimal::ONE);
        assert_eq!(r.safety_level(), SafetyLevel::High);
        assert_eq!(r.profit(), 500);
    }

    #[test]
    fn test_zero_margin_break_even_is_zero() {
        let r = record(dec!(1), 5000, 1000);
        assert_eq!(r.marginal_profit_ratio(), Decimal::ZERO);
        assert_eq!(r.break_even_point(), Decimal::ZERO);
    }

    #[test]
    fn test_zero_sales_safety_margin_is_zero() {
        let r = record(dec!(0.6), 1000, 0);
        assert_eq!(r.safety_margin_ratio(), Decimal::ZERO);
        assert_eq!(r.safety_level(), SafetyLevel::Low);
    }

    #[test]
    fn test_profit_truncates_toward_zero() {
        // 1001 - (0 + 1001 * 0.5) = 500.5 -> 500
        assert_eq!(record(dec!(0.5), 0, 1001).profit(), 500);
        // 1001 - (1000 + 500.5) = -499.5 -> -499
        assert_eq!(record(dec!(0.5), 1000, 1001).profit(), -499);
    }

    #[test]
    fn test_near_one_ratio_clamps_break_even() {
        let r = record(dec!(0.9999999999999999999999999999), 1_000_000, 2000);
        assert_eq!(r.marginal_profit_ratio(), dec!(0.0000000000000000000000000001));
        assert_eq!(r.break_even_point(), Decimal::MAX);
        assert!(r.safety_margin_ratio() < Decimal::ZERO);
        assert_eq!(r.safety_level(), SafetyLevel::Low);
    }

    #[test]
    fn test_near_one_ratio_negative_fixed_cost_clamps_low() {
        let r = FinancialRecord::new_unchecked(
            "A",
            dec!(0.9999999999999999999999999999),
            -1_000_000,
            2000,
        );
        assert_eq!(r.break_even_point(), Decimal::MIN);
        assert_eq!(r.safety_level(), SafetyLevel::High);
    }

    #[test]
    fn test_profit_clamps_to_i64_range() {
        assert_eq!(record(dec!(0), i64::MIN, i64::MAX).profit(), i64::MAX);
        assert_eq!(record(dec!(0), i64::MAX, i64::MIN).profit(), i64::MIN);
    }

    #[test]
    fn test_margin_plus_variable_is_one() {
        for ratio in [dec!(0), dec!(0.123), dec!(0.5), dec!(0.999), dec!(1)] {
            let r = record(ratio, 10, 10);
            assert_eq!(r.marginal_profit_ratio() + r.variable_cost_ratio(), Decimal::ONE);
        }
    }

    // -----------------------------------------------------------------------
    // Classification
    // -----------------------------------------------------------------------

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(SafetyLevel::classify(dec!(0.40)), SafetyLevel::Medium);
        assert_eq!(SafetyLevel::classify(dec!(0.4001)), SafetyLevel::High);
        assert_eq!(SafetyLevel::classify(dec!(0.15)), SafetyLevel::Low);
        assert_eq!(SafetyLevel::classify(dec!(0.1501)), SafetyLevel::Medium);
        assert_eq!(SafetyLevel::classify(dec!(-3)), SafetyLevel::Low);
    }

    #[test]
    fn test_safety_level_display() {
        assert_eq!(SafetyLevel::High.to_string(), "High");
        assert_eq!(SafetyLevel::Low.to_string(), "Low");
    }
}
