use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// Lossy conversion of a decimal into plotting space.
pub(crate) fn to_plot_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Truncate toward zero into whole currency units, clamping to the `i64`
/// range on the value's sign.
pub(crate) fn saturating_i64(value: Decimal) -> i64 {
    match value.trunc().to_i64() {
        Some(units) => units,
        None => {
            log::warn!("{value} does not fit in i64, clamping");
            if value.is_sign_negative() {
                i64::MIN
            } else {
                i64::MAX
            }
        }
    }
}

/// Quotient clamped to `Decimal::MIN`/`Decimal::MAX` when it overflows.
/// The divisor must be non-zero.
pub(crate) fn saturating_div(numerator: Decimal, divisor: Decimal) -> Decimal {
    match numerator.checked_div(divisor) {
        Some(quotient) => quotient,
        None => {
            log::warn!("{numerator} / {divisor} overflows Decimal, clamping");
            if numerator.is_sign_negative() != divisor.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            }
        }
    }
}
