use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Insert `,` between groups of three digits.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Axis label for a plotted value: truncated toward zero, then grouped.
///
/// Non-finite input renders as `0`.
pub fn format_thousands(value: f64) -> String {
    // `as` saturates and maps NaN to 0
    group_thousands(value.trunc() as i64)
}

/// Percentage with one decimal place, e.g. `0.1234` -> `12.3%`.
pub fn format_percent(ratio: Decimal) -> String {
    let pct = ratio.saturating_mul(dec!(100)).round_dp(1);
    format!("{:.1}%", pct)
}
