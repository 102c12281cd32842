//! Display formatting for money and totals (en-US style).

use rust_decimal::{Decimal, RoundingStrategy};

/// Format a decimal the way the inventory table shows it.
///
/// Thousands are grouped with `,`, at most three fraction digits are kept
/// (rounded half away from zero) and trailing zeros are dropped:
/// `1234.5` → `1,234.5`, `12.00` → `12`, `0.1235` → `0.124`.
pub fn format_number(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    if rounded.is_zero() {
        return "0".to_string();
    }

    let digits = rounded.abs().to_string();
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + whole.len() / 3 + 1);
    if rounded.is_sign_negative() {
        out.push('-');
    }
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}
