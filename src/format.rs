//! Display helpers for market figures (en-US style).

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

const BILLION: Decimal = dec!(1000000000);
const MILLION: Decimal = dec!(1000000);
const THOUSAND: Decimal = dec!(1000);
const CENT: Decimal = dec!(0.01);

pub const NOT_AVAILABLE: &str = "N/A";

/// USD amount with B/M/K abbreviations; sub-cent prices get 6 decimals.
pub fn format_currency(value: impl Into<Option<Decimal>>) -> String {
    let Some(value) = value.into() else {
        return NOT_AVAILABLE.to_string();
    };

    if value > Decimal::ZERO && value < CENT {
        let rounded = value.round_dp_with_strategy(6, RoundingStrategy::MidpointAwayFromZero);
        return format!("${:.6}", rounded);
    }

    let (scaled, suffix) = abbreviate(value);
    let sign = if scaled.is_sign_negative() && !scaled.is_zero() { "-" } else { "" };
    format!("{}${}{}", sign, group(scaled.abs(), 2), suffix)
}

/// Percentage change without sign, two fixed decimals.
pub fn format_percentage(value: impl Into<Option<Decimal>>) -> String {
    let Some(value) = value.into() else {
        return NOT_AVAILABLE.to_string();
    };

    let rounded = value
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = group(rounded, 2);
    let decimals = text.split_once('.').map(|(_, frac)| frac.len()).unwrap_or(0);
    let padding = "0".repeat(2 - decimals);
    let point = if decimals == 0 { "." } else { "" };
    format!("{}{}{}%", text, point, padding)
}

/// Plain quantity (supply, volume) with B/M/K abbreviations.
pub fn format_number(value: impl Into<Option<Decimal>>) -> String {
    let Some(value) = value.into() else {
        return NOT_AVAILABLE.to_string();
    };

    let (scaled, suffix) = abbreviate(value);
    let sign = if scaled.is_sign_negative() && !scaled.is_zero() { "-" } else { "" };
    format!("{}{}{}", sign, group(scaled.abs(), 2), suffix)
}

fn abbreviate(value: Decimal) -> (Decimal, &'static str) {
    if value >= BILLION {
        (value / BILLION, "B")
    } else if value >= MILLION {
        (value / MILLION, "M")
    } else if value >= THOUSAND {
        (value / THOUSAND, "K")
    } else {
        (value, "")
    }
}

/// Rounds to at most `max_dp` decimals, drops trailing zeros and inserts
/// thousands separators. Expects a non-negative value.
fn group(value: Decimal, max_dp: u32) -> String {
    let rounded = value
        .round_dp_with_strategy(max_dp, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part.to_string(), Some(frac_part.to_string())),
        None => (text, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{}.{}", grouped, frac),
        None => grouped,
    }
}
