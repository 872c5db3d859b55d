//! Lenient number parsing and two-decimal money arithmetic.
//!
//! Every numeric field on the invoice form is free text. Values are parsed
//! with [`parse_number`], which accepts the longest numeric prefix of the
//! input (`"12abc"` → 12, `" 3.50 ct"` → 3.5) and yields `None` when there is
//! no numeric prefix at all. Callers that need a number use
//! [`number_or_zero`]: blank or unparsable input contributes zero and never
//! raises an error.
//!
//! Arithmetic uses [`Decimal`] so that amounts are exact to the paisa.
//! Overflowing results are treated like unparsable input and become zero.
//! The same holds for input beyond `Decimal`'s 96-bit mantissa (integer
//! parts above roughly 7.9e28, e.g. a 30-digit weight): [`parse_number`]
//! returns `None` for it.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Largest exponent magnitude accepted in scientific notation.
///
/// `Decimal` carries at most 28 fractional digits; anything beyond that is
/// either zero or an overflow.
const MAX_EXPONENT: i32 = 28;

/// Parse the longest numeric prefix of `text`.
///
/// Leading whitespace is skipped. The prefix may carry a sign, an integer
/// part, a fractional part and an exponent (`1.5e3`). At least one digit is
/// required in the integer or fractional part.
pub fn parse_number(text: &str) -> Option<Decimal> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = &s[int_start..pos];

    let mut frac_digits = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_digits = &s[frac_start..end];
        // A bare "." only counts when digits precede it ("3." is 3).
        if !frac_digits.is_empty() || !int_digits.is_empty() {
            pos = end;
        }
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let exponent = parse_exponent(&s[pos..])?;

    let mantissa_text = match (int_digits.is_empty(), frac_digits.is_empty()) {
        (_, true) => int_digits.to_string(),
        (true, false) => format!("0.{frac_digits}"),
        (false, false) => format!("{int_digits}.{frac_digits}"),
    };
    let mut value = Decimal::from_str(&mantissa_text).ok()?;
    value = apply_exponent(value, exponent)?;

    if negative {
        value.set_sign_negative(true);
    }
    Some(normalize_zero(value))
}

/// Parse an optional `e[+-]digits` suffix. Returns `Some(0)` when there is no
/// well-formed exponent (the prefix simply ends before the `e`), and `None`
/// when the exponent is out of range.
fn parse_exponent(rest: &str) -> Option<i32> {
    let bytes = rest.as_bytes();
    if !matches!(bytes.first(), Some(b'e') | Some(b'E')) {
        return Some(0);
    }

    let mut pos = 1;
    let negative = match bytes.get(pos) {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let digits_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    if pos == digits_start {
        return Some(0);
    }

    let magnitude: i32 = rest[digits_start..pos].parse().ok()?;
    if magnitude > MAX_EXPONENT {
        return None;
    }
    Some(if negative { -magnitude } else { magnitude })
}

fn apply_exponent(mut value: Decimal, exponent: i32) -> Option<Decimal> {
    let ten = Decimal::TEN;
    if exponent >= 0 {
        for _ in 0..exponent {
            value = value.checked_mul(ten)?;
        }
    } else {
        for _ in 0..exponent.unsigned_abs() {
            value = value.checked_div(ten)?;
        }
    }
    Some(value)
}

/// Parse `text`, substituting zero for blank or unparsable input.
pub fn number_or_zero(text: &str) -> Decimal {
    parse_number(text).unwrap_or(Decimal::ZERO)
}

/// Round to two decimal places, midpoints away from zero.
pub fn round2(value: Decimal) -> Decimal {
    normalize_zero(value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Render `value` with exactly two fractional digits (`4500` → `"4500.00"`).
pub fn format2(value: Decimal) -> String {
    let mut rounded = round2(value);
    rounded.rescale(2);
    rounded.to_string()
}

/// Line amount for a weight/rate pair: `round2(weight × rate)` as text.
pub fn line_amount(weight: &str, rate: &str) -> String {
    let product = number_or_zero(weight)
        .checked_mul(number_or_zero(rate))
        .unwrap_or(Decimal::ZERO);
    format2(product)
}

/// Sum of the given text values, each parsed with zero substitution.
pub fn sum<'a, I>(values: I) -> Decimal
where
    I: IntoIterator<Item = &'a str>,
{
    values.into_iter().fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(number_or_zero(v)).unwrap_or(acc)
    })
}

/// `-0` and `0` compare equal but render differently; keep zero unsigned.
fn normalize_zero(mut value: Decimal) -> Decimal {
    if value.is_zero() {
        value.set_sign_positive(true);
    }
    value
}
