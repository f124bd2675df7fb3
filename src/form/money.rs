//! Lenient amount parsing and two-decimal formatting.
//!
//! Form fields hold whatever the user typed. Calculations read them with
//! [`parse_amount`], which never fails: the longest leading number is used
//! and anything unreadable counts as zero.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places shown for prices, subtotals and totals.
pub const MONEY_DP: u32 = 2;

/// Reads the leading number of `text`, or zero if there is none.
///
/// Accepts an optional sign, digits with an optional fractional part, and an
/// optional exponent (`"1e3"`, `"1.e2"`). Trailing garbage is ignored, so
/// `"3 pcs"` reads as 3.
///
/// A number outside the range of [`Decimal`] (about ±7.9e28, e.g. `"1e30"`)
/// also reads as zero.
pub fn parse_amount(text: &str) -> Decimal {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    end = skip_digits(bytes, end);
    let int_digits = end - int_start;

    let mut frac_digits = 0;
    // Where an exponent may start; past a trailing bare `.` as in "1.e2".
    let mut exp_start = end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = skip_digits(bytes, end + 1);
        frac_digits = frac_end - end - 1;
        if frac_digits > 0 {
            end = frac_end;
        }
        exp_start = frac_end;
    }

    if int_digits == 0 && frac_digits == 0 {
        return Decimal::ZERO;
    }

    let mut mantissa = String::with_capacity(end + 1);
    if bytes[0] == b'-' {
        mantissa.push('-');
    }
    if int_digits == 0 {
        mantissa.push('0');
    }
    mantissa.push_str(&trimmed[int_start..end]);

    let value = match exponent_len(&bytes[exp_start..]) {
        Some(len) => {
            let exp = &trimmed[exp_start..exp_start + len];
            Decimal::from_scientific(&format!("{mantissa}{exp}"))
        }
        None => Decimal::from_str(&mantissa),
    };
    value.unwrap_or(Decimal::ZERO)
}

/// Rounds to two decimal places, halves away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount with exactly two decimals (`"0.00"`, `"19.90"`).
pub fn format_money(value: Decimal) -> String {
    let mut rounded = round_money(value);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(MONEY_DP);
    rounded.to_string()
}

fn skip_digits(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    pos
}

/// Length of a well-formed exponent (`e`, optional sign, digits) at the
/// start of `bytes`.
fn exponent_len(bytes: &[u8]) -> Option<usize> {
    if !matches!(bytes.first(), Some(b'e' | b'E')) {
        return None;
    }
    let mut pos = 1;
    if matches!(bytes.get(pos), Some(b'+' | b'-')) {
        pos += 1;
    }
    let digits_end = skip_digits(bytes, pos);
    (digits_end > pos).then_some(digits_end)
}
