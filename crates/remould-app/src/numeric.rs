// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Free-text numeric input policy for the intake form.
//!
//! Typed text never produces an error: text that does not yield a usable
//! number turns into zero (budgets) or an absent value (measurements).

/// Parses the longest numeric prefix of `input`, skipping leading whitespace.
/// `"12ft"` yields 12, `"  3.5e1x"` yields 35, `"ft12"` yields nothing.
pub fn parse_leading_number(input: &str) -> Option<f64> {
    let trimmed = input.trim_start();
    let bytes = trimmed.as_bytes();
    let mut index = 0usize;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        index += 1;
    }

    let int_start = index;
    skip_ascii_digits(bytes, &mut index);
    let mut digits = index - int_start;

    if bytes.get(index) == Some(&b'.') {
        let mut frac_end = index + 1;
        skip_ascii_digits(bytes, &mut frac_end);
        let frac_digits = frac_end - (index + 1);
        if digits + frac_digits > 0 {
            digits += frac_digits;
            index = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(index), Some(b'e' | b'E')) {
        let mut exp_end = index + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_start = exp_end;
        skip_ascii_digits(bytes, &mut exp_end);
        if exp_end > exp_start {
            index = exp_end;
        }
    }

    trimmed[..index].parse::<f64>().ok()
}

/// Budget text to cents. A leading `$` and thousands separators are
/// accepted; anything unusable, negative or non-finite becomes 0.
pub fn parse_budget_cents(input: &str) -> i64 {
    let trimmed = input.trim();
    let clean = trimmed.strip_prefix('$').unwrap_or(trimmed).replace(',', "");
    let Some(dollars) = parse_leading_number(&clean) else {
        return 0;
    };
    dollars_to_cents(dollars).unwrap_or(0)
}

/// Measurement text to feet. Zero counts as absent, like an empty field.
pub fn parse_measurement(input: &str) -> Option<f64> {
    parse_leading_number(input).filter(|value| value.is_finite() && *value > 0.0)
}

pub fn dollars_to_cents(dollars: f64) -> Option<i64> {
    if !dollars.is_finite() || dollars < 0.0 {
        return None;
    }
    let cents = (dollars * 100.0).round();
    if cents > i64::MAX as f64 {
        return None;
    }
    Some(cents as i64)
}

pub fn cents_to_dollars(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// `$1,500` for whole amounts, `$1,500.5` / `$1,500.25` otherwise.
pub fn format_dollars(cents: i64) -> String {
    let (sign, cents) = normalize_sign(cents);
    let whole = cents / 100;
    let remainder = cents % 100;
    if remainder == 0 {
        return format!("{sign}${}", comma_format(whole));
    }
    let fraction = format!("{remainder:02}");
    format!(
        "{sign}${}.{}",
        comma_format(whole),
        fraction.trim_end_matches('0')
    )
}

/// Feet the way a number prints: `12`, `12.5`.
pub fn format_feet(value: f64) -> String {
    format!("{value}")
}

pub fn format_square_feet(value: f64) -> String {
    format!("{value:.0}")
}

pub fn format_square_feet_preview(value: f64) -> String {
    format!("{value:.1}")
}

/// Serde `with` module storing cents but putting dollars on the wire.
pub(crate) mod dollars {
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(super::cents_to_dollars(*cents))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let dollars = f64::deserialize(deserializer)?;
        super::dollars_to_cents(dollars)
            .ok_or_else(|| de::Error::custom("amount must be a non-negative number of dollars"))
    }
}

fn skip_ascii_digits(bytes: &[u8], index: &mut usize) {
    while *index < bytes.len() && bytes[*index].is_ascii_digit() {
        *index += 1;
    }
}

fn comma_format(value: i64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let mut chars = digits.chars().collect::<Vec<_>>();
    let mut count = 0usize;
    while let Some(ch) = chars.pop() {
        if count == 3 {
            out.push(',');
            count = 0;
        }
        out.push(ch);
        count += 1;
    }
    out.chars().rev().collect()
}

fn normalize_sign(cents: i64) -> (&'static str, i64) {
    if cents >= 0 {
        return ("", cents);
    }
    if cents == i64::MIN {
        ("-", i64::MAX)
    } else {
        ("-", -cents)
    }
}
