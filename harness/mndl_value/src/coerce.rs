//! Primitive coercion for loose equality.
//!
//! Primitives of different types are compared after implicit conversion:
//! booleans become `0`/`1`, and a string compared with a number is parsed as
//! a number first. `undefined` and `null` equal each other and nothing else.
//! So `1` equals `"1"`, `0` equals `false`, and `""` equals `0`.

use crate::value::Value;

/// Loose equality between two primitive or nullish values.
///
/// Composite values (lists, records, functions, references) are never
/// loosely equal; the equality engine handles them before reaching here.
#[allow(
    clippy::float_cmp,
    reason = "loose equality is exact IEEE comparison after conversion"
)]
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    if a.is_nullish() || b.is_nullish() {
        return a.is_nullish() && b.is_nullish();
    }
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => **x == **y,
        (Value::Bool(x), other) => loose_eq(&Value::Number(bool_to_number(*x)), other),
        (other, Value::Bool(y)) => loose_eq(other, &Value::Number(bool_to_number(*y))),
        (Value::Number(n), Value::Str(s)) | (Value::Str(s), Value::Number(n)) => {
            *n == string_to_number(s)
        }
        _ => false,
    }
}

#[inline]
fn bool_to_number(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// Parse `text` as a number.
///
/// Surrounding whitespace is ignored and an empty string is `0`. Accepts
/// decimal literals with optional sign, fraction and exponent; unsigned
/// `0x`/`0o`/`0b` integer literals; and `Infinity` with optional sign.
/// Anything else is `NaN`.
pub fn string_to_number(text: &str) -> f64 {
    let trimmed = text.trim_matches(is_whitespace);
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(n) = parse_prefixed_integer(trimmed) {
        return n;
    }

    // `str::parse` also accepts "inf", "nan" and "infinity" in any case.
    let decimal_chars = trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !decimal_chars {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// `0x`/`0o`/`0b` literals. `None` when there is no radix prefix;
/// `Some(NaN)` when the prefix is followed by invalid or missing digits.
fn parse_prefixed_integer(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc * f64::from(radix) + f64::from(d))
    });
    Some(value.unwrap_or(f64::NAN))
}

fn is_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}
