//! Type rules applied to supplied values.
//!
//! [`coerce`] turns the raw text of one token into a [`Value`] according to the field's
//! [`FieldType`], or rejects it with a validation error naming the field and the expected form.

use crate::spec::FieldType;
use crate::{Error, Number, Result, Value};
use std::path::Path;
use url::Url;

const BOOLEAN_WORDS: &str = "yes, no, true, false";

/// Applies the rule for `field_type` to `raw`.
///
/// `trim_strings` only affects `string` fields; every other type trims unconditionally.
///
/// # Errors
///
/// Returns a `ValidationFailure` error naming `field` when the value does not satisfy the rule.
///
/// # Examples
///
/// ```rust
/// use argspec::{coerce::coerce, FieldType, Value};
///
/// assert_eq!(coerce("on", FieldType::Bool, " YES ", true).unwrap(), Value::Bool(true));
/// assert_eq!(coerce("n", FieldType::Number, "1.10", true).unwrap(), Value::from("1.10"));
/// assert!(coerce("n", FieldType::Int, "ten", true).is_err());
/// ```
pub fn coerce(field: &str, field_type: FieldType, raw: &str, trim_strings: bool) -> Result<Value> {
    let text = raw.trim();
    match field_type {
        FieldType::String if trim_strings => Ok(Value::String(text.to_string())),
        FieldType::String => Ok(Value::String(raw.to_string())),
        FieldType::Bool => coerce_bool(field, text),
        FieldType::Int => coerce_int(field, text),
        FieldType::Float => coerce_float(field, text),
        FieldType::Number => {
            check_numeric(field, text, "Expected numeric argument")?;
            Ok(Value::String(text.to_string()))
        }
        FieldType::Directory => {
            if !Path::new(text).is_dir() {
                return Err(Error::validation(
                    field,
                    format!("Directory \"{}\" does not exist", text),
                ));
            }
            Ok(Value::String(text.to_string()))
        }
        FieldType::List => {
            let items: Vec<Value> = text
                .split(',')
                .filter(|segment| !segment.is_empty())
                .map(Value::from)
                .collect();
            if items.is_empty() {
                return Err(Error::validation(
                    field,
                    "Expected list but expanding list argument failed",
                ));
            }
            Ok(Value::List(items))
        }
        FieldType::Uri => {
            check_uri(field, text)?;
            Ok(Value::String(text.to_string()))
        }
    }
}

fn coerce_bool(field: &str, text: &str) -> Result<Value> {
    match text.to_ascii_lowercase().as_str() {
        "yes" | "true" => Ok(Value::Bool(true)),
        "no" | "false" => Ok(Value::Bool(false)),
        _ => Err(Error::validation(
            field,
            format!(
                "A boolean value should be one of the following values: {}. Got \"{}\"",
                BOOLEAN_WORDS, text
            ),
        )),
    }
}

fn coerce_int(field: &str, text: &str) -> Result<Value> {
    const EXPECTED: &str = "Expected a numeric value to convert to integer";
    check_numeric(field, text, EXPECTED)?;

    let out_of_range = || Error::validation(field, format!("Integer value {} is out of range", text));

    // Without an exponent the integer part is exact, so truncation never goes through f64.
    if !text.contains(['e', 'E']) {
        let whole = text.split('.').next().unwrap_or_default();
        return match whole {
            "" | "+" | "-" => Ok(Value::Number(Number::Integer(0))),
            digits => digits
                .parse::<i64>()
                .map(|exact| Value::Number(Number::Integer(exact)))
                .map_err(|_| out_of_range()),
        };
    }

    // Exponent notation: truncate toward zero when it fits. 2^63 is the first value past i64::MAX.
    let approx: f64 = text
        .parse()
        .map_err(|_| Error::validation(field, EXPECTED))?;
    let truncated = approx.trunc();
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(out_of_range());
    }
    Ok(Value::Number(Number::Integer(truncated as i64)))
}

fn coerce_float(field: &str, text: &str) -> Result<Value> {
    const EXPECTED: &str = "Expected a numeric value to convert to float";
    check_numeric(field, text, EXPECTED)?;

    let parsed: f64 = text
        .parse()
        .map_err(|_| Error::validation(field, EXPECTED))?;
    if !parsed.is_finite() {
        return Err(Error::validation(
            field,
            format!("Float value {} is out of range", text),
        ));
    }
    Ok(Value::Number(Number::Float(parsed)))
}

fn check_numeric(field: &str, text: &str, expected: &str) -> Result<()> {
    if is_numeric(text) {
        Ok(())
    } else {
        Err(Error::validation(field, expected))
    }
}

/// Returns `true` for decimal numeric text: an optional sign, digits with an optional
/// fractional part (at least one digit overall), and an optional exponent.
///
/// # Examples
///
/// ```rust
/// use argspec::coerce::is_numeric;
///
/// assert!(is_numeric("-12"));
/// assert!(is_numeric("+.5"));
/// assert!(is_numeric("1e-3"));
/// assert!(!is_numeric("1e"));
/// assert!(!is_numeric("inf"));
/// assert!(!is_numeric("0x1A"));
/// ```
#[must_use]
pub fn is_numeric(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let mut digits = pos - int_start;

    if pos < bytes.len() && bytes[pos] == b'.' {
        pos += 1;
        let frac_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        digits += pos - frac_start;
    }

    if digits == 0 {
        return false;
    }

    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+' | b'-')) {
            pos += 1;
        }
        let exp_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos == exp_start {
            return false;
        }
    }

    pos == bytes.len()
}

fn check_uri(field: &str, text: &str) -> Result<()> {
    let invalid = || Error::validation(field, "Expected valid URI with a scheme and a host");
    let parsed = Url::parse(text).map_err(|_| invalid())?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}
