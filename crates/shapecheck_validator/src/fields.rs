//! Field validators.
//!
//! One pure function per scalar kind. Each judges a single value against the
//! constraints of its node and returns every violation found, in check order.
//! Compound kinds (`object`, `array`) recurse and live in the engine.

use crate::Violation;
use chrono::format::{self, Item, Parsed, StrftimeItems};
use regex::Regex;
use shapecheck_core::{
    ConfigurationError, DataValue, DateConstraints, IpConstraints, NumberConstraints,
    StringConstraints,
};
use std::fmt::{Display, Write};
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$",
    )
    .expect("email pattern compiles")
});

static TEXT_AND_NUMBERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-zA-Z]+$").expect("alnum pattern compiles"));

static IPV4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])(?:\.(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])){3}$",
    )
    .expect("ipv4 pattern compiles")
});

/// Validates a `string` field.
///
/// Every applicable check runs; a failed type or length check does not hide
/// an options or pattern failure. A non-string value is reported as a type
/// mismatch and then checked in its rendered form (see [`DataValue::display`]).
pub fn validate_string(field: &str, value: &DataValue, c: &StringConstraints) -> Vec<Violation> {
    let mut violations = Vec::new();

    let rendered;
    let text = match value.as_string() {
        Some(text) => text,
        None => {
            violations.push(Violation::type_mismatch(field, "string", value.type_name()));
            rendered = value.display();
            rendered.as_str()
        }
    };

    let length = text.chars().count();

    if let Some(min) = c.min_length {
        if length < min {
            violations.push(Violation::MinLength {
                field: field.to_string(),
                min,
                actual: length,
            });
        }
    }

    if let Some(max) = c.max_length {
        if length > max {
            violations.push(Violation::MaxLength {
                field: field.to_string(),
                max,
                actual: length,
            });
        }
    }

    if let Some(options) = &c.options {
        if !options.iter().any(|o| o == text) {
            violations.push(Violation::not_in_options(field, text, options.clone()));
        }
    }

    if c.is_email && !EMAIL.is_match(text) {
        violations.push(Violation::InvalidEmail {
            field: field.to_string(),
            value: text.to_string(),
        });
    }

    if c.text_and_numbers && !TEXT_AND_NUMBERS.is_match(text) {
        violations.push(Violation::NotAlphanumeric {
            field: field.to_string(),
            value: text.to_string(),
        });
    }

    violations
}

/// Validates a `number` field.
///
/// The value is coerced first (see [`DataValue::to_number`]) and bounds are
/// checked on the coerced value. A value that coerces to zero is exempt from
/// `minNum` only, so `id: 0` passes a minimum of 1; `maxNum` and `numRange`
/// still apply to it.
///
/// `numRange` treats its lower bound as exclusive and its upper bound as
/// inclusive. `options` compares the raw value, so the string `"3"` is not
/// a member of `[3]`, and runs even after a type mismatch.
///
/// # Errors
///
/// Returns [`ConfigurationError::InvalidNumRange`] when `numRange` does not
/// hold exactly two values, regardless of the value being checked.
pub fn validate_number(
    field: &str,
    value: &DataValue,
    c: &NumberConstraints,
) -> Result<Vec<Violation>, ConfigurationError> {
    let range = match c.num_range.as_deref() {
        Some(&[min, max]) => Some((min, max)),
        Some(other) => {
            return Err(ConfigurationError::InvalidNumRange {
                field: field.to_string(),
                len: other.len(),
            });
        }
        None => None,
    };

    let mut violations = Vec::new();
    let number = value.to_number();

    if number.is_nan() {
        violations.push(Violation::type_mismatch(
            field,
            "number",
            value.type_name(),
        ));
    } else {
        if let Some(min) = c.min_num {
            if number != 0.0 && number < min {
                violations.push(Violation::BelowMinimum {
                    field: field.to_string(),
                    min,
                    actual: number,
                });
            }
        }

        if let Some(max) = c.max_num {
            if number > max {
                violations.push(Violation::AboveMaximum {
                    field: field.to_string(),
                    max,
                    actual: number,
                });
            }
        }

        if let Some((min, max)) = range {
            if number <= min || number > max {
                violations.push(Violation::OutOfRange {
                    field: field.to_string(),
                    min,
                    max,
                    actual: number,
                });
            }
        }
    }

    if let Some(options) = &c.options {
        if !value.as_float().is_some_and(|raw| options.contains(&raw)) {
            violations.push(Violation::not_in_options(
                field,
                value.display(),
                options.iter().map(|o| o.to_string()).collect(),
            ));
        }
    }

    Ok(violations)
}

/// Validates a `date` field.
///
/// The value is valid iff parsing it under the pattern and formatting the
/// result under the same pattern reproduces the original string exactly.
///
/// # Errors
///
/// Returns [`ConfigurationError::InvalidDateFormat`] when the pattern holds an
/// unknown specifier.
pub fn validate_date(
    field: &str,
    value: &DataValue,
    c: &DateConstraints,
) -> Result<Vec<Violation>, ConfigurationError> {
    check_date_format(field, &c.format)?;

    let Some(text) = value.as_string() else {
        return Ok(vec![Violation::type_mismatch(
            field,
            "date",
            value.type_name(),
        )]);
    };

    if round_trips(text, &c.format) {
        Ok(Vec::new())
    } else {
        Ok(vec![Violation::InvalidDate {
            field: field.to_string(),
            format: c.format.clone(),
            value: text.to_string(),
        }])
    }
}

/// Rejects strftime patterns containing unknown specifiers.
pub(crate) fn check_date_format(field: &str, pattern: &str) -> Result<(), ConfigurationError> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigurationError::InvalidDateFormat {
            field: field.to_string(),
            format: pattern.to_string(),
        });
    }
    Ok(())
}

fn round_trips(text: &str, pattern: &str) -> bool {
    let mut parsed = Parsed::new();
    if format::parse(&mut parsed, text, StrftimeItems::new(pattern)).is_err() {
        return false;
    }

    // Try the richest interpretation first so offsets and times are not dropped.
    let rendered = if let Ok(dt) = parsed.to_datetime() {
        render(dt.format(pattern))
    } else if let Ok(dt) = parsed.to_naive_datetime_with_offset(0) {
        render(dt.format(pattern))
    } else if let Ok(d) = parsed.to_naive_date() {
        render(d.format(pattern))
    } else if let Ok(t) = parsed.to_naive_time() {
        render(t.format(pattern))
    } else {
        None
    };

    rendered.as_deref() == Some(text)
}

/// Formats without panicking when the pattern asks for fields the value lacks.
fn render(formatted: impl Display) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", formatted).ok()?;
    Some(out)
}

/// Validates an `ip` field: an IPv4 dotted quad, no leading zeros.
pub fn validate_ip(field: &str, value: &DataValue, c: &IpConstraints) -> Vec<Violation> {
    let Some(text) = value.as_string() else {
        return vec![Violation::type_mismatch(field, "ip", value.type_name())];
    };

    let mut violations = Vec::new();

    if !IPV4.is_match(text) {
        violations.push(Violation::InvalidIp {
            field: field.to_string(),
            value: text.to_string(),
        });
    }

    if let Some(options) = &c.options {
        if !options.iter().any(|o| o == text) {
            violations.push(Violation::not_in_options(field, text, options.clone()));
        }
    }

    violations
}

/// Primitive categories checked by exact type only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlainType {
    Boolean,
    Null,
}

impl PlainType {
    pub fn name(self) -> &'static str {
        match self {
            PlainType::Boolean => "boolean",
            PlainType::Null => "null",
        }
    }

    fn matches(self, value: &DataValue) -> bool {
        match self {
            PlainType::Boolean => value.as_bool().is_some(),
            PlainType::Null => value.is_null(),
        }
    }
}

/// Validates a plain-type field: the value must be exactly of that type.
pub fn validate_plain(field: &str, value: &DataValue, expected: PlainType) -> Vec<Violation> {
    if expected.matches(value) {
        Vec::new()
    } else {
        vec![Violation::type_mismatch(
            field,
            expected.name(),
            value.type_name(),
        )]
    }
}
