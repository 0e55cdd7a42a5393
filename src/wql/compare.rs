//! Coercion and comparison of parameter values against attribute values.
//!
//! A parameter is always converted to the type of the attribute value it is
//! compared with. When that is impossible the comparison fails with
//! [`SiftError::TypeMismatch`] instead of guessing.
//!
//! Null rules: a null attribute equals only a null parameter, and never
//! satisfies a like or range comparison.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::analysis::collation::Collator;
use crate::data::DataValue;
use crate::error::{Result, SiftError};

fn mismatch(attribute: &DataValue, parameter: &DataValue) -> SiftError {
    SiftError::type_mismatch(format!(
        "cannot compare {} attribute with {} parameter '{}'",
        attribute.type_name(),
        parameter.type_name(),
        parameter
    ))
}

fn parse_datetime(text: &str) -> Option<DataValue> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(DataValue::DateTime(dt.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(DataValue::Date)
}

/// Convert `parameter` to the type of `attribute`.
pub fn coerce(attribute: &DataValue, parameter: &DataValue) -> Result<DataValue> {
    use DataValue as V;

    let coerced = match (attribute, parameter) {
        (_, V::Null) | (V::Null, _) => parameter.clone(),

        (V::Text(_) | V::String(_) | V::List(_), V::Text(_) | V::String(_)) => parameter.clone(),
        (V::Text(_) | V::String(_), other) => V::Text(other.to_string()),

        (V::Int64(_), V::Int64(_) | V::Float64(_)) => parameter.clone(),
        (V::Float64(_), V::Int64(_) | V::Float64(_)) => V::Float64(parameter.as_float().unwrap_or_default()),
        (V::Int64(_) | V::Float64(_), V::Text(s) | V::String(s)) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                V::Int64(i)
            } else if let Ok(f) = s.parse::<f64>() {
                V::Float64(f)
            } else {
                return Err(mismatch(attribute, parameter));
            }
        }

        (V::Bool(_), V::Bool(_)) => parameter.clone(),
        (V::Bool(_), V::Text(s) | V::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" => V::Bool(true),
            "false" => V::Bool(false),
            _ => return Err(mismatch(attribute, parameter)),
        },

        (V::DateTime(_) | V::Date(_), V::DateTime(_) | V::Date(_)) => parameter.clone(),
        (V::DateTime(_) | V::Date(_), V::Text(s) | V::String(s)) => {
            parse_datetime(s.trim()).ok_or_else(|| mismatch(attribute, parameter))?
        }

        (V::Uuid(_), V::Uuid(_)) => parameter.clone(),
        (V::Uuid(_), V::Text(s) | V::String(s)) => V::Uuid(
            Uuid::parse_str(s.trim()).map_err(|_| mismatch(attribute, parameter))?,
        ),

        _ => return Err(mismatch(attribute, parameter)),
    };
    Ok(coerced)
}

/// Structural equality after coercion.
///
/// A list attribute equals a text parameter when it contains it. A datetime
/// equals a date parameter when it falls on that date.
pub fn equals(attribute: &DataValue, parameter: &DataValue) -> Result<bool> {
    use DataValue as V;

    let parameter = coerce(attribute, parameter)?;
    let equal = match (attribute, &parameter) {
        (V::Null, p) => p.is_null(),
        (_, V::Null) => false,
        (V::Text(a) | V::String(a), V::Text(b) | V::String(b)) => a == b,
        (V::List(items), V::Text(b) | V::String(b)) => items.iter().any(|item| item == b),
        (V::Int64(a), V::Int64(b)) => a == b,
        (V::Int64(_) | V::Float64(_), V::Int64(_) | V::Float64(_)) => {
            attribute.as_float() == parameter.as_float()
        }
        (V::DateTime(_), V::Date(d)) | (V::Date(_), V::Date(d)) => attribute.as_date() == Some(*d),
        (V::Date(d), V::DateTime(dt)) => *d == dt.date_naive(),
        (a, b) => a == b,
    };
    Ok(equal)
}

/// Ordering of `attribute` relative to `parameter` after coercion.
///
/// Returns `None` when the values are unordered (a null on either side or a
/// NaN), which never satisfies a range condition.
pub fn compare(
    attribute: &DataValue,
    parameter: &DataValue,
    collator: &Collator,
) -> Result<Option<Ordering>> {
    use DataValue as V;

    let parameter = coerce(attribute, parameter)?;
    let ordering = match (attribute, &parameter) {
        (V::Null, _) | (_, V::Null) => None,
        (V::Text(a) | V::String(a), V::Text(b) | V::String(b)) => Some(collator.compare(a, b)),
        (V::Int64(a), V::Int64(b)) => Some(a.cmp(b)),
        (V::Int64(_) | V::Float64(_), V::Int64(_) | V::Float64(_)) => {
            attribute.as_float().partial_cmp(&parameter.as_float())
        }
        (V::Bool(a), V::Bool(b)) => Some(a.cmp(b)),
        (V::DateTime(a), V::DateTime(b)) => Some(a.cmp(b)),
        (V::DateTime(_) | V::Date(_), V::Date(_)) | (V::Date(_), V::DateTime(_)) => {
            attribute.as_date().partial_cmp(&parameter.as_date())
        }
        (V::Uuid(a), V::Uuid(b)) => Some(a.cmp(b)),
        _ => {
            return Err(SiftError::type_mismatch(format!(
                "{} values are not ordered",
                attribute.type_name()
            )));
        }
    };
    Ok(ordering)
}

/// Case-insensitive substring containment. List attributes match when any
/// item contains the needle.
pub fn contains_ignore_case(attribute: &DataValue, parameter: &DataValue) -> bool {
    if attribute.is_null() || parameter.is_null() {
        return false;
    }
    let needle = parameter.to_string().to_lowercase();
    match attribute {
        DataValue::List(items) => items
            .iter()
            .any(|item| item.to_lowercase().contains(&needle)),
        other => other.to_string().to_lowercase().contains(&needle),
    }
}

/// Total order used for sorting records by an attribute.
///
/// Nulls sort first; values of different types sort by type; otherwise the
/// collator or natural order decides.
pub fn sort_order(a: &DataValue, b: &DataValue, collator: &Collator) -> Ordering {
    fn rank(v: &DataValue) -> u8 {
        match v {
            DataValue::Null => 0,
            DataValue::Bool(_) => 1,
            DataValue::Int64(_) | DataValue::Float64(_) => 2,
            DataValue::Date(_) | DataValue::DateTime(_) => 3,
            DataValue::Text(_) | DataValue::String(_) => 4,
            DataValue::Uuid(_) => 5,
            DataValue::List(_) => 6,
        }
    }

    match rank(a).cmp(&rank(b)) {
        Ordering::Equal => match (a, b) {
            (DataValue::List(x), DataValue::List(y)) => x.cmp(y),
            _ => compare(a, b, collator)
                .ok()
                .flatten()
                .unwrap_or(Ordering::Equal),
        },
        other => other,
    }
}
