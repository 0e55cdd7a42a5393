use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::data::DataValue;
use crate::error::Result;
use crate::wql::function::FunctionCall;
use crate::wql::node::{ExpressionNode, quote};

/// The right-hand side of a condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Parameter {
    Value(DataValue),
    Function(FunctionCall),
}

impl Parameter {
    /// The value this parameter stands for. Function calls are executed.
    pub fn resolve(&self) -> Result<DataValue> {
        match self {
            Parameter::Value(value) => Ok(value.clone()),
            Parameter::Function(call) => call.execute(),
        }
    }

    /// The literal value, if this is not a function call.
    pub fn as_value(&self) -> Option<&DataValue> {
        match self {
            Parameter::Value(value) => Some(value),
            Parameter::Function(_) => None,
        }
    }
}

fn render_value(value: &DataValue) -> String {
    if value.is_textual() {
        quote(&value.to_string())
    } else {
        value.to_string()
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Value(value) => f.write_str(&render_value(value)),
            Parameter::Function(call) => write!(f, "{call}"),
        }
    }
}

impl ExpressionNode for Parameter {
    fn to_sql_query_string(&self) -> String {
        match self {
            Parameter::Value(value) => render_value(value),
            Parameter::Function(call) => call.to_sql_query_string(),
        }
    }
}

impl From<FunctionCall> for Parameter {
    fn from(call: FunctionCall) -> Self {
        Parameter::Function(call)
    }
}

macro_rules! impl_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Parameter {
                fn from(value: $ty) -> Self {
                    Parameter::Value(value.into())
                }
            }
        )*
    };
}

impl_from_value!(DataValue, String, &str, i64, i32, f64, bool, NaiveDate, DateTime<Utc>, Uuid);

/// Modifiers attached to a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParameterOptions {
    /// Maximum edit distance for approximate (`~`) lookups.
    pub distance: Option<u32>,
}

impl ParameterOptions {
    pub fn distance(distance: u32) -> Self {
        ParameterOptions {
            distance: Some(distance),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.distance.is_none()
    }
}

impl fmt::Display for ParameterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.distance {
            Some(distance) => write!(f, "distance({distance})"),
            None => Ok(()),
        }
    }
}

/// Options have no SQL counterpart and render as an empty fragment.
impl ExpressionNode for ParameterOptions {
    fn to_sql_query_string(&self) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(Parameter::from("Bob").resolve().unwrap(), DataValue::from("Bob"));
        let today = Parameter::from(FunctionCall::day(None)).resolve().unwrap();
        assert!(today.as_date().is_some());
    }

    #[test]
    fn test_rendering() {
        assert_eq!(Parameter::from("Bob").to_string(), "'Bob'");
        assert_eq!(Parameter::from(30).to_sql_query_string(), "30");
        assert_eq!(Parameter::from("it's").to_sql_query_string(), "'it''s'");
        assert_eq!(
            Parameter::from(FunctionCall::day(Some(1))).to_sql_query_string(),
            "day(1)"
        );
        assert_eq!(ParameterOptions::distance(2).to_string(), "distance(2)");
        assert_eq!(ParameterOptions::default().to_string(), "");
    }
}
