//! Scalar functions usable as condition parameters.
//!
//! | Function  | Result                                   |
//! |-----------|------------------------------------------|
//! | `now()`   | the current instant (UTC)                |
//! | `day()`   | today's local date                       |
//! | `day(n)`  | today's local date shifted by `n` days   |

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Local, Utc};

use crate::data::DataValue;
use crate::error::{Result, SiftError};
use crate::wql::node::ExpressionNode;
use crate::wql::parameter::Parameter;

/// The supported functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Now,
    Day,
}

impl Function {
    pub fn name(self) -> &'static str {
        match self {
            Function::Now => "now",
            Function::Day => "day",
        }
    }
}

impl FromStr for Function {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "now" => Ok(Function::Now),
            "day" => Ok(Function::Day),
            _ => Err(SiftError::unsupported_function(s)),
        }
    }
}

/// A function applied to parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    function: Function,
    parameters: Vec<Parameter>,
}

impl FunctionCall {
    /// Build a call by function name. Unknown names fail here, not at
    /// execution.
    pub fn new(name: &str, parameters: Vec<Parameter>) -> Result<Self> {
        Ok(FunctionCall {
            function: name.parse()?,
            parameters,
        })
    }

    /// `now()`.
    pub fn now() -> Self {
        FunctionCall {
            function: Function::Now,
            parameters: Vec::new(),
        }
    }

    /// `day()` or `day(offset)`.
    pub fn day(offset: Option<i64>) -> Self {
        FunctionCall {
            function: Function::Day,
            parameters: offset
                .map(|n| vec![Parameter::from(DataValue::Int64(n))])
                .unwrap_or_default(),
        }
    }

    pub fn function(&self) -> Function {
        self.function
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Evaluate the call.
    pub fn execute(&self) -> Result<DataValue> {
        match self.function {
            Function::Now => Ok(DataValue::DateTime(Utc::now())),
            Function::Day => {
                let offset = match self.parameters.first() {
                    Some(parameter) => day_offset(&parameter.resolve()?)?,
                    None => 0,
                };
                let today = Local::now().date_naive();
                Duration::try_days(offset)
                    .and_then(|days| today.checked_add_signed(days))
                    .map(DataValue::Date)
                    .ok_or_else(|| {
                        SiftError::invalid_argument(format!("day offset {offset} is out of range"))
                    })
            }
        }
    }
}

fn day_offset(value: &DataValue) -> Result<i64> {
    match value {
        DataValue::Int64(n) => Ok(*n),
        DataValue::Text(s) | DataValue::String(s) => s.trim().parse().map_err(|_| {
            SiftError::type_mismatch(format!("day offset must be an integer, got '{s}'"))
        }),
        other => Err(SiftError::type_mismatch(format!(
            "day offset must be an integer, got {} '{other}'",
            other.type_name()
        ))),
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.function.name())?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{parameter}")?;
        }
        f.write_str(")")
    }
}

impl ExpressionNode for FunctionCall {
    fn to_sql_query_string(&self) -> String {
        let parameters: Vec<String> = self
            .parameters
            .iter()
            .map(ExpressionNode::to_sql_query_string)
            .collect();
        format!("{}({})", self.function.name(), parameters.join(", "))
    }
}
