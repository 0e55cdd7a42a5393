//! Condition and set operators.
//!
//! Each operator carries three behaviors: how it maps onto a reverse-index
//! lookup (if at all), how it tests a value in memory, and how it renders.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::analysis::collation::Collator;
use crate::data::DataValue;
use crate::error::{Result, SiftError};
use crate::lexical::reverse_index::RetrieveOptions;
use crate::wql::compare;
use crate::wql::parameter::{Parameter, ParameterOptions};
use crate::wql::node::{ExpressionNode, quote};

/// A binary comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=`: equality after coercion to the attribute type.
    Equal,
    /// `~`: case-insensitive containment.
    Like,
    GreaterThanOrEqual,
    GreaterThan,
    LessThanOrEqual,
    LessThan,
}

impl Operator {
    pub const ALL: [Operator; 6] = [
        Operator::Equal,
        Operator::Like,
        Operator::GreaterThanOrEqual,
        Operator::GreaterThan,
        Operator::LessThanOrEqual,
        Operator::LessThan,
    ];

    /// The WQL symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::Like => "~",
            Operator::GreaterThanOrEqual => ">=",
            Operator::GreaterThan => ">",
            Operator::LessThanOrEqual => "<=",
            Operator::LessThan => "<",
        }
    }

    /// The SQL keyword or symbol.
    pub fn sql_symbol(self) -> &'static str {
        match self {
            Operator::Like => "like",
            other => other.symbol(),
        }
    }

    /// Whether this is an ordering comparison.
    pub fn is_range(self) -> bool {
        !matches!(self, Operator::Equal | Operator::Like)
    }

    /// The reverse-index lookup for this operator, or `None` when the
    /// operator can only be evaluated in memory.
    pub fn retrieve_options(self, options: &ParameterOptions) -> Option<RetrieveOptions> {
        match self {
            Operator::Equal => Some(RetrieveOptions::phrase()),
            Operator::Like => Some(RetrieveOptions::fuzzy(options.distance.unwrap_or(0))),
            _ => None,
        }
    }

    /// Test `attribute` against the resolved `parameter`.
    pub fn matches(self, attribute: &DataValue, parameter: &DataValue, collator: &Collator) -> Result<bool> {
        match self {
            Operator::Equal => compare::equals(attribute, parameter),
            Operator::Like => Ok(compare::contains_ignore_case(attribute, parameter)),
            range => {
                let ordering = compare::compare(attribute, parameter, collator)?;
                Ok(ordering.is_some_and(|ordering| match range {
                    Operator::GreaterThanOrEqual => ordering != Ordering::Less,
                    Operator::GreaterThan => ordering == Ordering::Greater,
                    Operator::LessThanOrEqual => ordering != Ordering::Greater,
                    _ => ordering == Ordering::Less,
                }))
            }
        }
    }

    /// Render `attribute <op> parameter` as SQL.
    pub fn render_sql(self, attribute: &str, parameter: &Parameter) -> String {
        let rendered = match (self, parameter) {
            (Operator::Like, Parameter::Value(value)) if !value.is_null() => {
                quote(&format!("%{value}%"))
            }
            _ => parameter.to_sql_query_string(),
        };
        format!("{attribute} {} {rendered}", self.sql_symbol())
    }
}

impl FromStr for Operator {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self> {
        let symbol = s.trim();
        Operator::ALL
            .into_iter()
            .find(|op| op.symbol() == symbol)
            .ok_or_else(|| SiftError::unsupported_operator(symbol))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A set membership operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOperator {
    In,
    NotIn,
}

impl SetOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            SetOperator::In => "in",
            SetOperator::NotIn => "not in",
        }
    }

    /// Test `attribute` for membership in the resolved `parameters`.
    pub fn matches(self, attribute: &DataValue, parameters: &[DataValue]) -> Result<bool> {
        let mut found = false;
        for parameter in parameters {
            if compare::equals(attribute, parameter)? {
                found = true;
                break;
            }
        }
        Ok(match self {
            SetOperator::In => found,
            SetOperator::NotIn => !found,
        })
    }

    /// Render `attribute <op> (p1, p2, ...)` as SQL.
    pub fn render_sql(self, attribute: &str, parameters: &[Parameter]) -> String {
        let rendered: Vec<String> = parameters
            .iter()
            .map(ExpressionNode::to_sql_query_string)
            .collect();
        format!("{attribute} {} ({})", self.symbol(), rendered.join(", "))
    }
}

impl FromStr for SetOperator {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self> {
        let words: Vec<String> = s.split_whitespace().map(str::to_lowercase).collect();
        match words.as_slice() {
            [w] if w == "in" => Ok(SetOperator::In),
            [n, w] if n == "not" && w == "in" => Ok(SetOperator::NotIn),
            _ => Err(SiftError::unsupported_operator(s.trim())),
        }
    }
}

impl fmt::Display for SetOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
