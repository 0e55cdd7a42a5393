//! Boolean composition of conditions.

use std::borrow::Borrow;
use std::fmt;

use ahash::AHashSet;
use uuid::Uuid;

use crate::error::Result;
use crate::lexical::reverse_index::IdStream;
use crate::wql::condition::{BoundCondition, Condition};
use crate::wql::node::{ExpressionNode, RecordStream, filter_records};
use crate::wql::set_condition::{BoundSetCondition, SetCondition};

/// A filter tree over records of type `T`.
#[derive(Debug, Clone)]
pub enum Filter<T> {
    Condition(Condition<T>),
    Set(SetCondition<T>),
    And(Box<Filter<T>>, Box<Filter<T>>),
    Or(Box<Filter<T>>, Box<Filter<T>>),
    /// A parenthesized sub-filter.
    Group(Box<Filter<T>>),
}

impl<T> Filter<T> {
    pub fn and(self, other: impl Into<Filter<T>>) -> Self {
        Filter::And(Box::new(self), Box::new(other.into()))
    }

    pub fn or(self, other: impl Into<Filter<T>>) -> Self {
        Filter::Or(Box::new(self), Box::new(other.into()))
    }

    /// Wrap this filter in parentheses.
    pub fn group(self) -> Self {
        Filter::Group(Box::new(self))
    }

    /// Whether every leaf can be answered from a reverse index.
    pub fn is_indexed(&self) -> bool {
        match self {
            Filter::Condition(condition) => condition.is_indexed(),
            Filter::Set(condition) => condition.is_indexed(),
            Filter::And(left, right) | Filter::Or(left, right) => {
                left.is_indexed() && right.is_indexed()
            }
            Filter::Group(inner) => inner.is_indexed(),
        }
    }

    /// Evaluate the filter against reverse indexes.
    ///
    /// `And` intersects and `Or` unions the child id streams. The result is
    /// `Ok(None)` as soon as any child has no index path.
    pub fn apply(&self) -> Result<Option<IdStream<'_>>> {
        match self {
            Filter::Condition(condition) => condition.apply(),
            Filter::Set(condition) => condition.apply(),
            Filter::Group(inner) => inner.apply(),
            Filter::And(left, right) => {
                let (Some(left), Some(right)) = (left.apply()?, right.apply()?) else {
                    return Ok(None);
                };
                let right: AHashSet<Uuid> = right.collect();
                Ok(Some(Box::new(left.filter(move |id| right.contains(id)))))
            }
            Filter::Or(left, right) => {
                let (Some(left), Some(right)) = (left.apply()?, right.apply()?) else {
                    return Ok(None);
                };
                let mut seen = AHashSet::new();
                Ok(Some(Box::new(left.chain(right).filter(move |id| seen.insert(*id)))))
            }
        }
    }

    /// Filter `candidates` in memory with short-circuit evaluation.
    ///
    /// Parameters are resolved once for the whole stream; a resolution error
    /// is yielded as the only item.
    pub fn apply_to<'a, I>(&'a self, candidates: I) -> RecordStream<'a, I::Item>
    where
        I: IntoIterator,
        I::IntoIter: 'a,
        I::Item: Borrow<T> + 'a,
        T: 'a,
    {
        match self.bind() {
            Ok(bound) => filter_records(candidates, move |item: &T| bound.matches(item)),
            Err(err) => Box::new(std::iter::once(Err(err))),
        }
    }

    /// Test a single record.
    pub fn matches(&self, item: &T) -> Result<bool> {
        self.bind()?.matches(item)
    }

    pub(crate) fn bind(&self) -> Result<BoundFilter<'_, T>> {
        Ok(match self {
            Filter::Condition(condition) => BoundFilter::Condition(condition.bind()?),
            Filter::Set(condition) => BoundFilter::Set(condition.bind()?),
            Filter::And(left, right) => {
                BoundFilter::And(Box::new(left.bind()?), Box::new(right.bind()?))
            }
            Filter::Or(left, right) => {
                BoundFilter::Or(Box::new(left.bind()?), Box::new(right.bind()?))
            }
            Filter::Group(inner) => inner.bind()?,
        })
    }
}

pub(crate) enum BoundFilter<'a, T> {
    Condition(BoundCondition<'a, T>),
    Set(BoundSetCondition<'a, T>),
    And(Box<BoundFilter<'a, T>>, Box<BoundFilter<'a, T>>),
    Or(Box<BoundFilter<'a, T>>, Box<BoundFilter<'a, T>>),
}

impl<T> BoundFilter<'_, T> {
    pub(crate) fn matches(&self, item: &T) -> Result<bool> {
        match self {
            BoundFilter::Condition(condition) => condition.matches(item),
            BoundFilter::Set(condition) => condition.matches(item),
            BoundFilter::And(left, right) => Ok(left.matches(item)? && right.matches(item)?),
            BoundFilter::Or(left, right) => Ok(left.matches(item)? || right.matches(item)?),
        }
    }
}

impl<T> From<Condition<T>> for Filter<T> {
    fn from(condition: Condition<T>) -> Self {
        Filter::Condition(condition)
    }
}

impl<T> From<SetCondition<T>> for Filter<T> {
    fn from(condition: SetCondition<T>) -> Self {
        Filter::Set(condition)
    }
}

impl<T> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Condition(condition) => write!(f, "{condition}"),
            Filter::Set(condition) => write!(f, "{condition}"),
            Filter::And(left, right) => write!(
                f,
                "{} and {}",
                left.operand_text(true, left.to_string()),
                right.operand_text(true, right.to_string())
            ),
            Filter::Or(left, right) => write!(
                f,
                "{} or {}",
                left.operand_text(false, left.to_string()),
                right.operand_text(false, right.to_string())
            ),
            Filter::Group(inner) => write!(f, "({inner})"),
        }
    }
}

impl<T> Filter<T> {
    /// Parenthesize `text` when this node is the other combinator than its
    /// parent, so the rendered text keeps the tree's grouping.
    fn operand_text(&self, parent_is_and: bool, text: String) -> String {
        match self {
            Filter::Or(..) if parent_is_and => format!("({text})"),
            Filter::And(..) if !parent_is_and => format!("({text})"),
            _ => text,
        }
    }
}

impl<T> ExpressionNode for Filter<T> {
    fn to_sql_query_string(&self) -> String {
        match self {
            Filter::Condition(condition) => condition.to_sql_query_string(),
            Filter::Set(condition) => condition.to_sql_query_string(),
            Filter::And(left, right) => format!(
                "{} and {}",
                left.operand_text(true, left.to_sql_query_string()),
                right.operand_text(true, right.to_sql_query_string())
            ),
            Filter::Or(left, right) => format!(
                "{} or {}",
                left.operand_text(false, left.to_sql_query_string()),
                right.operand_text(false, right.to_sql_query_string())
            ),
            Filter::Group(inner) => format!("({})", inner.to_sql_query_string()),
        }
    }
}
