//! Shared traits and stream types of the expression tree.

use std::borrow::Borrow;
use std::fmt::Display;

use crate::error::Result;

/// A lazy, single-pass sequence of candidate records that passed a filter.
///
/// An `Err` item reports an evaluation failure (for example a parameter
/// that cannot be compared with an attribute value); the caller decides
/// whether to stop or continue.
pub type RecordStream<'a, R> = Box<dyn Iterator<Item = Result<R>> + 'a>;

/// A node of a parsed WQL statement.
///
/// `Display` renders the node back as WQL; [`to_sql_query_string`] renders a
/// SQL-like diagnostic fragment. Neither evaluates the node.
///
/// [`to_sql_query_string`]: ExpressionNode::to_sql_query_string
pub trait ExpressionNode: Display {
    /// Render a SQL-like fragment for diagnostics.
    fn to_sql_query_string(&self) -> String;
}

/// Keep the candidates for which `predicate` holds, forwarding predicate
/// errors as `Err` items.
pub(crate) fn filter_records<'a, T, I, P>(candidates: I, predicate: P) -> RecordStream<'a, I::Item>
where
    T: ?Sized,
    I: IntoIterator,
    I::IntoIter: 'a,
    I::Item: Borrow<T>,
    P: Fn(&T) -> Result<bool> + 'a,
{
    Box::new(
        candidates
            .into_iter()
            .filter_map(move |item| match predicate(Borrow::<T>::borrow(&item)) {
                Ok(true) => Some(Ok(item)),
                Ok(false) => None,
                Err(err) => Some(Err(err)),
            }),
    )
}

/// Quote `text` as a SQL string literal, doubling embedded quotes.
pub(crate) fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}
