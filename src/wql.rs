//! WQL expression trees and their evaluation.
//!
//! A tree is built once (by a parser or by hand) and is immutable afterwards.
//! Every node can be evaluated two ways:
//!
//! - `apply()` asks the attribute's [`ReverseIndex`](crate::lexical::ReverseIndex)
//!   for matching record ids, where the operator supports it
//! - `apply_to(candidates)` filters records in memory
//!
//! and rendered two ways: `Display` gives WQL text, `to_sql_query_string()`
//! a SQL-like fragment for diagnostics.
//!
//! # Example
//!
//! ```
//! use sift::data::Document;
//! use sift::wql::{Attribute, Condition, ExpressionNode, Filter, Operator, SetOperator, SetCondition};
//!
//! let records = vec![
//!     Document::new().add_field("Name", "Bob"),
//!     Document::new().add_field("Name", "Alice"),
//! ];
//! let filter = Filter::from(Condition::new(Attribute::field("Name"), Operator::Like, "ob"))
//!     .or(SetCondition::new(Attribute::field("Name"), SetOperator::In, ["Carol"]));
//!
//! assert_eq!(filter.to_sql_query_string(), "Name like '%ob%' or Name in ('Carol')");
//! let matched: Vec<&Document> = filter.apply_to(&records).collect::<sift::Result<_>>()?;
//! assert_eq!(matched.len(), 1);
//! # Ok::<(), sift::SiftError>(())
//! ```

pub mod attribute;
pub mod compare;
pub mod condition;
pub mod filter;
pub mod function;
pub mod node;
pub mod operator;
pub mod parameter;
pub mod set_condition;
pub mod statement;

pub use attribute::{Attribute, ValueAccessor};
pub use condition::Condition;
pub use filter::Filter;
pub use function::{Function, FunctionCall};
pub use node::{ExpressionNode, RecordStream};
pub use operator::{Operator, SetOperator};
pub use parameter::{Parameter, ParameterOptions};
pub use set_condition::SetCondition;
pub use statement::{OrderAttribute, Partition, Statement};
