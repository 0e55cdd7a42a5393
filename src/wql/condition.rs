use std::borrow::Borrow;
use std::fmt;

use log::debug;

use crate::analysis::collation::Collator;
use crate::analysis::locale::Locale;
use crate::data::DataValue;
use crate::error::Result;
use crate::lexical::reverse_index::IdStream;
use crate::wql::attribute::Attribute;
use crate::wql::node::{ExpressionNode, RecordStream, filter_records};
use crate::wql::operator::Operator;
use crate::wql::parameter::{Parameter, ParameterOptions};

/// `attribute <operator> parameter [options]`.
#[derive(Debug, Clone)]
pub struct Condition<T> {
    attribute: Attribute<T>,
    operator: Operator,
    parameter: Parameter,
    options: ParameterOptions,
    locale: Locale,
}

impl<T> Condition<T> {
    pub fn new(attribute: Attribute<T>, operator: Operator, parameter: impl Into<Parameter>) -> Self {
        Condition {
            attribute,
            operator,
            parameter: parameter.into(),
            options: ParameterOptions::default(),
            locale: Locale::default(),
        }
    }

    /// Build a condition from an operator symbol such as `"="` or `"~"`.
    pub fn parse(attribute: Attribute<T>, symbol: &str, parameter: impl Into<Parameter>) -> Result<Self> {
        Ok(Condition::new(attribute, symbol.parse()?, parameter))
    }

    pub fn with_options(mut self, options: ParameterOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the locale used for ordering comparisons.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn attribute(&self) -> &Attribute<T> {
        &self.attribute
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn parameter(&self) -> &Parameter {
        &self.parameter
    }

    pub fn options(&self) -> &ParameterOptions {
        &self.options
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Whether [`apply`](Self::apply) answers from a reverse index.
    pub fn is_indexed(&self) -> bool {
        self.attribute.reverse_index().is_some()
            && self.operator.retrieve_options(&self.options).is_some()
    }

    /// Look up matching record ids in the attribute's reverse index.
    ///
    /// Returns `Ok(None)` when the operator has no index path (range
    /// comparisons, null parameters) and `Ok(Some(empty))` when the
    /// attribute has no index attached.
    pub fn apply(&self) -> Result<Option<IdStream<'_>>> {
        let Some(options) = self.operator.retrieve_options(&self.options) else {
            return Ok(None);
        };
        let Some(index) = self.attribute.reverse_index() else {
            return Ok(Some(Box::new(std::iter::empty())));
        };
        let value = self.parameter.resolve()?;
        if value.is_null() {
            return Ok(None);
        }
        let term = value.to_string();
        debug!("index lookup {} {} {term:?}", self.attribute.name(), self.operator);
        Ok(Some(index.retrieve(&term, &options)))
    }

    /// Filter `candidates` in memory.
    ///
    /// The parameter is resolved once. If that fails the stream yields the
    /// error as its only item.
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

    pub(crate) fn bind(&self) -> Result<BoundCondition<'_, T>> {
        Ok(BoundCondition {
            condition: self,
            value: self.parameter.resolve()?,
            collator: Collator::new(&self.locale),
        })
    }
}

/// A condition with its parameter resolved, ready to test records.
pub(crate) struct BoundCondition<'a, T> {
    condition: &'a Condition<T>,
    value: DataValue,
    collator: Collator,
}

impl<T> BoundCondition<'_, T> {
    pub(crate) fn matches(&self, item: &T) -> Result<bool> {
        let attribute = self.condition.attribute.value(item);
        self.condition
            .operator
            .matches(&attribute, &self.value, &self.collator)
    }
}

impl<T> fmt::Display for Condition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.attribute, self.operator, self.parameter)?;
        if !self.options.is_empty() {
            write!(f, " {}", self.options)?;
        }
        Ok(())
    }
}

impl<T> ExpressionNode for Condition<T> {
    fn to_sql_query_string(&self) -> String {
        self.operator
            .render_sql(self.attribute.name(), &self.parameter)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Local};
    use uuid::Uuid;

    use super::*;
    use crate::analysis::pipeline::TermPipeline;
    use crate::analysis::resource::LexicalResources;
    use crate::data::Document;
    use crate::error::SiftError;
    use crate::lexical::memory::MemoryReverseIndex;
    use crate::wql::function::FunctionCall;

    fn people() -> Vec<Document> {
        vec![
            Document::new().add_field("Name", "Bob").add_field("Age", 42),
            Document::new().add_field("Name", "Alice").add_field("Age", 30),
        ]
    }

    fn names(records: Vec<&Document>) -> Vec<String> {
        records
            .into_iter()
            .map(|doc| doc.value("Name").to_string())
            .collect()
    }

    fn run(condition: &Condition<Document>, records: &[Document]) -> Vec<String> {
        let matched: Result<Vec<&Document>> = condition.apply_to(records).collect();
        names(matched.unwrap())
    }

    #[test]
    fn test_equal() {
        let condition = Condition::new(Attribute::field("Name"), Operator::Equal, "Bob");
        assert_eq!(run(&condition, &people()), vec!["Bob"]);
    }

    #[test]
    fn test_like() {
        let condition = Condition::parse(Attribute::field("Name"), "~", "ob").unwrap();
        assert_eq!(run(&condition, &people()), vec!["Bob"]);
        let condition = Condition::new(Attribute::field("Name"), Operator::Like, "LIC");
        assert_eq!(run(&condition, &people()), vec!["Alice"]);
    }

    #[test]
    fn test_range() {
        let condition = Condition::new(Attribute::field("Age"), Operator::GreaterThanOrEqual, 31);
        assert_eq!(run(&condition, &people()), vec!["Bob"]);
        let condition = Condition::new(Attribute::field("Name"), Operator::LessThan, "bob");
        assert_eq!(run(&condition, &people()), vec!["Alice"]);
    }

    #[test]
    fn test_type_mismatch_is_reported() {
        let condition = Condition::new(Attribute::field("Age"), Operator::Equal, "old");
        let records = people();
        let results: Vec<Result<&Document>> = condition.apply_to(&records).collect();
        assert_eq!(results.len(), 2);
        assert!(results
            .iter()
            .all(|r| matches!(r, Err(SiftError::TypeMismatch(_)))));
    }

    #[test]
    fn test_function_parameter() {
        let tomorrow = Local::now().date_naive() + Duration::days(1);
        let records = vec![
            Document::new().add_field("Name", "Due").add_field("Date", tomorrow),
            Document::new()
                .add_field("Name", "Late")
                .add_field("Date", tomorrow - Duration::days(30)),
        ];
        let condition = Condition::new(
            Attribute::field("Date"),
            Operator::GreaterThanOrEqual,
            FunctionCall::day(None),
        );
        assert_eq!(run(&condition, &records), vec!["Due"]);
    }

    #[test]
    fn test_unknown_operator() {
        let err = Condition::parse(Attribute::field("Name"), "!=", "Bob").unwrap_err();
        assert!(matches!(err, SiftError::UnsupportedOperator(_)));
    }

    #[test]
    fn test_apply_without_index() {
        let condition = Condition::new(Attribute::field("Name"), Operator::Equal, "Bob");
        assert!(!condition.is_indexed());
        assert_eq!(condition.apply().unwrap().unwrap().count(), 0);

        let condition = Condition::new(Attribute::field("Age"), Operator::GreaterThan, 1);
        assert!(condition.apply().unwrap().is_none());
    }

    #[test]
    fn test_apply_with_index() {
        let index = Arc::new(MemoryReverseIndex::new(
            Arc::new(TermPipeline::new(&LexicalResources::empty())),
            Locale::new("en"),
        ));
        let bob = Uuid::new_v4();
        index.add(bob, "Bob");
        index.add(Uuid::new_v4(), "Alice");

        let attribute = Attribute::field("Name").with_reverse_index(index);
        let condition = Condition::new(attribute.clone(), Operator::Equal, "BOB");
        assert!(condition.is_indexed());
        let ids: Vec<Uuid> = condition.apply().unwrap().unwrap().collect();
        assert_eq!(ids, vec![bob]);

        let condition = Condition::new(attribute, Operator::Like, "bop")
            .with_options(ParameterOptions::distance(1));
        let ids: Vec<Uuid> = condition.apply().unwrap().unwrap().collect();
        assert_eq!(ids, vec![bob]);
    }

    #[test]
    fn test_rendering() {
        let condition = Condition::new(Attribute::field("Name"), Operator::Equal, "Bob");
        assert_eq!(condition.to_sql_query_string(), "Name = 'Bob'");
        assert_eq!(condition.to_string(), "Name = 'Bob'");

        let condition = Condition::new(Attribute::field("Name"), Operator::Like, "ob")
            .with_options(ParameterOptions::distance(2));
        assert_eq!(condition.to_sql_query_string(), "Name like '%ob%'");
        assert_eq!(condition.to_string(), "Name ~ 'ob' distance(2)");

        let condition = Condition::new(Attribute::field("Due"), Operator::LessThan, FunctionCall::day(Some(1)));
        assert_eq!(condition.to_sql_query_string(), "Due < day(1)");
    }
}
