use std::borrow::Borrow;
use std::fmt;

use crate::analysis::locale::Locale;
use crate::data::DataValue;
use crate::error::Result;
use crate::lexical::reverse_index::IdStream;
use crate::wql::attribute::Attribute;
use crate::wql::node::{ExpressionNode, RecordStream, filter_records};
use crate::wql::operator::SetOperator;
use crate::wql::parameter::Parameter;

/// `attribute in (p1, p2, ...)` or `attribute not in (...)`.
#[derive(Debug, Clone)]
pub struct SetCondition<T> {
    attribute: Attribute<T>,
    operator: SetOperator,
    parameters: Vec<Parameter>,
    locale: Locale,
}

impl<T> SetCondition<T> {
    pub fn new<P, I>(attribute: Attribute<T>, operator: SetOperator, parameters: I) -> Self
    where
        P: Into<Parameter>,
        I: IntoIterator<Item = P>,
    {
        SetCondition {
            attribute,
            operator,
            parameters: parameters.into_iter().map(Into::into).collect(),
            locale: Locale::default(),
        }
    }

    /// Build a set condition from `"in"` or `"not in"`.
    pub fn parse<P, I>(attribute: Attribute<T>, symbol: &str, parameters: I) -> Result<Self>
    where
        P: Into<Parameter>,
        I: IntoIterator<Item = P>,
    {
        Ok(SetCondition::new(attribute, symbol.parse()?, parameters))
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn attribute(&self) -> &Attribute<T> {
        &self.attribute
    }

    pub fn operator(&self) -> SetOperator {
        self.operator
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Set membership has no index path.
    pub fn is_indexed(&self) -> bool {
        false
    }

    /// Always `Ok(None)`: set membership is evaluated in memory only.
    pub fn apply(&self) -> Result<Option<IdStream<'_>>> {
        Ok(None)
    }

    /// Filter `candidates` in memory. Parameters are resolved once, in order.
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

    pub fn matches(&self, item: &T) -> Result<bool> {
        self.bind()?.matches(item)
    }

    pub(crate) fn bind(&self) -> Result<BoundSetCondition<'_, T>> {
        let values = self
            .parameters
            .iter()
            .map(Parameter::resolve)
            .collect::<Result<Vec<_>>>()?;
        Ok(BoundSetCondition {
            condition: self,
            values,
        })
    }
}

pub(crate) struct BoundSetCondition<'a, T> {
    condition: &'a SetCondition<T>,
    values: Vec<DataValue>,
}

impl<T> BoundSetCondition<'_, T> {
    pub(crate) fn matches(&self, item: &T) -> Result<bool> {
        let attribute = self.condition.attribute.value(item);
        self.condition.operator.matches(&attribute, &self.values)
    }
}

impl<T> fmt::Display for SetCondition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} (", self.attribute, self.operator)?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{parameter}")?;
        }
        f.write_str(")")
    }
}

impl<T> ExpressionNode for SetCondition<T> {
    fn to_sql_query_string(&self) -> String {
        self.operator
            .render_sql(self.attribute.name(), &self.parameters)
    }
}
