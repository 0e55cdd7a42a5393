use std::fmt;
use std::sync::Arc;

use crate::data::{DataValue, Document};
use crate::lexical::reverse_index::ReverseIndex;
use crate::wql::node::ExpressionNode;

/// Reads an attribute value from a record.
pub type ValueAccessor<T> = Arc<dyn Fn(&T) -> DataValue + Send + Sync>;

/// A named attribute of record type `T`.
///
/// The accessor extracts the value for in-memory filtering; the optional
/// reverse index serves index lookups. An attribute without an index still
/// filters, it just cannot narrow candidates ahead of time.
pub struct Attribute<T> {
    name: String,
    accessor: ValueAccessor<T>,
    reverse_index: Option<Arc<dyn ReverseIndex>>,
}

impl<T> Attribute<T> {
    pub fn new<F>(name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> DataValue + Send + Sync + 'static,
    {
        Attribute {
            name: name.into(),
            accessor: Arc::new(accessor),
            reverse_index: None,
        }
    }

    /// Attach the reverse index that holds this attribute's terms.
    pub fn with_reverse_index(mut self, index: Arc<dyn ReverseIndex>) -> Self {
        self.reverse_index = Some(index);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value of this attribute on `item`.
    pub fn value(&self, item: &T) -> DataValue {
        (self.accessor)(item)
    }

    pub fn reverse_index(&self) -> Option<&Arc<dyn ReverseIndex>> {
        self.reverse_index.as_ref()
    }
}

impl Attribute<Document> {
    /// An attribute reading the document field `name`.
    pub fn field(name: impl Into<String>) -> Self {
        let name = name.into();
        let field = name.clone();
        Attribute::new(name, move |doc: &Document| doc.value(&field))
    }
}

impl<T> Clone for Attribute<T> {
    fn clone(&self) -> Self {
        Attribute {
            name: self.name.clone(),
            accessor: Arc::clone(&self.accessor),
            reverse_index: self.reverse_index.clone(),
        }
    }
}

impl<T> fmt::Debug for Attribute<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name)
            .field("reverse_index", &self.reverse_index.is_some())
            .finish()
    }
}

impl<T> fmt::Display for Attribute<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<T> ExpressionNode for Attribute<T> {
    fn to_sql_query_string(&self) -> String {
        self.name.clone()
    }
}
