//! A complete query: filter, ordering and partitioning.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

use ahash::AHashSet;
use log::debug;
use uuid::Uuid;

use crate::analysis::collation::Collator;
use crate::analysis::locale::Locale;
use crate::data::IndexItem;
use crate::error::Result;
use crate::lexical::reverse_index::IdStream;
use crate::wql::attribute::Attribute;
use crate::wql::compare;
use crate::wql::filter::Filter;
use crate::wql::node::ExpressionNode;

/// One `order by` key.
#[derive(Debug, Clone)]
pub struct OrderAttribute<T> {
    pub attribute: Attribute<T>,
    pub descending: bool,
}

impl<T> fmt::Display for OrderAttribute<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = if self.descending { "desc" } else { "asc" };
        write!(f, "{} {direction}", self.attribute)
    }
}

impl<T> ExpressionNode for OrderAttribute<T> {
    fn to_sql_query_string(&self) -> String {
        self.to_string()
    }
}

/// A partitioning step, applied in statement order after sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    /// Keep at most `n` records.
    Take(usize),
    /// Drop the first `n` records.
    Skip(usize),
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Partition::Take(n) => write!(f, "take {n}"),
            Partition::Skip(n) => write!(f, "skip {n}"),
        }
    }
}

/// A query over records of type `T`.
#[derive(Debug, Clone)]
pub struct Statement<T> {
    filter: Option<Filter<T>>,
    order: Vec<OrderAttribute<T>>,
    partitioning: Vec<Partition>,
    locale: Locale,
}

impl<T> Default for Statement<T> {
    fn default() -> Self {
        Statement {
            filter: None,
            order: Vec::new(),
            partitioning: Vec::new(),
            locale: Locale::default(),
        }
    }
}

impl<T> Statement<T> {
    /// A statement selecting every candidate.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: impl Into<Filter<T>>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn order_by(mut self, attribute: Attribute<T>) -> Self {
        self.order.push(OrderAttribute {
            attribute,
            descending: false,
        });
        self
    }

    pub fn order_by_descending(mut self, attribute: Attribute<T>) -> Self {
        self.order.push(OrderAttribute {
            attribute,
            descending: true,
        });
        self
    }

    pub fn take(mut self, n: usize) -> Self {
        self.partitioning.push(Partition::Take(n));
        self
    }

    pub fn skip(mut self, n: usize) -> Self {
        self.partitioning.push(Partition::Skip(n));
        self
    }

    /// Set the locale used to sort text attributes.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn get_filter(&self) -> Option<&Filter<T>> {
        self.filter.as_ref()
    }

    pub fn order(&self) -> &[OrderAttribute<T>] {
        &self.order
    }

    pub fn partitioning(&self) -> &[Partition] {
        &self.partitioning
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Index lookup for the filter. `Ok(None)` without a filter or when the
    /// filter has no full index path.
    pub fn apply_index(&self) -> Result<Option<IdStream<'_>>> {
        match &self.filter {
            Some(filter) if filter.is_indexed() => filter.apply(),
            _ => Ok(None),
        }
    }

    /// Run the statement over `candidates`.
    ///
    /// When every filter leaf is served by a reverse index the candidates
    /// are narrowed by id; otherwise each candidate is tested in memory.
    /// The first evaluation error aborts the run.
    pub fn apply<I>(&self, candidates: I) -> Result<Vec<I::Item>>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
        T: IndexItem,
    {
        let mut records: Vec<I::Item> = match &self.filter {
            None => candidates.into_iter().collect(),
            Some(filter) => match self.apply_index()? {
                Some(ids) => {
                    let ids: AHashSet<Uuid> = ids.collect();
                    debug!("statement uses index path ({} ids): {filter}", ids.len());
                    candidates
                        .into_iter()
                        .filter(|item| ids.contains(&Borrow::<T>::borrow(item).id()))
                        .collect()
                }
                None => {
                    debug!("statement falls back to scan: {filter}");
                    let bound = filter.bind()?;
                    let mut matched = Vec::new();
                    for item in candidates {
                        if bound.matches(Borrow::<T>::borrow(&item))? {
                            matched.push(item);
                        }
                    }
                    matched
                }
            },
        };

        self.sort(&mut records);
        for partition in &self.partitioning {
            match *partition {
                Partition::Take(n) => records.truncate(n),
                Partition::Skip(n) => {
                    records.drain(..n.min(records.len()));
                }
            }
        }
        Ok(records)
    }

    fn sort<R: Borrow<T>>(&self, records: &mut [R]) {
        if self.order.is_empty() {
            return;
        }
        let collator = Collator::new(&self.locale);
        records.sort_by(|a, b| {
            for key in &self.order {
                let ordering = compare::sort_order(
                    &key.attribute.value(Borrow::<T>::borrow(a)),
                    &key.attribute.value(Borrow::<T>::borrow(b)),
                    &collator,
                );
                let ordering = if key.descending {
                    ordering.reverse()
                } else {
                    ordering
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });
    }
}

fn join<N: fmt::Display>(nodes: &[N], separator: &str) -> String {
    nodes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

impl<T> fmt::Display for Statement<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(filter) = &self.filter {
            parts.push(filter.to_string());
        }
        if !self.order.is_empty() {
            parts.push(format!("order by {}", join(&self.order, ", ")));
        }
        parts.extend(self.partitioning.iter().map(ToString::to_string));
        f.write_str(&parts.join(" "))
    }
}

impl<T> ExpressionNode for Statement<T> {
    fn to_sql_query_string(&self) -> String {
        let mut parts = Vec::new();
        if let Some(filter) = &self.filter {
            parts.push(format!("where {}", filter.to_sql_query_string()));
        }
        if !self.order.is_empty() {
            let keys: Vec<String> = self
                .order
                .iter()
                .map(ExpressionNode::to_sql_query_string)
                .collect();
            parts.push(format!("order by {}", keys.join(", ")));
        }
        let (offset, limit) = self.window();
        if let Some(limit) = limit {
            parts.push(format!("limit {limit}"));
        }
        if offset > 0 {
            parts.push(format!("offset {offset}"));
        }
        parts.join(" ")
    }
}

impl<T> Statement<T> {
    /// Fold the ordered partitions into one `(offset, limit)` window.
    ///
    /// SQL applies `offset` before `limit`, whereas partitions apply in
    /// statement order: `take 10 skip 5` keeps records 5..10, which is
    /// `limit 5 offset 5`.
    fn window(&self) -> (usize, Option<usize>) {
        let mut offset = 0usize;
        let mut limit: Option<usize> = None;
        for partition in &self.partitioning {
            match *partition {
                Partition::Take(n) => limit = Some(limit.map_or(n, |l| l.min(n))),
                Partition::Skip(n) => {
                    offset = offset.saturating_add(n);
                    limit = limit.map(|l| l.saturating_sub(n));
                }
            }
        }
        (offset, limit)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::analysis::pipeline::TermPipeline;
    use crate::analysis::resource::LexicalResources;
    use crate::data::Document;
    use crate::error::SiftError;
    use crate::lexical::memory::MemoryReverseIndex;
    use crate::wql::condition::Condition;
    use crate::wql::operator::Operator;

    fn people() -> Vec<Document> {
        vec![
            Document::new().add_field("Name", "bob").add_field("Age", 42),
            Document::new().add_field("Name", "Alice").add_field("Age", 30),
            Document::new().add_field("Name", "Émile").add_field("Age", 30),
            Document::new().add_field("Name", "Carol").add_field("Age", 25),
        ]
    }

    fn names(records: &[&Document]) -> Vec<String> {
        records
            .iter()
            .map(|doc| doc.value("Name").to_string())
            .collect()
    }

    #[test]
    fn test_order_is_locale_aware() {
        let records = people();
        let statement = Statement::new().order_by(Attribute::field("Name"));
        let result = statement.apply(&records).unwrap();
        assert_eq!(names(&result), vec!["Alice", "bob", "Carol", "Émile"]);
    }

    #[test]
    fn test_multi_key_order_and_partitioning() {
        let records = people();
        let statement = Statement::new()
            .filter(Condition::new(Attribute::field("Age"), Operator::LessThan, 40))
            .order_by_descending(Attribute::field("Age"))
            .order_by(Attribute::field("Name"))
            .skip(1)
            .take(1);
        let result = statement.apply(&records).unwrap();
        assert_eq!(names(&result), vec!["Émile"]);
    }

    #[test]
    fn test_partition_bounds() {
        let records = people();
        let all = || Statement::<Document>::new();
        assert!(all().skip(10).apply(&records).unwrap().is_empty());
        assert_eq!(all().take(10).apply(&records).unwrap().len(), 4);
        assert!(all().take(0).apply(&records).unwrap().is_empty());
        assert_eq!(all().skip(3).take(5).apply(&records).unwrap().len(), 1);
    }

    #[test]
    fn test_error_aborts() {
        let records = people();
        let statement: Statement<Document> =
            Statement::new().filter(Condition::new(Attribute::field("Age"), Operator::Equal, "old"));
        assert!(matches!(
            statement.apply(&records),
            Err(SiftError::TypeMismatch(_))
        ));
    }

    #[test]
    fn test_index_path_narrows_candidates() {
        let records = people();
        let index = Arc::new(MemoryReverseIndex::new(
            Arc::new(TermPipeline::new(&LexicalResources::empty())),
            Locale::new("en"),
        ));
        for doc in &records {
            index.add(doc.id, &doc.value("Name").to_string());
        }
        let name = Attribute::field("Name").with_reverse_index(index);

        // The index normalizes case and accents; a scan would compare exactly.
        let statement = Statement::new().filter(Condition::new(name, Operator::Equal, "EMILE"));
        assert!(statement.apply_index().unwrap().is_some());
        let result = statement.apply(&records).unwrap();
        assert_eq!(names(&result), vec!["Émile"]);
    }

    #[test]
    fn test_rendering() {
        let statement = Statement::new()
            .filter(Condition::new(Attribute::field("Name"), Operator::Equal, "Bob"))
            .order_by_descending(Attribute::field("Age"))
            .take(10)
            .skip(5);
        assert_eq!(
            statement.to_sql_query_string(),
            "where Name = 'Bob' order by Age desc limit 5 offset 5"
        );
        assert_eq!(
            statement.to_string(),
            "Name = 'Bob' order by Age desc take 10 skip 5"
        );
        assert_eq!(Statement::<Document>::new().to_sql_query_string(), "");
    }

    #[test]
    fn test_sql_window_matches_partitioning() {
        let records: Vec<Document> = (0..20i64).map(|i| Document::new().add_field("N", i)).collect();
        let numbers = |statement: &Statement<Document>| -> Vec<String> {
            let result = statement.apply(&records).unwrap();
            result.iter().map(|doc| doc.value("N").to_string()).collect()
        };
        let expected = |from: i64, to: i64| -> Vec<String> { (from..to).map(|i| i.to_string()).collect() };

        let statement = Statement::<Document>::new().take(10).skip(5);
        assert_eq!(statement.to_sql_query_string(), "limit 5 offset 5");
        assert_eq!(numbers(&statement), expected(5, 10));

        let statement = Statement::<Document>::new().skip(5).take(10);
        assert_eq!(statement.to_sql_query_string(), "limit 10 offset 5");
        assert_eq!(numbers(&statement), expected(5, 15));

        let statement = Statement::<Document>::new().skip(3).take(4).skip(1);
        assert_eq!(statement.to_sql_query_string(), "limit 3 offset 4");
        assert_eq!(numbers(&statement), expected(4, 7));

        let statement = Statement::<Document>::new().take(3).skip(5);
        assert_eq!(statement.to_sql_query_string(), "limit 0 offset 5");
        assert!(numbers(&statement).is_empty());

        assert_eq!(Statement::<Document>::new().skip(2).to_sql_query_string(), "offset 2");
    }
}
