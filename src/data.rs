use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The value type of record attributes and query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataValue {
    Null,
    Bool(bool),
    Int64(i64),
    Float64(f64),

    /// String content typically used for keywords, IDs, or non-tokenized metadata.
    String(String),

    /// Text content to be full-text indexed.
    Text(String),

    /// Date and time in UTC.
    DateTime(DateTime<Utc>),

    /// Calendar date without time of day.
    Date(NaiveDate),

    Uuid(Uuid),

    /// List of values (e.g. tags).
    List(Vec<String>),
}

impl DataValue {
    /// Returns the text value if this is a Text or String variant.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DataValue::Text(s) | DataValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer value if this is an Int64 variant.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            DataValue::Int64(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float value of a numeric variant.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            DataValue::Float64(f) => Some(*f),
            DataValue::Int64(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the boolean value if this is a Bool variant.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            DataValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the datetime value if this is a DateTime variant.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            DataValue::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Returns the date if this is a Date or DateTime variant.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            DataValue::Date(d) => Some(*d),
            DataValue::DateTime(dt) => Some(dt.date_naive()),
            _ => None,
        }
    }

    /// Returns the id if this is a Uuid variant.
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            DataValue::Uuid(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    /// A short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            DataValue::Null => "null",
            DataValue::Bool(_) => "bool",
            DataValue::Int64(_) => "int64",
            DataValue::Float64(_) => "float64",
            DataValue::String(_) => "string",
            DataValue::Text(_) => "text",
            DataValue::DateTime(_) => "datetime",
            DataValue::Date(_) => "date",
            DataValue::Uuid(_) => "uuid",
            DataValue::List(_) => "list",
        }
    }

    /// Whether the value renders as quoted text in query strings.
    pub fn is_textual(&self) -> bool {
        !matches!(
            self,
            DataValue::Null | DataValue::Bool(_) | DataValue::Int64(_) | DataValue::Float64(_)
        )
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Null => f.write_str("null"),
            DataValue::Bool(b) => write!(f, "{b}"),
            DataValue::Int64(i) => write!(f, "{i}"),
            DataValue::Float64(v) => write!(f, "{v}"),
            DataValue::String(s) | DataValue::Text(s) => f.write_str(s),
            DataValue::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            DataValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            DataValue::Uuid(id) => write!(f, "{id}"),
            DataValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

// --- Conversions ---

impl From<String> for DataValue {
    fn from(v: String) -> Self {
        DataValue::Text(v)
    }
}

impl From<&str> for DataValue {
    fn from(v: &str) -> Self {
        DataValue::Text(v.to_string())
    }
}

impl From<i64> for DataValue {
    fn from(v: i64) -> Self {
        DataValue::Int64(v)
    }
}

impl From<i32> for DataValue {
    fn from(v: i32) -> Self {
        DataValue::Int64(v as i64)
    }
}

impl From<f64> for DataValue {
    fn from(v: f64) -> Self {
        DataValue::Float64(v)
    }
}

impl From<bool> for DataValue {
    fn from(v: bool) -> Self {
        DataValue::Bool(v)
    }
}

impl From<DateTime<Utc>> for DataValue {
    fn from(dt: DateTime<Utc>) -> Self {
        DataValue::DateTime(dt)
    }
}

impl From<NaiveDate> for DataValue {
    fn from(d: NaiveDate) -> Self {
        DataValue::Date(d)
    }
}

impl From<Uuid> for DataValue {
    fn from(id: Uuid) -> Self {
        DataValue::Uuid(id)
    }
}

impl From<Vec<String>> for DataValue {
    fn from(v: Vec<String>) -> Self {
        DataValue::List(v)
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(DataValue::Null, Into::into)
    }
}

/// A record that can be indexed and queried.
pub trait IndexItem {
    /// The unique id of the record.
    fn id(&self) -> Uuid;
}

/// A dynamic record: an id plus named fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,

    /// Field data.
    pub fields: HashMap<String, DataValue>,
}

impl Document {
    /// Create a new empty document with a random id.
    pub fn new() -> Self {
        Self::new_with_id(Uuid::new_v4())
    }

    /// Create a new document with a specific ID.
    pub fn new_with_id(id: Uuid) -> Self {
        Self {
            id,
            fields: HashMap::new(),
        }
    }

    /// Add a field to the document.
    pub fn add_field(mut self, name: impl Into<String>, value: impl Into<DataValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Get a reference to a field's value.
    pub fn get(&self, name: &str) -> Option<&DataValue> {
        self.fields.get(name)
    }

    /// The value of a field, or [`DataValue::Null`] when absent.
    pub fn value(&self, name: &str) -> DataValue {
        self.fields.get(name).cloned().unwrap_or(DataValue::Null)
    }

    /// Check if the document has a field.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Get all field names.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(|s| s.as_str()).collect()
    }

    /// Get the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexItem for Document {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl<T: IndexItem + ?Sized> IndexItem for &T {
    fn id(&self) -> Uuid {
        (**self).id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_fields() {
        let doc = Document::new()
            .add_field("Name", "Bob")
            .add_field("Age", 42)
            .add_field("Score", 1.5);

        assert_eq!(doc.len(), 3);
        assert_eq!(doc.get("Name").and_then(|v| v.as_text()), Some("Bob"));
        assert_eq!(doc.value("Age").as_integer(), Some(42));
        assert_eq!(doc.value("Missing"), DataValue::Null);
        assert!(doc.has_field("Score"));
    }

    #[test]
    fn test_index_item() {
        let id = Uuid::new_v4();
        let doc = Document::new_with_id(id);
        assert_eq!(doc.id(), id);
        assert_eq!((&doc).id(), id);
    }

    #[test]
    fn test_display() {
        assert_eq!(DataValue::from("Bob").to_string(), "Bob");
        assert_eq!(DataValue::from(7).to_string(), "7");
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(DataValue::from(date).to_string(), "2024-02-29");
        assert_eq!(DataValue::Null.to_string(), "null");
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(DataValue::from(None::<i64>), DataValue::Null);
        assert_eq!(DataValue::from(Some("x")), DataValue::Text("x".to_string()));
    }

    #[test]
    fn test_as_date_from_datetime() {
        let dt = DateTime::parse_from_rfc3339("2024-05-01T23:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(
            DataValue::from(dt).as_date(),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
    }
}
