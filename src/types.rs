//! Core data model types.
//!
//! Trip files are ingested into an in-memory [`DataSet`] using a [`Schema`] (a list of typed
//! [`Field`]s). Derived columns are appended to the same row-major storage.

use std::fmt;

use chrono::NaiveDateTime;

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// UTF-8 string.
    Utf8,
    /// Calendar date and wall-clock time without a time zone.
    Timestamp,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
    /// Whether ingestion fails when the column is absent from the source.
    pub required: bool,
}

impl Field {
    /// Create a new required field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            required: true,
        }
    }

    /// Create a field that is dropped from the ingested schema when the source lacks it.
    pub fn optional(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            required: false,
            ..Self::new(name, data_type)
        }
    }
}

/// A list of fields describing the expected shape of incoming data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Returns `true` if the schema has a field called `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }
}

/// A single typed value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// UTF-8 string.
    Utf8(String),
    /// Naive timestamp.
    Timestamp(NaiveDateTime),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of the value; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&NaiveDateTime> {
        match self {
            Value::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NaN"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Utf8(s) => f.write_str(s),
            Value::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

static NULL: Value = Value::Null;

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate the values of column `name` in row order.
    ///
    /// Returns `None` if the schema has no such column.
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a Value> + use<'a>> {
        let idx = self.schema.index_of(name)?;
        Some(self.rows.iter().map(move |row| row.get(idx).unwrap_or(&NULL)))
    }

    /// Create a new dataset containing only rows that match `predicate`.
    ///
    /// The returned dataset preserves the original schema.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Create a new dataset with `fields` appended to the schema, filling them per row with
    /// the values returned by `deriver`.
    ///
    /// # Panics
    ///
    /// Panics if `deriver` returns a different number of values than `fields.len()`.
    pub fn with_derived_columns<F>(&self, fields: Vec<Field>, mut deriver: F) -> Self
    where
        F: FnMut(&[Value]) -> Vec<Value>,
    {
        let added = fields.len();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let derived = deriver(row.as_slice());
                assert!(
                    derived.len() == added,
                    "derived value count {} does not match derived field count {}",
                    derived.len(),
                    added
                );
                let mut out = Vec::with_capacity(row.len() + added);
                out.extend_from_slice(row);
                out.extend(derived);
                out
            })
            .collect();

        let mut schema = self.schema.clone();
        schema.fields.extend(fields);
        Self { schema, rows }
    }

    /// Reduce (fold) all rows into an accumulator value.
    ///
    /// This is similar to `Iterator::fold`, but provides each row as `&[Value]`.
    pub fn reduce_rows<A, F>(&self, init: A, mut reducer: F) -> A
    where
        F: FnMut(A, &[Value]) -> A,
    {
        self.rows
            .iter()
            .fold(init, |acc, row| reducer(acc, row.as_slice()))
    }

    /// Rows `start..start + len`, clamped to the table size.
    pub fn window(&self, start: usize, len: usize) -> &[Vec<Value>] {
        let start = start.min(self.rows.len());
        let end = start.saturating_add(len).min(self.rows.len());
        &self.rows[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("station", DataType::Utf8),
            Field::new("duration", DataType::Float64),
        ]);
        DataSet::new(
            schema,
            vec![
                vec![Value::Utf8("A".into()), Value::Float64(10.0)],
                vec![Value::Utf8("B".into()), Value::Null],
                vec![Value::Utf8("C".into()), Value::Float64(30.0)],
            ],
        )
    }

    #[test]
    fn column_iterates_in_row_order() {
        let ds = sample();
        let names: Vec<_> = ds.column("station").unwrap().filter_map(Value::as_str).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert!(ds.column("missing").is_none());
    }

    #[test]
    fn derived_columns_are_appended() {
        let ds = sample();
        let out = ds.with_derived_columns(vec![Field::new("is_long", DataType::Int64)], |row| {
            let long = row[1].as_f64().is_some_and(|d| d > 20.0);
            vec![Value::Int64(long as i64)]
        });
        assert_eq!(out.schema.index_of("is_long"), Some(2));
        assert_eq!(out.rows[2][2], Value::Int64(1));
        assert_eq!(out.rows[0][2], Value::Int64(0));
        // Original unchanged
        assert_eq!(ds.schema.fields.len(), 2);
    }

    #[test]
    #[should_panic(expected = "derived value count")]
    fn derived_columns_panic_on_wrong_arity() {
        let ds = sample();
        let _ = ds.with_derived_columns(vec![Field::new("x", DataType::Int64)], |_| vec![]);
    }

    #[test]
    fn window_clamps_to_table_size() {
        let ds = sample();
        assert_eq!(ds.window(0, 2).len(), 2);
        assert_eq!(ds.window(2, 5).len(), 1);
        assert!(ds.window(7, 5).is_empty());
    }

    #[test]
    fn null_renders_like_missing_value() {
        assert_eq!(Value::Null.to_string(), "NaN");
        assert_eq!(Value::Float64(1797.0).to_string(), "1797");
    }
}
