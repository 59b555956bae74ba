//! Columns derived from `Start Time` at load time.

use chrono::{Datelike, NaiveDateTime};

use crate::columns;
use crate::error::{ExplorerError, ExplorerResult};
use crate::registry::weekday_name;
use crate::types::{DataSet, DataType, Field, Value};

/// Append the [`columns::MONTH`] (1–12) and [`columns::DAY_OF_WEEK`] (`"Monday"`…) columns,
/// both computed from [`columns::START_TIME`].
///
/// Rows without a start timestamp get `Null` in both derived columns.
pub fn derive_time_columns(dataset: &DataSet) -> ExplorerResult<DataSet> {
    let start_idx = dataset
        .schema
        .index_of(columns::START_TIME)
        .ok_or_else(|| ExplorerError::missing_column(columns::START_TIME))?;

    let fields = vec![
        Field::new(columns::MONTH, DataType::Int64),
        Field::new(columns::DAY_OF_WEEK, DataType::Utf8),
    ];

    Ok(dataset.with_derived_columns(fields, |row| {
        match row.get(start_idx).and_then(Value::as_timestamp) {
            Some(ts) => time_parts(ts),
            None => vec![Value::Null, Value::Null],
        }
    }))
}

fn time_parts(ts: &NaiveDateTime) -> Vec<Value> {
    vec![
        Value::Int64(i64::from(ts.month())),
        Value::Utf8(weekday_name(ts.weekday()).to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Schema;

    fn ts(s: &str) -> Value {
        Value::Timestamp(NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap())
    }

    #[test]
    fn derives_month_and_weekday_from_start_time() {
        let schema = Schema::new(vec![Field::new(columns::START_TIME, DataType::Timestamp)]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![ts("2017-06-23 15:09:32")],
                vec![ts("2017-01-01 00:07:57")],
                vec![Value::Null],
            ],
        );

        let out = derive_time_columns(&ds).unwrap();
        assert_eq!(out.schema.index_of(columns::MONTH), Some(1));
        assert_eq!(out.schema.index_of(columns::DAY_OF_WEEK), Some(2));
        assert_eq!(out.rows[0][1..], [Value::Int64(6), Value::Utf8("Friday".into())]);
        assert_eq!(out.rows[1][1..], [Value::Int64(1), Value::Utf8("Sunday".into())]);
        assert_eq!(out.rows[2][1..], [Value::Null, Value::Null]);
    }

    #[test]
    fn requires_start_time_column() {
        let ds = DataSet::new(Schema::new(vec![]), vec![]);
        assert!(matches!(
            derive_time_columns(&ds),
            Err(ExplorerError::MissingColumn { .. })
        ));
    }
}
