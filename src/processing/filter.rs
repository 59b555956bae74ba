//! Row filtering for [`crate::types::DataSet`].
//!
//! The month and day filters are independent equality predicates on the two derived columns,
//! so applying them in either order gives the same table.

use crate::columns;
use crate::error::{ExplorerError, ExplorerResult};
use crate::registry::{DayFilter, MonthFilter};
use crate::types::{DataSet, Value};

/// Returns a new [`DataSet`] containing only rows for which `predicate` returns `true`.
///
/// This is a convenience wrapper around [`DataSet::filter_rows`].
pub fn filter<F>(dataset: &DataSet, predicate: F) -> DataSet
where
    F: FnMut(&[Value]) -> bool,
{
    dataset.filter_rows(predicate)
}

/// Keep rows whose derived `month` equals the filter's month number.
///
/// Requires the derived [`columns::MONTH`] column. `MonthFilter::All` returns an unchanged copy.
pub fn filter_by_month(dataset: &DataSet, month: MonthFilter) -> ExplorerResult<DataSet> {
    let idx = dataset
        .schema
        .index_of(columns::MONTH)
        .ok_or_else(|| ExplorerError::missing_column(columns::MONTH))?;
    if month == MonthFilter::All {
        return Ok(dataset.clone());
    }
    Ok(filter(dataset, |row| {
        matches!(row.get(idx), Some(Value::Int64(m)) if month.matches(*m))
    }))
}

/// Keep rows whose derived `day_of_week` equals the filter's weekday (case-insensitive).
///
/// Requires the derived [`columns::DAY_OF_WEEK`] column. `DayFilter::All` returns an unchanged
/// copy.
pub fn filter_by_day(dataset: &DataSet, day: DayFilter) -> ExplorerResult<DataSet> {
    let idx = dataset
        .schema
        .index_of(columns::DAY_OF_WEEK)
        .ok_or_else(|| ExplorerError::missing_column(columns::DAY_OF_WEEK))?;
    if day == DayFilter::All {
        return Ok(dataset.clone());
    }
    Ok(filter(dataset, |row| {
        matches!(row.get(idx), Some(Value::Utf8(name)) if day.matches(name))
    }))
}

/// Apply both time filters in one pass.
pub fn filter_by_time(
    dataset: &DataSet,
    month: MonthFilter,
    day: DayFilter,
) -> ExplorerResult<DataSet> {
    let month_idx = dataset
        .schema
        .index_of(columns::MONTH)
        .ok_or_else(|| ExplorerError::missing_column(columns::MONTH))?;
    let day_idx = dataset
        .schema
        .index_of(columns::DAY_OF_WEEK)
        .ok_or_else(|| ExplorerError::missing_column(columns::DAY_OF_WEEK))?;

    if month == MonthFilter::All && day == DayFilter::All {
        return Ok(dataset.clone());
    }

    Ok(filter(dataset, |row| {
        let month_ok = month == MonthFilter::All
            || matches!(row.get(month_idx), Some(Value::Int64(m)) if month.matches(*m));
        let day_ok = day == DayFilter::All
            || matches!(row.get(day_idx), Some(Value::Utf8(name)) if day.matches(name));
        month_ok && day_ok
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, Field, Schema};
    use chrono::{Month, Weekday};

    fn sample_dataset() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new(columns::MONTH, DataType::Int64),
            Field::new(columns::DAY_OF_WEEK, DataType::Utf8),
        ]);

        let rows = vec![
            vec![Value::Int64(1), Value::Int64(6), Value::Utf8("Friday".to_string())],
            vec![Value::Int64(2), Value::Int64(6), Value::Utf8("Monday".to_string())],
            vec![Value::Int64(3), Value::Int64(1), Value::Utf8("Friday".to_string())],
            vec![Value::Int64(4), Value::Null, Value::Null],
        ];

        DataSet::new(schema, rows)
    }

    fn ids(ds: &DataSet) -> Vec<i64> {
        ds.column("id").unwrap().filter_map(Value::as_i64).collect()
    }

    #[test]
    fn filter_rows_by_numeric_predicate() {
        let ds = sample_dataset();
        let out = filter(&ds, |row| matches!(row.first(), Some(Value::Int64(v)) if *v > 2));
        assert_eq!(out.schema, ds.schema);
        assert_eq!(ids(&out), vec![3, 4]);
        // Input unchanged
        assert_eq!(ds.row_count(), 4);
    }

    #[test]
    fn month_filter_keeps_matching_month_only() {
        let ds = sample_dataset();
        let out = filter_by_month(&ds, MonthFilter::Only(Month::June)).unwrap();
        assert_eq!(ids(&out), vec![1, 2]);
    }

    #[test]
    fn day_filter_keeps_matching_weekday_only() {
        let ds = sample_dataset();
        let out = filter_by_day(&ds, DayFilter::Only(Weekday::Fri)).unwrap();
        assert_eq!(ids(&out), vec![1, 3]);
    }

    #[test]
    fn wildcards_are_identity_even_for_null_rows() {
        let ds = sample_dataset();
        let out = filter_by_time(&ds, MonthFilter::All, DayFilter::All).unwrap();
        assert_eq!(out, ds);
    }

    #[test]
    fn combined_filter_equals_sequential_filters() {
        let ds = sample_dataset();
        let month = MonthFilter::Only(Month::June);
        let day = DayFilter::Only(Weekday::Fri);

        let both = filter_by_time(&ds, month, day).unwrap();
        let month_then_day = filter_by_day(&filter_by_month(&ds, month).unwrap(), day).unwrap();
        let day_then_month = filter_by_month(&filter_by_day(&ds, day).unwrap(), month).unwrap();

        assert_eq!(ids(&both), vec![1]);
        assert_eq!(both, month_then_day);
        assert_eq!(both, day_then_month);
    }

    #[test]
    fn no_match_yields_empty_dataset() {
        let ds = sample_dataset();
        let out = filter_by_time(&ds, MonthFilter::Only(Month::March), DayFilter::All).unwrap();
        assert_eq!(out.schema, ds.schema);
        assert!(out.is_empty());
    }

    #[test]
    fn filters_require_derived_columns() {
        let schema = Schema::new(vec![Field::new("id", DataType::Int64)]);
        let ds = DataSet::new(schema, vec![vec![Value::Int64(1)]]);
        let err = filter_by_month(&ds, MonthFilter::All).unwrap_err();
        assert_eq!(err.to_string(), "missing column 'month'");
        assert!(filter_by_day(&ds, DayFilter::All).is_err());
    }
}
