//! CSV ingestion implementation.

use std::path::Path;

use chrono::NaiveDateTime;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Cell contents read as missing values, the same set pandas writes and reads by default.
const MISSING_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Ingest a CSV file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - CSV must have headers.
/// - Headers must contain all required schema fields (order can differ). Extra columns are
///   ignored.
/// - Optional fields missing from the headers are left out of the resulting schema.
/// - Each value is parsed according to the schema field type.
pub fn ingest_csv_from_path(path: impl AsRef<Path>, schema: &Schema) -> IngestionResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr, schema)
}

/// Ingest CSV data from an existing CSV reader.
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    schema: &Schema,
) -> IngestionResult<DataSet> {
    let headers = rdr.headers()?.clone();

    // Map schema fields -> CSV column indexes (allows re-ordered CSV columns).
    let mut present: Vec<(&Field, usize)> = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        match headers.iter().position(|h| h.trim() == field.name) {
            Some(idx) => present.push((field, idx)),
            None if !field.required => {}
            None => {
                return Err(IngestionError::SchemaMismatch {
                    message: format!(
                        "missing required column '{field}'. headers={:?}",
                        headers.iter().collect::<Vec<_>>(),
                        field = field.name
                    ),
                });
            }
        }
    }

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        let mut row: Vec<Value> = Vec::with_capacity(present.len());
        for (field, csv_idx) in &present {
            let raw = record.get(*csv_idx).unwrap_or("");
            row.push(parse_typed_value(user_row, &field.name, field.data_type, raw)?);
        }
        rows.push(row);
    }

    let fields = present.into_iter().map(|(field, _)| field.clone()).collect();
    Ok(DataSet::new(Schema::new(fields), rows))
}

fn parse_typed_value(
    row: usize,
    column: &str,
    data_type: DataType,
    raw: &str,
) -> IngestionResult<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || MISSING_TOKENS.contains(&trimmed) {
        return Ok(Value::Null);
    }

    let parse_err = |message: String| IngestionError::ParseError {
        row,
        column: column.to_owned(),
        raw: raw.to_owned(),
        message,
    };

    match data_type {
        DataType::Utf8 => Ok(Value::Utf8(trimmed.to_owned())),
        DataType::Int64 => parse_int(trimmed).map(Value::Int64).map_err(parse_err),
        DataType::Float64 => trimmed
            .parse::<f64>()
            .map(|v| if v.is_nan() { Value::Null } else { Value::Float64(v) })
            .map_err(|e| parse_err(e.to_string())),
        DataType::Timestamp => parse_timestamp(trimmed)
            .map(Value::Timestamp)
            .map_err(parse_err),
    }
}

/// Integers, plus integral floats such as `1992.0` (pandas writes nullable int columns that way).
fn parse_int(s: &str) -> Result<i64, String> {
    if let Ok(v) = s.parse::<i64>() {
        return Ok(v);
    }
    match s.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
        Ok(_) => Err("expected integer, found fractional number".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime, String> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| "expected timestamp 'YYYY-MM-DD HH:MM:SS'".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::{ReduceOp, reduce};
    use chrono::{Datelike, Timelike};

    fn reader(input: &str) -> csv::Reader<&[u8]> {
        csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(input.as_bytes())
    }

    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("Start Time", DataType::Timestamp),
            Field::new("Trip Duration", DataType::Float64),
            Field::optional("Birth Year", DataType::Int64),
        ])
    }

    #[test]
    fn ignores_index_column_and_parses_types() {
        let input = ",Start Time,Trip Duration,Birth Year\n0,2017-06-23 15:09:32,321,1992.0\n";
        let ds = ingest_csv_from_reader(&mut reader(input), &schema()).unwrap();

        assert_eq!(ds.row_count(), 1);
        let ts = ds.rows[0][0].as_timestamp().unwrap();
        assert_eq!((ts.month(), ts.day(), ts.hour()), (6, 23, 15));
        assert_eq!(ds.rows[0][1], Value::Float64(321.0));
        assert_eq!(ds.rows[0][2], Value::Int64(1992));
    }

    #[test]
    fn optional_column_is_dropped_when_absent() {
        let input = "Start Time,Trip Duration\n2017-01-01 00:07:57,1103.5\n";
        let ds = ingest_csv_from_reader(&mut reader(input), &schema()).unwrap();
        assert_eq!(
            ds.schema.field_names().collect::<Vec<_>>(),
            vec!["Start Time", "Trip Duration"]
        );
        assert!(!ds.schema.contains("Birth Year"));
    }

    #[test]
    fn empty_cells_become_null() {
        let input = "Start Time,Trip Duration,Birth Year\n2017-01-01 00:07:57,,\n";
        let ds = ingest_csv_from_reader(&mut reader(input), &schema()).unwrap();
        assert_eq!(ds.rows[0][1], Value::Null);
        assert_eq!(ds.rows[0][2], Value::Null);
    }

    #[test]
    fn missing_value_tokens_become_null() {
        let input = "Start Time,Trip Duration,Birth Year\n\
                     2017-01-01 00:07:57,NaN,1990.0\n\
                     2017-01-01 00:08:00,100,NaN\n\
                     2017-01-01 00:09:00,NA,n/a\n\
                     ,nan,NULL\n";
        let ds = ingest_csv_from_reader(&mut reader(input), &schema()).unwrap();
        assert_eq!(ds.rows[0][1], Value::Null);
        assert_eq!(ds.rows[0][2], Value::Int64(1990));
        assert_eq!(ds.rows[1][1], Value::Float64(100.0));
        assert_eq!(ds.rows[1][2], Value::Null);
        assert_eq!(ds.rows[2][1], Value::Null);
        assert_eq!(ds.rows[2][2], Value::Null);
        assert!(ds.rows[3].iter().all(Value::is_null));
    }

    #[test]
    fn nan_durations_are_skipped_by_sum_and_mean() {
        let input = "Start Time,Trip Duration\n\
                     2017-01-01 00:07:57,NaN\n\
                     2017-01-01 00:08:00,100\n\
                     2017-01-01 00:09:00,NAN\n";
        let ds = ingest_csv_from_reader(&mut reader(input), &schema()).unwrap();
        assert_eq!(ds.rows[2][1], Value::Null);

        let sum = reduce(&ds, "Trip Duration", ReduceOp::Sum);
        let mean = reduce(&ds, "Trip Duration", ReduceOp::Mean);
        assert_eq!(sum, Some(Value::Float64(100.0)));
        assert_eq!(mean, Some(Value::Float64(100.0)));
    }

    #[test]
    fn missing_required_column_is_schema_mismatch() {
        let input = "Trip Duration\n12\n";
        let err = ingest_csv_from_reader(&mut reader(input), &schema()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("schema mismatch"));
        assert!(msg.contains("missing required column 'Start Time'"));
    }

    #[test]
    fn bad_timestamp_reports_row_and_column() {
        let input = "Start Time,Trip Duration\nyesterday,12\n";
        let err = ingest_csv_from_reader(&mut reader(input), &schema()).unwrap_err();
        match err {
            IngestionError::ParseError { row, column, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, "Start Time");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn fractional_birth_year_is_rejected() {
        assert_eq!(parse_int("1985"), Ok(1985));
        assert_eq!(parse_int("1985.0"), Ok(1985));
        assert!(parse_int("1985.5").is_err());
        assert!(parse_int("abc").is_err());
    }

    #[test]
    fn timestamps_accept_t_separator_and_fractions() {
        assert!(parse_timestamp("2017-03-01T08:00:00").is_ok());
        assert!(parse_timestamp("2017-03-01 08:00:00.250").is_ok());
        assert!(parse_timestamp("03/01/2017 08:00").is_err());
    }
}
