use std::fmt;

use serde::Serialize;

use crate::columns;
use crate::processing::{ReduceOp, reduce};
use crate::types::DataSet;

use super::NO_DATA;

/// Total and mean travel time, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripDurationStats {
    pub trips: usize,
    pub total_seconds: Option<f64>,
    pub mean_seconds: Option<f64>,
}

/// Mean and population variance of trip length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripLengthStats {
    pub mean_seconds: Option<f64>,
    /// Population variance (divides by the number of trips), in seconds².
    pub variance_seconds2: Option<f64>,
}

/// Sum and mean of `Trip Duration`. Null durations are ignored; `None` means no data.
pub fn trip_duration_stats(dataset: &DataSet) -> TripDurationStats {
    TripDurationStats {
        trips: dataset.row_count(),
        total_seconds: duration_reduction(dataset, ReduceOp::Sum),
        mean_seconds: duration_reduction(dataset, ReduceOp::Mean),
    }
}

/// Mean and population variance of `Trip Duration`.
pub fn trip_length_stats(dataset: &DataSet) -> TripLengthStats {
    TripLengthStats {
        mean_seconds: duration_reduction(dataset, ReduceOp::Mean),
        variance_seconds2: duration_reduction(dataset, ReduceOp::Variance),
    }
}

fn duration_reduction(dataset: &DataSet, op: ReduceOp) -> Option<f64> {
    reduce(dataset, columns::TRIP_DURATION, op)
        .filter(|v| !v.is_null())
        .and_then(|v| v.as_f64())
}

/// `93784.0` → `"1 day, 02:03:04"`.
pub fn humanize_seconds(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    let (days, rem) = (total / 86_400, total % 86_400);
    let clock = format!("{:02}:{:02}:{:02}", rem / 3_600, rem % 3_600 / 60, rem % 60);
    match days {
        0 => clock,
        1 => format!("1 day, {clock}"),
        n => format!("{n} days, {clock}"),
    }
}

impl fmt::Display for TripDurationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.total_seconds {
            Some(total) => writeln!(
                f,
                "Total Travel Time: {total:.2} seconds ({})",
                humanize_seconds(total)
            )?,
            None => writeln!(f, "Total Travel Time: {NO_DATA}")?,
        }
        match self.mean_seconds {
            Some(mean) => writeln!(
                f,
                "Mean Travel Time: {mean:.2} seconds ({})",
                humanize_seconds(mean)
            ),
            None => writeln!(f, "Mean Travel Time: {NO_DATA}"),
        }
    }
}

impl fmt::Display for TripLengthStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mean_seconds {
            Some(mean) => writeln!(f, "Average Trip Length: {mean:.2} seconds")?,
            None => writeln!(f, "Average Trip Length: {NO_DATA}")?,
        }
        match self.variance_seconds2 {
            Some(var) => writeln!(f, "Trip Length Variance: {var:.2} seconds^2"),
            None => writeln!(f, "Trip Length Variance: {NO_DATA}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, Field, Schema, Value};

    fn durations(values: &[Option<f64>]) -> DataSet {
        let schema = Schema::new(vec![Field::new(columns::TRIP_DURATION, DataType::Float64)]);
        let rows = values
            .iter()
            .map(|v| vec![v.map(Value::Float64).unwrap_or(Value::Null)])
            .collect();
        DataSet::new(schema, rows)
    }

    #[test]
    fn total_and_mean() {
        let ds = durations(&[Some(100.0), Some(200.0), None, Some(600.0)]);
        let stats = trip_duration_stats(&ds);
        assert_eq!(stats.trips, 4);
        assert_eq!(stats.total_seconds, Some(900.0));
        assert_eq!(stats.mean_seconds, Some(300.0));
    }

    #[test]
    fn population_variance() {
        let ds = durations(&[Some(100.0), Some(300.0)]);
        let stats = trip_length_stats(&ds);
        assert_eq!(stats.mean_seconds, Some(200.0));
        assert_eq!(stats.variance_seconds2, Some(10_000.0));
    }

    #[test]
    fn empty_table_reports_no_data() {
        let ds = durations(&[]);
        let stats = trip_duration_stats(&ds);
        assert_eq!(stats.total_seconds, None);
        assert_eq!(stats.mean_seconds, None);
        assert_eq!(stats.to_string(), "Total Travel Time: no data\nMean Travel Time: no data\n");

        let length = trip_length_stats(&ds);
        assert_eq!(length.variance_seconds2, None);
        assert!(length.to_string().contains("Trip Length Variance: no data"));
    }

    #[test]
    fn missing_duration_column_is_no_data() {
        let ds = DataSet::new(Schema::new(vec![]), vec![vec![]]);
        assert_eq!(trip_duration_stats(&ds).total_seconds, None);
    }

    #[test]
    fn humanizes_seconds() {
        assert_eq!(humanize_seconds(59.6), "00:01:00");
        assert_eq!(humanize_seconds(3_725.0), "01:02:05");
        assert_eq!(humanize_seconds(93_784.0), "1 day, 02:03:04");
        assert_eq!(humanize_seconds(3.0 * 86_400.0), "3 days, 00:00:00");
    }
}
