use std::fmt;

use chrono::{Datelike, Timelike};
use serde::Serialize;

use crate::columns;
use crate::processing::{Counted, mode_of};
use crate::registry::{month_name, weekday_name};
use crate::types::{DataSet, Value};

use super::{NO_DATA, write_mode};

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStats {
    pub trips: usize,
    /// Calendar month number (1–12).
    pub most_common_month: Option<Counted<u32>>,
    pub most_common_day: Option<Counted<String>>,
    /// Hour of day (0–23) of `Start Time`.
    pub most_common_start_hour: Option<Counted<u32>>,
}

/// Most frequent month, weekday and start hour. Ties go to the value seen first.
///
/// Uses the derived `month` / `day_of_week` columns when present and falls back to computing
/// them from `Start Time` otherwise.
pub fn time_stats(dataset: &DataSet) -> TimeStats {
    let most_common_month = match dataset.column(columns::MONTH) {
        Some(col) => mode_of(
            col.filter_map(Value::as_i64)
                .filter_map(|m| u32::try_from(m).ok()),
        ),
        None => mode_of(start_times(dataset).map(|ts| ts.month())),
    };

    let most_common_day = match dataset.column(columns::DAY_OF_WEEK) {
        Some(col) => mode_of(col.filter_map(Value::as_str)).map(owned),
        None => mode_of(start_times(dataset).map(|ts| weekday_name(ts.weekday()))).map(owned),
    };

    let most_common_start_hour = mode_of(start_times(dataset).map(|ts| ts.hour()));

    TimeStats {
        trips: dataset.row_count(),
        most_common_month,
        most_common_day,
        most_common_start_hour,
    }
}

fn start_times(dataset: &DataSet) -> impl Iterator<Item = &chrono::NaiveDateTime> {
    dataset
        .column(columns::START_TIME)
        .into_iter()
        .flatten()
        .filter_map(Value::as_timestamp)
}

fn owned(c: Counted<&str>) -> Counted<String> {
    Counted {
        value: c.value.to_string(),
        count: c.count,
    }
}

impl fmt::Display for TimeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Most Common Month: ")?;
        match &self.most_common_month {
            Some(m) => writeln!(
                f,
                "{} (count: {})",
                month_name(m.value).unwrap_or("unknown"),
                m.count
            )?,
            None => writeln!(f, "{NO_DATA}")?,
        }
        write_mode(f, "Most Common Day of Week", self.most_common_day.as_ref())?;
        write_mode(f, "Most Common Start Hour", self.most_common_start_hour.as_ref())
    }
}
