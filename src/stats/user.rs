use std::fmt;

use serde::Serialize;

use crate::columns;
use crate::processing::{Counted, FrequencyTable, ReduceOp, mode_of, reduce};
use crate::types::{DataSet, Value};

use super::{NO_DATA, write_mode};

/// Rider demographics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    /// Counts per user type, most frequent first. Null user types are skipped.
    pub user_types: Vec<Counted<String>>,
    /// `None` when the dataset has no `Gender` column.
    pub genders: Option<Vec<Counted<String>>>,
    /// `None` when the dataset has no `Birth Year` column.
    pub birth_years: Option<BirthYearStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: Option<i64>,
    pub most_recent: Option<i64>,
    pub most_common: Option<Counted<i64>>,
}

/// User type counts, plus gender counts and birth-year extremes/mode when the columns exist.
///
/// The optional columns are checked once against the schema, not per row.
pub fn user_stats(dataset: &DataSet) -> UserStats {
    UserStats {
        user_types: value_counts(dataset, columns::USER_TYPE).unwrap_or_default(),
        genders: value_counts(dataset, columns::GENDER),
        birth_years: birth_year_stats(dataset),
    }
}

fn value_counts(dataset: &DataSet, column: &str) -> Option<Vec<Counted<String>>> {
    let table: FrequencyTable<&str> = dataset.column(column)?.filter_map(Value::as_str).collect();
    Some(
        table
            .ranked()
            .into_iter()
            .map(|c| Counted {
                value: (*c.value).to_string(),
                count: c.count,
            })
            .collect(),
    )
}

fn birth_year_stats(dataset: &DataSet) -> Option<BirthYearStats> {
    let years = dataset.column(columns::BIRTH_YEAR)?;
    let int = |op| reduce(dataset, columns::BIRTH_YEAR, op).and_then(|v| v.as_i64());
    Some(BirthYearStats {
        earliest: int(ReduceOp::Min),
        most_recent: int(ReduceOp::Max),
        most_common: mode_of(years.filter_map(Value::as_i64)),
    })
}

impl fmt::Display for UserStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "User Types:")?;
        write_counts(f, &self.user_types)?;

        if let Some(genders) = &self.genders {
            writeln!(f, "\nGender Counts:")?;
            write_counts(f, genders)?;
        }

        if let Some(years) = &self.birth_years {
            writeln!(f, "\nBirth Year Stats:")?;
            write_year(f, "Earliest Year", years.earliest)?;
            write_year(f, "Most Recent Year", years.most_recent)?;
            write_mode(f, "Most Common Year", years.most_common.as_ref())?;
        }
        Ok(())
    }
}

fn write_counts(f: &mut fmt::Formatter<'_>, counts: &[Counted<String>]) -> fmt::Result {
    if counts.is_empty() {
        return writeln!(f, "  {NO_DATA}");
    }
    let width = counts.iter().map(|c| c.value.len()).max().unwrap_or(0);
    for c in counts {
        writeln!(f, "  {:<width$}  {}", c.value, c.count)?;
    }
    Ok(())
}

fn write_year(f: &mut fmt::Formatter<'_>, label: &str, year: Option<i64>) -> fmt::Result {
    match year {
        Some(y) => writeln!(f, "{label}: {y}"),
        None => writeln!(f, "{label}: {NO_DATA}"),
    }
}
