//! Trip file ingestion.
//!
//! [`ingest_trips_from_path`] reads one city's CSV file with [`trip_schema`] and reports the
//! outcome to an optional [`IngestionObserver`].

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::warn;

use crate::columns;
use crate::error::IngestionResult;
use crate::registry::City;
use crate::types::{DataSet, DataType, Field, Schema};

use super::csv;
use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};

/// Schema shared by the three trip files.
///
/// `Gender` and `Birth Year` are optional: the Washington file does not have them.
pub fn trip_schema() -> Schema {
    Schema::new(vec![
        Field::new(columns::START_TIME, DataType::Timestamp),
        Field::new(columns::END_TIME, DataType::Timestamp),
        Field::new(columns::TRIP_DURATION, DataType::Float64),
        Field::new(columns::START_STATION, DataType::Utf8),
        Field::new(columns::END_STATION, DataType::Utf8),
        Field::new(columns::USER_TYPE, DataType::Utf8),
        Field::optional(columns::GENDER, DataType::Utf8),
        Field::optional(columns::BIRTH_YEAR, DataType::Int64),
    ])
}

/// Options controlling trip ingestion.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Read the trip file at `path` for `city` into an unfiltered [`DataSet`].
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row count stats
/// - `on_failure` on failure, with a computed severity (I/O failures are `Critical`)
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
pub fn ingest_trips_from_path(
    city: City,
    path: impl AsRef<Path>,
    options: &IngestionOptions,
) -> IngestionResult<DataSet> {
    let path = path.as_ref();
    let result = csv::ingest_csv_from_path(path, &trip_schema());

    if let Ok(ds) = &result {
        let found = has_demographic_columns(ds);
        if found != city.has_demographics() {
            warn!(
                %city,
                path = %path.display(),
                found,
                "demographic columns differ from the usual layout for this city"
            );
        }
    }

    if let Some(obs) = options.observer.as_ref() {
        let ctx = IngestionContext {
            city,
            path: path.to_path_buf(),
        };
        match &result {
            Ok(ds) => obs.on_success(
                &ctx,
                IngestionStats {
                    rows: ds.row_count(),
                    has_demographics: has_demographic_columns(ds),
                },
            ),
            Err(e) => {
                let sev = IngestionSeverity::for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn has_demographic_columns(ds: &DataSet) -> bool {
    ds.schema.contains(columns::GENDER) || ds.schema.contains(columns::BIRTH_YEAR)
}
