//! Load a city's trips and apply the month/day selection.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{ExplorerError, ExplorerResult};
use crate::ingestion::{IngestionOptions, ingest_trips_from_path};
use crate::processing::{derive_time_columns, filter_by_time};
use crate::registry::{City, FilterSelection};
use crate::types::DataSet;

/// Read the full dataset for `city` from `data_dir` and add the derived time columns.
///
/// Any failure to read or parse the file is reported as [`ExplorerError::DataUnavailable`].
pub fn load_city(
    data_dir: &Path,
    city: City,
    options: &IngestionOptions,
) -> ExplorerResult<DataSet> {
    let path = city.source_path(data_dir);
    debug!(%city, path = %path.display(), "reading trip dataset");

    let raw = ingest_trips_from_path(city, &path, options)
        .map_err(|source| ExplorerError::DataUnavailable { path, source })?;
    derive_time_columns(&raw)
}

/// Produce the Filtered Table for `selection`.
///
/// Rows are kept when their derived month equals the selected month (if any) and their
/// derived weekday equals the selected day (if any). Rows are never modified.
pub fn load(
    data_dir: &Path,
    selection: &FilterSelection,
    options: &IngestionOptions,
) -> ExplorerResult<DataSet> {
    let full = load_city(data_dir, selection.city, options)?;
    let filtered = filter_by_time(&full, selection.month, selection.day)?;
    info!(
        %selection,
        total_rows = full.row_count(),
        matching_rows = filtered.row_count(),
        "filters applied"
    );
    Ok(filtered)
}

/// [`load`] for raw user input; names outside the fixed sets fail with
/// [`ExplorerError::InvalidFilter`] before any file is touched.
pub fn load_by_names(
    data_dir: &Path,
    city: &str,
    month: &str,
    day: &str,
    options: &IngestionOptions,
) -> ExplorerResult<DataSet> {
    let selection = FilterSelection::parse(city, month, day)?;
    load(data_dir, &selection, options)
}
