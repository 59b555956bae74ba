use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Convenience result type for the load/filter/report pipeline.
pub type ExplorerResult<T> = Result<T, ExplorerError>;

/// Error type returned by ingestion functions.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV ingestion error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The input does not conform to the provided schema (missing required columns, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },
}

impl IngestionError {
    /// Returns `true` when the failure comes from the underlying file system rather than the
    /// file's contents.
    pub fn is_io(&self) -> bool {
        match self {
            IngestionError::Io(_) => true,
            IngestionError::Csv(err) => matches!(err.kind(), csv::ErrorKind::Io(_)),
            IngestionError::SchemaMismatch { .. } | IngestionError::ParseError { .. } => false,
        }
    }
}

/// Which part of a filter selection was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDimension {
    City,
    Month,
    Day,
}

impl std::fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FilterDimension::City => "city",
            FilterDimension::Month => "month",
            FilterDimension::Day => "day",
        };
        f.write_str(name)
    }
}

/// Error type returned by the loader, the processing steps and the execution engine.
///
/// A filter that matches zero rows is not an error: aggregators report "no data" instead.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// A city, month or day outside the fixed enumerations.
    #[error("invalid {dimension} filter '{value}'")]
    InvalidFilter {
        dimension: FilterDimension,
        value: String,
    },

    /// The dataset backing a city could not be read or is corrupt.
    #[error("dataset unavailable at {}: {source}", path.display())]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: IngestionError,
    },

    /// A processing step needs a column the table does not have.
    #[error("missing column '{column}'")]
    MissingColumn { column: String },

    /// The worker pool used to run reports could not be created.
    #[error("failed to build report thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl ExplorerError {
    pub(crate) fn invalid(dimension: FilterDimension, value: impl Into<String>) -> Self {
        ExplorerError::InvalidFilter {
            dimension,
            value: value.into(),
        }
    }

    pub(crate) fn missing_column(column: &str) -> Self {
        ExplorerError::MissingColumn {
            column: column.to_owned(),
        }
    }
}
