//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`ingest_trips_from_path`] (from [`trips`]) which:
//!
//! - reads a city's trip file into an in-memory [`crate::types::DataSet`] using [`trip_schema`]
//! - keeps the optional demographic columns only when the file has them
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]
//!
//! The generic CSV reader lives in [`csv`].

pub mod csv;
pub mod observability;
pub mod trips;

pub use observability::{
    IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats, TracingObserver,
};
pub use trips::{IngestionOptions, ingest_trips_from_path, trip_schema};
