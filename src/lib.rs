//! `bikeshare-explorer` loads US bikeshare trip data (Chicago, New York City, Washington) into an
//! in-memory [`types::DataSet`], narrows it by month and weekday, and computes descriptive
//! statistics about travel times, stations, trip durations and riders.
//!
//! The usual pipeline is:
//!
//! 1. [`registry::FilterSelection::parse`] validates the user's city / month / day choice
//! 2. [`loader::load`] reads the city's CSV file, appends the derived `month` and
//!    `day_of_week` columns and keeps only the matching rows
//! 3. [`execution::ExecutionEngine::run`] runs the [`stats`] aggregators over the result
//!
//! ## Files
//!
//! Each city has one CSV file in a data directory (see [`registry::CITY_DATA`]). Every file has
//! `Start Time`, `End Time`, `Trip Duration`, `Start Station`, `End Station` and `User Type`;
//! Chicago and New York City also carry `Gender` and `Birth Year`. Empty cells become
//! [`types::Value::Null`].
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use bikeshare_explorer::execution::ExecutionEngine;
//! use bikeshare_explorer::ingestion::IngestionOptions;
//! use bikeshare_explorer::loader::load;
//! use bikeshare_explorer::registry::FilterSelection;
//! use bikeshare_explorer::stats::ReportKind;
//!
//! # fn main() -> Result<(), bikeshare_explorer::ExplorerError> {
//! let selection = FilterSelection::parse("chicago", "june", "friday")?;
//! let trips = load(Path::new("data"), &selection, &IngestionOptions::default())?;
//!
//! for timed in ExecutionEngine::sequential().run(&trips, &ReportKind::ALL) {
//!     println!("{}", timed.report);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`registry`]: supported cities, month and day names, filter selection
//! - [`ingestion`]: CSV reading into a typed [`types::DataSet`], with observer hooks
//! - [`processing`]: derived time columns, filtering, frequency tables, reductions
//! - [`loader`]: file lookup plus filtering in one call
//! - [`stats`]: the six report aggregators
//! - [`execution`]: runs reports (optionally in parallel) and times them
//! - [`interactive`]: prompts and the raw data pager used by the `explore` command
//! - [`config`]: session configuration
//! - [`error`]: error types

pub mod columns;
pub mod config;
pub mod error;
pub mod execution;
pub mod ingestion;
pub mod interactive;
pub mod loader;
pub mod processing;
pub mod registry;
pub mod stats;
pub mod types;

pub use error::{ExplorerError, ExplorerResult, IngestionError, IngestionResult};
