//! In-memory data transformations.
//!
//! The processing layer operates on [`crate::types::DataSet`] values produced by ingestion.
//!
//! - [`derive_time_columns`]: append `month` / `day_of_week` computed from `Start Time`
//! - [`filter()`], [`filter_by_month`], [`filter_by_day`], [`filter_by_time`]: row selection
//! - [`FrequencyTable`]: value counts and mode with a first-seen tie-break
//! - [`reduce()`]: count/sum/min/max/mean/variance over one column
//!
//! ## Example: derive → filter → reduce
//!
//! ```rust
//! use bikeshare_explorer::columns;
//! use bikeshare_explorer::processing::{ReduceOp, derive_time_columns, filter_by_time, reduce};
//! use bikeshare_explorer::registry::{DayFilter, MonthFilter};
//! use bikeshare_explorer::types::{DataSet, DataType, Field, Schema, Value};
//! use chrono::NaiveDate;
//!
//! let schema = Schema::new(vec![
//!     Field::new(columns::START_TIME, DataType::Timestamp),
//!     Field::new(columns::TRIP_DURATION, DataType::Float64),
//! ]);
//! let at = |d: u32| NaiveDate::from_ymd_opt(2017, 6, d).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Timestamp(at(2)), Value::Float64(300.0)],  // Friday
//!         vec![Value::Timestamp(at(3)), Value::Float64(900.0)],  // Saturday
//!         vec![Value::Timestamp(at(9)), Value::Float64(600.0)],  // Friday
//!     ],
//! );
//!
//! let derived = derive_time_columns(&ds).unwrap();
//! let friday = DayFilter::from_name("friday").unwrap();
//! let fridays = filter_by_time(&derived, MonthFilter::All, friday).unwrap();
//! assert_eq!(fridays.row_count(), 2);
//!
//! let total = reduce(&fridays, columns::TRIP_DURATION, ReduceOp::Sum).unwrap();
//! assert_eq!(total, Value::Float64(900.0));
//! ```

pub mod derive;
pub mod filter;
pub mod frequency;
pub mod reduce;

pub use derive::derive_time_columns;
pub use filter::{filter, filter_by_day, filter_by_month, filter_by_time};
pub use frequency::{Counted, FrequencyTable, mode_of};
pub use reduce::{ReduceOp, reduce};
