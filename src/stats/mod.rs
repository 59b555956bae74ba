//! Aggregators: pure functions computing one category of statistics over a trip table.
//!
//! Every aggregator takes `&DataSet`, never modifies it, and returns a small serializable
//! report. Running them in any order (or concurrently) gives the same results.
//!
//! "Most frequent" is always the highest count, with ties going to the value that appears
//! first in row order. An empty table is not an error: each report then carries `None`
//! values (or empty rankings) and renders them as `no data`.
//!
//! | Report                       | Function                   |
//! |------------------------------|----------------------------|
//! | Most frequent times of travel| [`time_stats`]             |
//! | Popular stations and trip    | [`station_stats`]          |
//! | Station rankings             | [`enhanced_station_stats`] |
//! | Total / mean travel time     | [`trip_duration_stats`]    |
//! | Trip length mean / variance  | [`trip_length_stats`]      |
//! | Rider demographics           | [`user_stats`]             |

pub mod duration;
pub mod station;
pub mod time;
pub mod user;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::processing::Counted;
use crate::types::DataSet;

pub use duration::{
    TripDurationStats, TripLengthStats, humanize_seconds, trip_duration_stats, trip_length_stats,
};
pub use station::{
    DEFAULT_TOP_N, StationRanking, StationStats, Trip, enhanced_station_stats, station_stats,
};
pub use time::{TimeStats, time_stats};
pub use user::{BirthYearStats, UserStats, user_stats};

pub(crate) const NO_DATA: &str = "no data";

/// Identifies one aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Time,
    Station,
    StationRanking,
    TripDuration,
    TripLength,
    User,
}

impl ReportKind {
    /// Every report, in display order.
    pub const ALL: [ReportKind; 6] = [
        ReportKind::Time,
        ReportKind::Station,
        ReportKind::StationRanking,
        ReportKind::TripDuration,
        ReportKind::TripLength,
        ReportKind::User,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ReportKind::Time => "time",
            ReportKind::Station => "station",
            ReportKind::StationRanking => "station-ranking",
            ReportKind::TripDuration => "trip-duration",
            ReportKind::TripLength => "trip-length",
            ReportKind::User => "user",
        }
    }

    /// Heading shown while the report is computed.
    pub fn title(self) -> &'static str {
        match self {
            ReportKind::Time => "The Most Frequent Times of Travel",
            ReportKind::Station => "The Most Popular Stations and Trip",
            ReportKind::StationRanking => "Station Rankings",
            ReportKind::TripDuration => "Trip Duration",
            ReportKind::TripLength => "Trip Length Stats",
            ReportKind::User => "User Stats",
        }
    }

    /// Run this aggregator over `dataset`.
    pub fn run(self, dataset: &DataSet) -> Report {
        match self {
            ReportKind::Time => Report::Time(time_stats(dataset)),
            ReportKind::Station => Report::Station(station_stats(dataset)),
            ReportKind::StationRanking => {
                Report::StationRanking(enhanced_station_stats(dataset, DEFAULT_TOP_N))
            }
            ReportKind::TripDuration => Report::TripDuration(trip_duration_stats(dataset)),
            ReportKind::TripLength => Report::TripLength(trip_length_stats(dataset)),
            ReportKind::User => Report::User(user_stats(dataset)),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        ReportKind::ALL
            .into_iter()
            .find(|k| k.key() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = ReportKind::ALL.iter().map(|k| k.key()).collect();
                format!("unknown report '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

/// Output of one aggregator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "report", rename_all = "snake_case")]
pub enum Report {
    Time(TimeStats),
    Station(StationStats),
    StationRanking(StationRanking),
    TripDuration(TripDurationStats),
    TripLength(TripLengthStats),
    User(UserStats),
}

impl Report {
    pub fn kind(&self) -> ReportKind {
        match self {
            Report::Time(_) => ReportKind::Time,
            Report::Station(_) => ReportKind::Station,
            Report::StationRanking(_) => ReportKind::StationRanking,
            Report::TripDuration(_) => ReportKind::TripDuration,
            Report::TripLength(_) => ReportKind::TripLength,
            Report::User(_) => ReportKind::User,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Time(r) => fmt::Display::fmt(r, f),
            Report::Station(r) => fmt::Display::fmt(r, f),
            Report::StationRanking(r) => fmt::Display::fmt(r, f),
            Report::TripDuration(r) => fmt::Display::fmt(r, f),
            Report::TripLength(r) => fmt::Display::fmt(r, f),
            Report::User(r) => fmt::Display::fmt(r, f),
        }
    }
}

pub(crate) fn write_mode<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    mode: Option<&Counted<T>>,
) -> fmt::Result {
    match mode {
        Some(m) => writeln!(f, "{label}: {} (count: {})", m.value, m.count),
        None => writeln!(f, "{label}: {NO_DATA}"),
    }
}
