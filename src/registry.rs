//! Fixed cities, months and weekdays understood by the explorer.
//!
//! Everything here is constant data. Parsing is case-insensitive and ignores surrounding
//! whitespace; anything outside the fixed sets is rejected with
//! [`ExplorerError::InvalidFilter`].

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{Month, Weekday};
use serde::Serialize;

use crate::error::{ExplorerError, ExplorerResult, FilterDimension};

/// Wildcard accepted for the month and day filters.
pub const WILDCARD: &str = "all";

/// City → backing file name, in prompt order.
pub const CITY_DATA: [(City, &str); 3] = [
    (City::Chicago, "chicago.csv"),
    (City::NewYorkCity, "new_york_city.csv"),
    (City::Washington, "washington.csv"),
];

/// Month names, January first. Index + 1 is the calendar month number.
pub const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Weekday names, Monday first (matches [`Weekday::num_days_from_monday`]).
pub const DAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// A city with a registered trip dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// All registered cities, in prompt order.
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Parse a city name such as `"New York City"`.
    pub fn from_name(name: &str) -> ExplorerResult<Self> {
        let wanted = normalize(name);
        City::ALL
            .into_iter()
            .find(|c| c.key() == wanted)
            .ok_or_else(|| ExplorerError::invalid(FilterDimension::City, name.trim()))
    }

    /// Lower-case name used for parsing and prompts.
    pub fn key(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// File name of the city's trip dataset.
    pub fn source_file(self) -> &'static str {
        CITY_DATA
            .iter()
            .find_map(|(city, file)| (*city == self).then_some(*file))
            .unwrap_or_default()
    }

    /// Location of the city's trip dataset below `data_dir`.
    pub fn source_path(self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.source_file())
    }

    /// Whether the city's dataset carries the `Gender` and `Birth Year` columns.
    pub fn has_demographics(self) -> bool {
        !matches!(self, City::Washington)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        })
    }
}

/// Month dimension of a filter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    Only(Month),
}

impl MonthFilter {
    /// Parse a month name (`"june"`) or the wildcard.
    pub fn from_name(name: &str) -> ExplorerResult<Self> {
        let wanted = normalize(name);
        if wanted == WILDCARD {
            return Ok(MonthFilter::All);
        }
        MONTH_NAMES
            .iter()
            .position(|m| *m == wanted)
            .map(|idx| MonthFilter::Only(MONTHS[idx]))
            .ok_or_else(|| ExplorerError::invalid(FilterDimension::Month, name.trim()))
    }

    /// Calendar month number (1–12) to match, or `None` for the wildcard.
    pub fn number(self) -> Option<u32> {
        match self {
            MonthFilter::All => None,
            MonthFilter::Only(m) => Some(m.number_from_month()),
        }
    }

    pub fn matches(self, month_number: i64) -> bool {
        self.number().is_none_or(|n| i64::from(n) == month_number)
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str(WILDCARD),
            MonthFilter::Only(m) => f.write_str(m.name()),
        }
    }
}

/// Day-of-week dimension of a filter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Only(Weekday),
}

impl DayFilter {
    /// Parse a weekday name (`"friday"`) or the wildcard.
    pub fn from_name(name: &str) -> ExplorerResult<Self> {
        let wanted = normalize(name);
        if wanted == WILDCARD {
            return Ok(DayFilter::All);
        }
        DAY_NAMES
            .iter()
            .position(|d| *d == wanted)
            .map(|idx| DayFilter::Only(WEEKDAYS[idx]))
            .ok_or_else(|| ExplorerError::invalid(FilterDimension::Day, name.trim()))
    }

    /// Compare against a derived `day_of_week` value, ignoring case.
    pub fn matches(self, day_name: &str) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Only(w) => day_name.eq_ignore_ascii_case(weekday_name(w)),
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str(WILDCARD),
            DayFilter::Only(w) => f.write_str(weekday_name(*w)),
        }
    }
}

/// The (city, month, day) triple chosen by the user.
///
/// Only valid selections can be constructed, so the loader never sees an unregistered city.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl FilterSelection {
    pub fn new(city: City, month: MonthFilter, day: DayFilter) -> Self {
        Self { city, month, day }
    }

    /// No time filter for `city`.
    pub fn unfiltered(city: City) -> Self {
        Self::new(city, MonthFilter::All, DayFilter::All)
    }

    /// Validate three user-supplied names.
    pub fn parse(city: &str, month: &str, day: &str) -> ExplorerResult<Self> {
        Ok(Self::new(
            City::from_name(city)?,
            MonthFilter::from_name(month)?,
            DayFilter::from_name(day)?,
        ))
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "city={} month={} day={}", self.city, self.month, self.day)
    }
}

/// Title-cased name for a calendar month number (`6` → `"June"`).
pub fn month_name(number: u32) -> Option<&'static str> {
    let idx = usize::try_from(number).ok()?.checked_sub(1)?;
    MONTHS.get(idx).map(|m| m.name())
}

/// Title-cased weekday name (`Weekday::Fri` → `"Friday"`).
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}
