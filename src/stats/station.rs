use std::fmt;

use serde::Serialize;

use crate::columns;
use crate::processing::{Counted, FrequencyTable};
use crate::types::{DataSet, Value};

use super::{NO_DATA, write_mode};

/// Number of entries per ranking in [`enhanced_station_stats`] when run as a report.
pub const DEFAULT_TOP_N: usize = 5;

/// A (start station, end station) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Trip {
    pub start: String,
    pub end: String,
}

impl Trip {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub most_common_start_station: Option<Counted<String>>,
    pub most_common_end_station: Option<Counted<String>>,
    pub most_common_trip: Option<Counted<Trip>>,
}

/// Station rankings: the top start stations, end stations and trips by count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationRanking {
    pub distinct_start_stations: usize,
    pub distinct_end_stations: usize,
    pub distinct_trips: usize,
    pub top_start_stations: Vec<Counted<String>>,
    pub top_end_stations: Vec<Counted<String>>,
    pub top_trips: Vec<Counted<Trip>>,
}

struct StationCounts<'a> {
    starts: FrequencyTable<&'a str>,
    ends: FrequencyTable<&'a str>,
    trips: FrequencyTable<(&'a str, &'a str)>,
}

impl<'a> StationCounts<'a> {
    fn collect(dataset: &'a DataSet) -> Self {
        let start_idx = dataset.schema.index_of(columns::START_STATION);
        let end_idx = dataset.schema.index_of(columns::END_STATION);
        let cell = |row: &'a [Value], idx: Option<usize>| {
            idx.and_then(|i| row.get(i)).and_then(Value::as_str)
        };

        let mut counts = StationCounts {
            starts: FrequencyTable::new(),
            ends: FrequencyTable::new(),
            trips: FrequencyTable::new(),
        };
        for row in &dataset.rows {
            let start = cell(row.as_slice(), start_idx);
            let end = cell(row.as_slice(), end_idx);
            if let Some(s) = start {
                counts.starts.observe(s);
            }
            if let Some(e) = end {
                counts.ends.observe(e);
            }
            if let (Some(s), Some(e)) = (start, end) {
                counts.trips.observe((s, e));
            }
        }
        counts
    }
}

fn owned_station(c: Counted<&&str>) -> Counted<String> {
    Counted {
        value: (*c.value).to_string(),
        count: c.count,
    }
}

fn owned_trip(c: Counted<&(&str, &str)>) -> Counted<Trip> {
    Counted {
        value: Trip::new(c.value.0, c.value.1),
        count: c.count,
    }
}

/// Most frequent start station, end station and (start, end) trip.
///
/// The most common trip is the pair with the highest count; on equal counts the pair that
/// appears first in row order wins. [`enhanced_station_stats`] uses the same rule, so its first
/// ranked trip always equals this one.
pub fn station_stats(dataset: &DataSet) -> StationStats {
    let counts = StationCounts::collect(dataset);
    StationStats {
        most_common_start_station: counts.starts.mode().map(owned_station),
        most_common_end_station: counts.ends.mode().map(owned_station),
        most_common_trip: counts.trips.mode().map(owned_trip),
    }
}

/// Top `top_n` start stations, end stations and trips by descending count.
pub fn enhanced_station_stats(dataset: &DataSet, top_n: usize) -> StationRanking {
    let counts = StationCounts::collect(dataset);
    StationRanking {
        distinct_start_stations: counts.starts.len(),
        distinct_end_stations: counts.ends.len(),
        distinct_trips: counts.trips.len(),
        top_start_stations: top(counts.starts.ranked(), top_n, owned_station),
        top_end_stations: top(counts.ends.ranked(), top_n, owned_station),
        top_trips: top(counts.trips.ranked(), top_n, owned_trip),
    }
}

fn top<K, T>(ranked: Vec<Counted<K>>, n: usize, f: impl Fn(Counted<K>) -> T) -> Vec<T> {
    ranked.into_iter().take(n).map(f).collect()
}

impl fmt::Display for StationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_mode(f, "Most Common Start Station", self.most_common_start_station.as_ref())?;
        write_mode(f, "Most Common End Station", self.most_common_end_station.as_ref())?;
        write_mode(f, "Most Common Trip", self.most_common_trip.as_ref())
    }
}

impl fmt::Display for StationRanking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ranking(
            f,
            "Top Start Stations",
            self.distinct_start_stations,
            &self.top_start_stations,
        )?;
        write_ranking(
            f,
            "Top End Stations",
            self.distinct_end_stations,
            &self.top_end_stations,
        )?;
        write_ranking(f, "Top Trips", self.distinct_trips, &self.top_trips)
    }
}

fn write_ranking<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    distinct: usize,
    entries: &[Counted<T>],
) -> fmt::Result {
    writeln!(f, "{label} ({distinct} distinct):")?;
    if entries.is_empty() {
        return writeln!(f, "  {NO_DATA}");
    }
    for (rank, entry) in entries.iter().enumerate() {
        writeln!(f, "  {}. {} (count: {})", rank + 1, entry.value, entry.count)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, Field, Schema};

    fn stations(pairs: &[(&str, &str)]) -> DataSet {
        let schema = Schema::new(vec![
            Field::new(columns::START_STATION, DataType::Utf8),
            Field::new(columns::END_STATION, DataType::Utf8),
        ]);
        let rows = pairs
            .iter()
            .map(|(s, e)| vec![Value::Utf8(s.to_string()), Value::Utf8(e.to_string())])
            .collect();
        DataSet::new(schema, rows)
    }

    #[test]
    fn three_row_example() {
        let ds = stations(&[("A", "B"), ("A", "B"), ("B", "C")]);
        let stats = station_stats(&ds);
        assert_eq!(
            stats.most_common_start_station,
            Some(Counted { value: "A".to_string(), count: 2 })
        );
        assert_eq!(
            stats.most_common_end_station,
            Some(Counted { value: "B".to_string(), count: 2 })
        );
        assert_eq!(
            stats.most_common_trip,
            Some(Counted { value: Trip::new("A", "B"), count: 2 })
        );
    }

    #[test]
    fn trip_ties_go_to_first_pair_seen() {
        let ds = stations(&[("X", "Y"), ("A", "B"), ("A", "B"), ("X", "Y")]);
        let stats = station_stats(&ds);
        assert_eq!(stats.most_common_trip.unwrap().value, Trip::new("X", "Y"));
    }

    #[test]
    fn ranking_agrees_with_station_stats() {
        let ds = stations(&[("C", "D"), ("A", "B"), ("C", "D"), ("A", "B"), ("E", "F")]);
        let stats = station_stats(&ds);
        let ranking = enhanced_station_stats(&ds, 2);

        assert_eq!(ranking.top_trips.len(), 2);
        assert_eq!(Some(&ranking.top_trips[0]), stats.most_common_trip.as_ref());
        assert_eq!(Some(&ranking.top_start_stations[0]), stats.most_common_start_station.as_ref());
        assert_eq!(ranking.top_trips[1].value, Trip::new("A", "B"));
        assert_eq!(ranking.distinct_trips, 3);
        assert_eq!(ranking.distinct_start_stations, 3);
    }

    #[test]
    fn null_stations_are_skipped() {
        let mut ds = stations(&[("A", "B")]);
        ds.rows.push(vec![Value::Null, Value::Utf8("B".into())]);
        let stats = station_stats(&ds);
        assert_eq!(stats.most_common_start_station.unwrap().count, 1);
        assert_eq!(stats.most_common_end_station.unwrap().count, 2);
        assert_eq!(stats.most_common_trip.unwrap().count, 1);
    }

    #[test]
    fn empty_table_reports_no_data() {
        let ds = stations(&[]);
        let stats = station_stats(&ds);
        assert!(stats.most_common_start_station.is_none());
        assert!(stats.most_common_trip.is_none());
        assert!(stats.to_string().contains("Most Common Trip: no data"));

        let ranking = enhanced_station_stats(&ds, DEFAULT_TOP_N);
        assert!(ranking.top_trips.is_empty());
        assert!(ranking.to_string().contains("Top Trips (0 distinct):\n  no data"));
    }
}
