use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use crate::registry::City;

/// A single bike-share trip read from a city CSV file.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    /// Local date-time the trip started.
    pub start_time: NaiveDateTime,
    /// Local date-time the trip ended, when the file carries it.
    ///
    /// Parsed so that a malformed End Time cell fails the load like a bad
    /// Start Time would. No statistic reads it.
    pub end_time: Option<NaiveDateTime>,
    /// Trip length in seconds.
    pub trip_duration: f64,
    /// Name of the station the trip started from.
    pub start_station: String,
    /// Name of the station the trip ended at.
    pub end_station: String,
    /// Rider category (e.g. "Subscriber", "Customer").
    pub user_type: Option<String>,
    /// Rider gender, only published by some cities.
    pub gender: Option<String>,
    /// Rider year of birth, only published by some cities.
    pub birth_year: Option<i32>,
    /// Cell values exactly as they appeared in the file.
    pub raw: Vec<String>,
}

impl TripRecord {
    /// Calendar month (1–12) of the start timestamp.
    pub fn start_month(&self) -> u32 {
        self.start_time.month()
    }

    /// Weekday of the start timestamp.
    pub fn start_weekday(&self) -> Weekday {
        self.start_time.weekday()
    }

    /// Hour of day (0–23) of the start timestamp.
    pub fn start_hour(&self) -> u32 {
        self.start_time.hour()
    }
}

/// Which optional demographic columns the source file provides.
///
/// Recorded once from the header row so aggregators never probe per record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnPresence {
    pub user_type: bool,
    pub gender: bool,
    pub birth_year: bool,
}

/// The trips of one city after month / day filtering.
///
/// Built fresh for every report cycle and never mutated once handed to the
/// aggregators.
#[derive(Debug, Clone, Default)]
pub struct TripTable {
    /// City the rows were read for; `None` when nothing could be loaded.
    pub city: Option<City>,
    /// Header row of the source file, in file order.
    pub headers: Vec<String>,
    /// Optional columns found in the header row.
    pub columns: ColumnPresence,
    /// Retained trips, in file order.
    pub trips: Vec<TripRecord>,
}

impl TripTable {
    /// Number of retained trips.
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    /// `true` when no trip survived loading and filtering.
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// The first `n` trips (fewer if the table is shorter).
    pub fn head(&self, n: usize) -> &[TripRecord] {
        &self.trips[..n.min(self.trips.len())]
    }

    /// Total number of cells: rows × columns.
    pub fn cell_count(&self) -> usize {
        self.trips.len() * self.headers.len()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(ts: &str) -> TripRecord {
        TripRecord {
            start_time: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
            end_time: None,
            trip_duration: 60.0,
            start_station: "A".to_string(),
            end_station: "B".to_string(),
            user_type: None,
            gender: None,
            birth_year: None,
            raw: vec![ts.to_string()],
        }
    }

    #[test]
    fn test_trip_derived_fields() {
        // 2017-06-23 was a Friday.
        let t = trip("2017-06-23 15:09:32");
        assert_eq!(t.start_month(), 6);
        assert_eq!(t.start_weekday(), Weekday::Fri);
        assert_eq!(t.start_hour(), 15);
    }

    #[test]
    fn test_table_head_shorter_than_request() {
        let table = TripTable {
            headers: vec!["Start Time".to_string()],
            trips: vec![trip("2017-01-01 00:00:00"), trip("2017-01-02 00:00:00")],
            ..Default::default()
        };
        assert_eq!(table.head(10).len(), 2);
        assert_eq!(table.head(1).len(), 1);
        assert_eq!(table.head(0).len(), 0);
    }

    #[test]
    fn test_table_cell_count() {
        let table = TripTable {
            headers: vec!["a".into(), "b".into(), "c".into()],
            trips: vec![trip("2017-01-01 00:00:00"); 4],
            ..Default::default()
        };
        assert_eq!(table.cell_count(), 12);
        assert_eq!(table.len(), 4);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_table_default_is_empty() {
        let table = TripTable::default();
        assert!(table.is_empty());
        assert!(table.city.is_none());
        assert_eq!(table.columns, ColumnPresence::default());
    }
}
