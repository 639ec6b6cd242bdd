//! Descriptive statistics over a filtered [`TripTable`].
//!
//! Every function here is stateless and reads the table without modifying
//! it. "Most frequent" and "top N" results use [`FrequencyTable`], so ties go
//! to the value encountered first.

use chrono::Weekday;

use bikeshare_core::models::TripTable;

use crate::frequency::{FrequencyTable, ValueCount};

/// How many stations the start / end popularity lists show.
pub const TOP_STATIONS: usize = 5;

// ── Time of travel ────────────────────────────────────────────────────────────

/// Most frequent month, weekday and start hour.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeStats {
    /// Month ordinal (1–12).
    pub popular_month: Option<ValueCount<u32>>,
    pub popular_day: Option<ValueCount<Weekday>>,
    /// Hour of day (0–23).
    pub popular_hour: Option<ValueCount<u32>>,
}

pub fn time_stats(table: &TripTable) -> TimeStats {
    let months: FrequencyTable<u32> = table.trips.iter().map(|t| t.start_month()).collect();
    let days: FrequencyTable<Weekday> = table.trips.iter().map(|t| t.start_weekday()).collect();
    let hours: FrequencyTable<u32> = table.trips.iter().map(|t| t.start_hour()).collect();

    TimeStats {
        popular_month: months.most_common(),
        popular_day: days.most_common(),
        popular_hour: hours.most_common(),
    }
}

// ── Stations ──────────────────────────────────────────────────────────────────

/// Station popularity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationStats {
    /// Up to [`TOP_STATIONS`] start stations, most used first.
    pub top_start: Vec<ValueCount<String>>,
    /// Up to [`TOP_STATIONS`] end stations, most used first.
    pub top_end: Vec<ValueCount<String>>,
    /// Most frequent `(start, end)` pair.
    pub popular_trip: Option<ValueCount<(String, String)>>,
}

pub fn station_stats(table: &TripTable) -> StationStats {
    let starts: FrequencyTable<&str> = table
        .trips
        .iter()
        .map(|t| t.start_station.as_str())
        .collect();
    let ends: FrequencyTable<&str> = table
        .trips
        .iter()
        .map(|t| t.end_station.as_str())
        .collect();
    let pairs: FrequencyTable<(&str, &str)> = table
        .trips
        .iter()
        .map(|t| (t.start_station.as_str(), t.end_station.as_str()))
        .collect();

    StationStats {
        top_start: owned(starts.top(TOP_STATIONS)),
        top_end: owned(ends.top(TOP_STATIONS)),
        popular_trip: pairs
            .most_common()
            .map(|vc| vc.map(|(s, e)| (s.to_string(), e.to_string()))),
    }
}

// ── Trip duration ─────────────────────────────────────────────────────────────

/// Total and mean trip duration, in seconds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DurationStats {
    pub trip_count: usize,
    pub total_seconds: f64,
    /// `None` for an empty table.
    pub mean_seconds: Option<f64>,
}

/// Sum and mean of every trip's duration. No outlier or sign filtering.
pub fn trip_duration_stats(table: &TripTable) -> DurationStats {
    let trip_count = table.len();
    let total_seconds: f64 = table.trips.iter().map(|t| t.trip_duration).sum();
    let mean_seconds = (trip_count > 0).then(|| total_seconds / trip_count as f64);

    DurationStats {
        trip_count,
        total_seconds,
        mean_seconds,
    }
}

// ── Users ─────────────────────────────────────────────────────────────────────

/// Earliest, latest and most common year of birth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: Option<i32>,
    pub latest: Option<i32>,
    pub most_common: Option<ValueCount<i32>>,
}

/// Rider demographics. A `None` field means the source file has no such
/// column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserStats {
    pub user_types: Option<Vec<ValueCount<String>>>,
    pub genders: Option<Vec<ValueCount<String>>>,
    pub birth_years: Option<BirthYearStats>,
}

pub fn user_stats(table: &TripTable) -> UserStats {
    let columns = table.columns;

    let user_types = columns.user_type.then(|| {
        let counts: FrequencyTable<&str> = table
            .trips
            .iter()
            .filter_map(|t| t.user_type.as_deref())
            .collect();
        owned(counts.ranked())
    });

    let genders = columns.gender.then(|| {
        let counts: FrequencyTable<&str> = table
            .trips
            .iter()
            .filter_map(|t| t.gender.as_deref())
            .collect();
        owned(counts.ranked())
    });

    let birth_years = columns.birth_year.then(|| {
        let years: Vec<i32> = table.trips.iter().filter_map(|t| t.birth_year).collect();
        let counts: FrequencyTable<i32> = years.iter().copied().collect();
        BirthYearStats {
            earliest: years.iter().copied().min(),
            latest: years.iter().copied().max(),
            most_common: counts.most_common(),
        }
    });

    UserStats {
        user_types,
        genders,
        birth_years,
    }
}

fn owned(counts: Vec<ValueCount<&str>>) -> Vec<ValueCount<String>> {
    counts
        .into_iter()
        .map(|vc| vc.map(str::to_string))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
