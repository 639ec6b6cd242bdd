//! CSV loading and month / weekday filtering for one city.
//!
//! Resolution problems (unknown city, missing data file, unknown month or
//! day name) are reported as [`LoadDiagnostic`]s and loading carries on with
//! whatever could be resolved. Malformed file content is a hard error.

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{NaiveDateTime, Weekday};
use serde::Deserialize;
use tracing::{debug, warn};

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{ColumnPresence, TripRecord, TripTable};
use bikeshare_core::registry::{City, DayFilter, FilterSelection, MonthFilter};

// ── Column names ──────────────────────────────────────────────────────────────

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

const REQUIRED_COLUMNS: [&str; 4] = [START_TIME, TRIP_DURATION, START_STATION, END_STATION];

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// One CSV row as it appears on disk. Optional columns may be absent from
/// the header entirely or empty in a given row.
#[derive(Debug, Deserialize)]
struct CsvTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

// ── LoadDiagnostic ────────────────────────────────────────────────────────────

/// A non-fatal problem met while resolving what to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadDiagnostic {
    /// The city name has no registered data file.
    UnknownCity(String),
    /// The city's registered file does not exist in the data directory.
    DataFileMissing { city: City, path: PathBuf },
    /// The month name has no ordinal; the month filter was skipped.
    UnknownMonth(String),
    /// The day name has no ordinal; the day filter was skipped.
    UnknownDay(String),
}

impl fmt::Display for LoadDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadDiagnostic::UnknownCity(name) => {
                write!(f, "Filename could not be found for the city specified ({name}).")
            }
            LoadDiagnostic::DataFileMissing { city, path } => write!(
                f,
                "Data file for {city} could not be found at {}.",
                path.display()
            ),
            LoadDiagnostic::UnknownMonth(name) => {
                write!(f, "Something has gone wrong with the month filter ({name}).")
            }
            LoadDiagnostic::UnknownDay(name) => {
                write!(f, "Something has gone wrong with the day filter ({name}).")
            }
        }
    }
}

/// The filtered table plus any diagnostics raised along the way.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub table: TripTable,
    pub diagnostics: Vec<LoadDiagnostic>,
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Resolves city data files under a base directory and loads them.
#[derive(Debug, Clone)]
pub struct Loader {
    data_dir: PathBuf,
}

impl Loader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Full path of the CSV file registered for `city`.
    pub fn resolve_path(&self, city: City) -> PathBuf {
        self.data_dir.join(city.filename())
    }

    /// Load the trips for a validated selection.
    pub fn load(&self, selection: &FilterSelection) -> Result<LoadOutcome> {
        let mut diagnostics = Vec::new();
        let table = self.load_city(
            selection.city,
            selection.month,
            selection.day,
            &mut diagnostics,
        )?;
        Ok(LoadOutcome { table, diagnostics })
    }

    /// Load the trips for free-form names.
    ///
    /// An unknown city yields an empty table; an unknown month or day skips
    /// only that filter. Each case adds a diagnostic.
    pub fn load_by_name(&self, city: &str, month: &str, day: &str) -> Result<LoadOutcome> {
        let mut diagnostics = Vec::new();

        let Some(city) = City::from_key(city) else {
            warn!("No data file registered for city \"{}\"", city);
            diagnostics.push(LoadDiagnostic::UnknownCity(city.to_string()));
            return Ok(LoadOutcome {
                table: TripTable::default(),
                diagnostics,
            });
        };

        let month_filter = month.parse::<MonthFilter>().unwrap_or_else(|_| {
            warn!("Unknown month \"{}\", month filter skipped", month);
            diagnostics.push(LoadDiagnostic::UnknownMonth(month.to_string()));
            MonthFilter::All
        });
        let day_filter = day.parse::<DayFilter>().unwrap_or_else(|_| {
            warn!("Unknown day \"{}\", day filter skipped", day);
            diagnostics.push(LoadDiagnostic::UnknownDay(day.to_string()));
            DayFilter::All
        });

        let table = self.load_city(city, month_filter, day_filter, &mut diagnostics)?;
        Ok(LoadOutcome { table, diagnostics })
    }

    fn load_city(
        &self,
        city: City,
        month: MonthFilter,
        day: DayFilter,
        diagnostics: &mut Vec<LoadDiagnostic>,
    ) -> Result<TripTable> {
        let path = self.resolve_path(city);
        if !path.is_file() {
            warn!("Data file for {} not found at {}", city, path.display());
            diagnostics.push(LoadDiagnostic::DataFileMissing { city, path });
            return Ok(TripTable {
                city: Some(city),
                ..Default::default()
            });
        }

        let mut table = read_trip_file(&path)?;
        table.city = Some(city);
        let loaded = table.len();

        if let Some(number) = month.number() {
            table = filter_by_month(table, number);
        }
        if let DayFilter::Only(weekday) = day {
            table = filter_by_weekday(table, weekday);
        }

        debug!(
            "Loaded {} trips for {} ({} after month={}, day={})",
            loaded,
            city,
            table.len(),
            month,
            day
        );
        Ok(table)
    }
}

// ── Filtering ─────────────────────────────────────────────────────────────────

/// Keep only trips whose start month equals `month` (1–12).
pub fn filter_by_month(mut table: TripTable, month: u32) -> TripTable {
    table.trips.retain(|t| t.start_month() == month);
    table
}

/// Keep only trips that started on `weekday`.
pub fn filter_by_weekday(mut table: TripTable, weekday: Weekday) -> TripTable {
    table.trips.retain(|t| t.start_weekday() == weekday);
    table
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Read a whole trip CSV file into memory, in file order.
///
/// The file handle is released before returning.
pub fn read_trip_file(path: &Path) -> Result<TripTable> {
    let file = File::open(path).map_err(|source| BikeshareError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new().flexible(false).from_reader(file);
    let csv_err = |source: csv::Error| BikeshareError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let header_record = reader.headers().map_err(csv_err)?.clone();
    let headers: Vec<String> = header_record.iter().map(str::to_string).collect();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(BikeshareError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            });
        }
    }

    let has = |name: &str| headers.iter().any(|h| h == name);
    let columns = ColumnPresence {
        user_type: has(USER_TYPE),
        gender: has(GENDER),
        birth_year: has(BIRTH_YEAR),
    };

    let mut trips = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(csv_err)?;
        let row: CsvTrip = record.deserialize(Some(&header_record)).map_err(csv_err)?;
        trips.push(to_trip_record(row, &record, idx + 1)?);
    }

    debug!("Read {} rows from {}", trips.len(), path.display());

    Ok(TripTable {
        city: None,
        headers,
        columns,
        trips,
    })
}

/// Parse a naive local timestamp such as `2017-01-01 09:07:57`.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

fn to_trip_record(row: CsvTrip, record: &csv::StringRecord, row_no: usize) -> Result<TripRecord> {
    let start_time =
        parse_timestamp(&row.start_time).ok_or_else(|| BikeshareError::TimestampParse {
            row: row_no,
            value: row.start_time.clone(),
        })?;

    let end_time = match row.end_time.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(parse_timestamp(s).ok_or_else(|| BikeshareError::TimestampParse {
            row: row_no,
            value: s.to_string(),
        })?),
    };

    Ok(TripRecord {
        start_time,
        end_time,
        trip_duration: row.trip_duration,
        start_station: row.start_station,
        end_station: row.end_station,
        user_type: non_blank(row.user_type),
        gender: non_blank(row.gender),
        birth_year: row.birth_year.map(|y| y.round() as i32),
        raw: record.iter().map(str::to_string).collect(),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
