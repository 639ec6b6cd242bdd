//! Static dataset registry.
//!
//! Maps the supported cities to their CSV files and month / weekday names to
//! their ordinals. Everything here is immutable for the life of the process.

use std::fmt;
use std::str::FromStr;

use chrono::{Month, Weekday};
use thiserror::Error;

use crate::formatting::title_case;

/// Keyword accepted at the month and day prompts to disable that filter.
pub const ALL_KEYWORD: &str = "all";

/// Month names in calendar order; the ordinal is `index + 1`.
pub const MONTHS: [(&str, Month); 12] = [
    ("January", Month::January),
    ("February", Month::February),
    ("March", Month::March),
    ("April", Month::April),
    ("May", Month::May),
    ("June", Month::June),
    ("July", Month::July),
    ("August", Month::August),
    ("September", Month::September),
    ("October", Month::October),
    ("November", Month::November),
    ("December", Month::December),
];

/// Weekday names starting from Monday; the ordinal is `index + 1`.
pub const DAYS_OF_WEEK: [(&str, Weekday); 7] = [
    ("Monday", Weekday::Mon),
    ("Tuesday", Weekday::Tue),
    ("Wednesday", Weekday::Wed),
    ("Thursday", Weekday::Thu),
    ("Friday", Weekday::Fri),
    ("Saturday", Weekday::Sat),
    ("Sunday", Weekday::Sun),
];

// ── ValidationError ───────────────────────────────────────────────────────────

/// A prompt answer that does not resolve against the registry.
///
/// The display text is the corrective message shown before re-prompting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "Invalid city '{0}', only 3 cities are currently supported 'chicago', 'new york city' or 'washington'."
    )]
    InvalidCity(String),

    #[error(
        "Invalid month '{0}', please enter the full month name eg: 'january', or 'all' if you want to view all months."
    )]
    InvalidMonth(String),

    #[error(
        "Invalid day of week '{0}', please enter the full day of week name eg: 'monday', or 'all' if you want to view all days of the week."
    )]
    InvalidDay(String),
}

// ── City ──────────────────────────────────────────────────────────────────────

/// One of the supported bike-share cities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// Every supported city, in prompt order.
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lower-case key typed at the prompt.
    pub fn key(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// Name of the backing CSV file, relative to the data directory.
    pub fn filename(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Look up a city by its key, ignoring case and surrounding whitespace.
    pub fn from_key(input: &str) -> Option<City> {
        let wanted = input.trim().to_lowercase();
        City::ALL.into_iter().find(|c| c.key() == wanted)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&title_case(self.key()))
    }
}

impl FromStr for City {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        City::from_key(s).ok_or_else(|| ValidationError::InvalidCity(s.trim().to_string()))
    }
}

// ── Name ↔ ordinal lookups ────────────────────────────────────────────────────

/// English name of a month given its ordinal.
pub fn month_name(number: u32) -> Option<&'static str> {
    let idx = usize::try_from(number).ok()?.checked_sub(1)?;
    MONTHS.get(idx).map(|(name, _)| *name)
}

/// English name of a weekday.
pub fn weekday_name(day: Weekday) -> &'static str {
    DAYS_OF_WEEK[day.num_days_from_monday() as usize].0
}

fn lookup_month(name: &str) -> Option<Month> {
    let wanted = title_case(name.trim());
    MONTHS
        .iter()
        .find(|(n, _)| *n == wanted)
        .map(|(_, m)| *m)
}

fn lookup_weekday(name: &str) -> Option<Weekday> {
    let wanted = title_case(name.trim());
    DAYS_OF_WEEK
        .iter()
        .find(|(n, _)| *n == wanted)
        .map(|(_, d)| *d)
}

fn is_all_keyword(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(ALL_KEYWORD)
}

// ── Month / day filters ───────────────────────────────────────────────────────

/// Month restriction applied to the start timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    Only(Month),
}

impl MonthFilter {
    /// The requested ordinal, or `None` for [`MonthFilter::All`].
    pub fn number(self) -> Option<u32> {
        match self {
            MonthFilter::All => None,
            MonthFilter::Only(m) => Some(m.number_from_month()),
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("All"),
            MonthFilter::Only(m) => f.write_str(m.name()),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_all_keyword(s) {
            return Ok(MonthFilter::All);
        }
        lookup_month(s)
            .map(MonthFilter::Only)
            .ok_or_else(|| ValidationError::InvalidMonth(s.trim().to_string()))
    }
}

/// Day-of-week restriction applied to the start timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Only(Weekday),
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("All"),
            DayFilter::Only(d) => f.write_str(weekday_name(*d)),
        }
    }
}

impl FromStr for DayFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_all_keyword(s) {
            return Ok(DayFilter::All);
        }
        lookup_weekday(s)
            .map(DayFilter::Only)
            .ok_or_else(|| ValidationError::InvalidDay(s.trim().to_string()))
    }
}

// ── FilterSelection ───────────────────────────────────────────────────────────

/// The validated (city, month, day) triple collected by the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

// ── Tests ──────────────────────────────────────────────────────────────────────
