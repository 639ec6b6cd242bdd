//! Text for the selection echo and the four statistics sections.

use std::time::Duration;

use bikeshare_core::formatting::{format_duration, format_elapsed};
use bikeshare_core::models::TripTable;
use bikeshare_core::registry::{month_name, weekday_name, FilterSelection};
use bikeshare_data::aggregator::{DurationStats, StationStats, TimeStats, UserStats, TOP_STATIONS};
use bikeshare_data::frequency::ValueCount;

use crate::table_view::build_table_lines;

/// Rows shown by the basic-stats head preview.
pub const HEAD_ROWS: usize = 10;

/// Line used to close every block of output.
pub fn separator() -> String {
    "-".repeat(40)
}

const NO_TRIPS: &str = "No trips matched the selected filters.";

// ── Prompt echo ───────────────────────────────────────────────────────────────

/// Echo of the validated filters, shown once the prompt completes.
pub fn build_selection_lines(selection: &FilterSelection) -> Vec<String> {
    vec![
        separator(),
        "You have entered the following filters:".to_string(),
        String::new(),
        format!("City...: {}", selection.city),
        format!("Month..: {}", selection.month),
        format!("Day....: {}", selection.day),
        String::new(),
        separator(),
    ]
}

// ── Section frame ─────────────────────────────────────────────────────────────

/// Wrap a section body with its heading, timing footer and separator.
pub fn build_section(title: &str, body: Vec<String>, elapsed: Duration) -> Vec<String> {
    let mut lines = Vec::with_capacity(body.len() + 6);
    lines.push(String::new());
    lines.push(format!("Calculating {title}..."));
    lines.push(String::new());
    lines.extend(body);
    lines.push(String::new());
    lines.push(format_elapsed(elapsed.as_secs_f64()));
    lines.push(separator());
    lines
}

// ── Time of travel ────────────────────────────────────────────────────────────

pub fn build_time_lines(stats: &TimeStats) -> Vec<String> {
    let (Some(month), Some(day), Some(hour)) =
        (&stats.popular_month, &stats.popular_day, &stats.popular_hour)
    else {
        return vec![NO_TRIPS.to_string()];
    };

    vec![
        format!(
            "Most frequent travel month is {}, with {} instances.",
            month_name(month.value).unwrap_or("Unknown"),
            month.count
        ),
        format!(
            "Most frequent travel day of week is {}, with {} instances.",
            weekday_name(day.value),
            day.count
        ),
        format!(
            "Most frequent travel start hour is {}, with {} instances.",
            hour.value, hour.count
        ),
    ]
}

// ── Stations ──────────────────────────────────────────────────────────────────

pub fn build_station_lines(stats: &StationStats) -> Vec<String> {
    let Some(trip) = &stats.popular_trip else {
        return vec![NO_TRIPS.to_string()];
    };

    let mut lines = Vec::new();
    lines.push(format!(
        "The top {TOP_STATIONS} most popular start stations are: "
    ));
    lines.extend(ranked_lines(&stats.top_start));
    lines.push(String::new());
    lines.push(format!(
        "The top {TOP_STATIONS} most popular end stations are: "
    ));
    lines.extend(ranked_lines(&stats.top_end));
    lines.push(String::new());
    lines.push("Most frequent start and end station combination is:".to_string());
    lines.push(format!("  Start......: {}", trip.value.0));
    lines.push(format!("  End........: {}", trip.value.1));
    lines.push(format!("  Instances..: {}", trip.count));
    lines
}

fn ranked_lines(entries: &[ValueCount<String>]) -> impl Iterator<Item = String> + '_ {
    entries
        .iter()
        .enumerate()
        .map(|(i, vc)| format!("  {}. {}, with {} instances.", i + 1, vc.value, vc.count))
}

// ── Trip duration ─────────────────────────────────────────────────────────────

pub fn build_duration_lines(stats: &DurationStats) -> Vec<String> {
    let Some(mean) = stats.mean_seconds else {
        return vec![NO_TRIPS.to_string()];
    };

    vec![
        format!(
            "Total travel time is..: {:.0} seconds (or {}).",
            stats.total_seconds,
            format_duration(stats.total_seconds)
        ),
        format!(
            "Mean travel time is...: {:.2} seconds (or {}).",
            mean,
            format_duration(mean)
        ),
    ]
}

// ── Users ─────────────────────────────────────────────────────────────────────

pub fn build_user_lines(stats: &UserStats) -> Vec<String> {
    let mut lines = Vec::new();

    match &stats.user_types {
        Some(types) => lines.extend(types.iter().map(|vc| {
            format!("User type {}, has {} instances.", vc.value, vc.count)
        })),
        None => lines.push(not_available("User Type", "user type counts")),
    }

    lines.push(String::new());
    match &stats.genders {
        Some(genders) => lines.extend(genders.iter().map(|vc| {
            format!("User gender {}, has {} instances.", vc.value, vc.count)
        })),
        None => lines.push(not_available("Gender", "gender counts")),
    }

    lines.push(String::new());
    match &stats.birth_years {
        Some(years) => {
            match (years.earliest, years.latest, &years.most_common) {
                (Some(earliest), Some(latest), Some(common)) => {
                    lines.push(format!("The earliest birth year is {earliest}."));
                    lines.push(format!("The most recent birth year is {latest}."));
                    lines.push(format!(
                        "The most common year of birth is {}, with {} instances.",
                        common.value, common.count
                    ));
                }
                _ => lines.push("No birth year values in the selected trips.".to_string()),
            }
        }
        None => lines.push(not_available(
            "Birth Year",
            "earliest, most recent and most common birth year",
        )),
    }

    lines
}

fn not_available(column: &str, what: &str) -> String {
    format!("Sorry, {what} not available: no '{column}' column was found in the dataset.")
}

// ── Basic stats ───────────────────────────────────────────────────────────────

/// Table size and a preview of its first rows.
pub fn build_basic_lines(table: &TripTable) -> Vec<String> {
    let mut lines = vec![
        format!("Size: {}", table.cell_count()),
        String::new(),
        "Head:".to_string(),
    ];
    lines.extend(build_table_lines(&table.headers, table.head(HEAD_ROWS)));
    lines
}

// ── Tests ─────────────────────────────────────────────────────────────────────
