//! Shared building blocks for the bikeshare explorer.
//!
//! Holds the static dataset registry (cities, months, weekdays), the trip
//! record model, error types, command-line settings and the duration
//! formatting used by the reports.

pub mod error;
pub mod formatting;
pub mod models;
pub mod registry;
pub mod settings;
