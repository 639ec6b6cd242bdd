//! Data layer for the bikeshare explorer.
//!
//! Reads a city's CSV file into a [`TripTable`](bikeshare_core::models::TripTable),
//! narrows it by month and weekday, and computes the descriptive statistics
//! shown in each report.

pub mod aggregator;
pub mod frequency;
pub mod reader;

pub use bikeshare_core as core;
