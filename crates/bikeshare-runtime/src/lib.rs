//! Interactive layer for the bikeshare explorer.
//!
//! Collects filters from the user, drives one load-and-report cycle after
//! another, and pages through raw rows on request. All I/O goes through
//! caller-supplied streams so sessions can be scripted in tests.

pub mod prompt;
pub mod session;

pub use bikeshare_core as core;
pub use bikeshare_data as data;
