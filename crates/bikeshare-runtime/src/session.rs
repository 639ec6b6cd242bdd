//! The prompt → load → report → page → restart loop.

use std::io::{BufRead, Write};
use std::time::Instant;

use tracing::{debug, info};

use bikeshare_core::error::Result;
use bikeshare_core::models::TripTable;
use bikeshare_data::aggregator::{station_stats, time_stats, trip_duration_stats, user_stats};
use bikeshare_data::reader::Loader;
use bikeshare_ui::report::{
    build_basic_lines, build_duration_lines, build_section, build_station_lines,
    build_time_lines, build_user_lines,
};
use bikeshare_ui::table_view::build_table_lines;
use bikeshare_ui::write_lines;

use crate::prompt::{PromptMode, Prompter};

/// Rows added to the raw-data view by each "yes".
pub const PAGE_SIZE: usize = 10;

pub const RESTART_QUESTION: &str = "\nWould you like to restart? Enter yes or no.\n";

fn first_page_question() -> String {
    format!("\nWould you like to see {PAGE_SIZE} rows of raw data? Enter yes or no.\n")
}

fn next_page_question() -> String {
    format!("\nWould you like to add another {PAGE_SIZE} rows? Enter yes or no.\n")
}

/// One interactive session over a data directory.
///
/// Nothing is carried between cycles: each one prompts, reads the city file
/// from scratch and drops the table when it ends.
pub struct ReportSession<R, W> {
    prompter: Prompter<R, W>,
    loader: Loader,
    show_basic_stats: bool,
}

impl<R: BufRead, W: Write> ReportSession<R, W> {
    pub fn new(input: R, output: W, loader: Loader) -> Self {
        Self {
            prompter: Prompter::new(input, output),
            loader,
            show_basic_stats: false,
        }
    }

    /// Print table size and a head preview before the statistics.
    /// Ask through `dialoguer` on a terminal or read plain lines.
    pub fn with_prompt_mode(mut self, mode: PromptMode) -> Self {
        self.prompter = self.prompter.with_mode(mode);
        self
    }

    pub fn with_basic_stats(mut self, enabled: bool) -> Self {
        self.show_basic_stats = enabled;
        self
    }

    /// Run cycles until the user declines to restart.
    pub fn run(&mut self) -> Result<()> {
        let mut cycle = 1u32;
        loop {
            info!("Starting report cycle {}", cycle);
            self.run_cycle()?;
            if !self.prompter.confirm(RESTART_QUESTION)? {
                info!("Session finished after {} cycle(s)", cycle);
                return Ok(());
            }
            cycle += 1;
        }
    }

    /// Prompt for filters, load, report, then offer raw rows.
    pub fn run_cycle(&mut self) -> Result<()> {
        let selection = self.prompter.get_filters()?;
        let outcome = self.loader.load(&selection)?;

        for diagnostic in &outcome.diagnostics {
            writeln!(self.prompter.output(), "{diagnostic}")?;
        }

        let table = outcome.table;
        self.report(&table)?;
        self.page_raw_rows(&table)?;
        Ok(())
    }

    /// Write every statistics section for `table`, in fixed order.
    pub fn report(&mut self, table: &TripTable) -> Result<()> {
        if self.show_basic_stats {
            let started = Instant::now();
            let body = build_basic_lines(table);
            self.emit_section("Basic Stats", body, started)?;
        }

        let started = Instant::now();
        let body = build_time_lines(&time_stats(table));
        self.emit_section("The Most Frequent Times of Travel", body, started)?;

        let started = Instant::now();
        let body = build_station_lines(&station_stats(table));
        self.emit_section("The Most Popular Stations and Trip", body, started)?;

        let started = Instant::now();
        let body = build_duration_lines(&trip_duration_stats(table));
        self.emit_section("Trip Duration", body, started)?;

        let started = Instant::now();
        let body = build_user_lines(&user_stats(table));
        self.emit_section("User Stats", body, started)?;

        Ok(())
    }

    /// Offer raw rows in growing pages.
    ///
    /// Each "yes" prints the first `PAGE_SIZE × n` rows again from the top.
    /// Returns how many rows the last page asked for (0 if declined).
    pub fn page_raw_rows(&mut self, table: &TripTable) -> Result<usize> {
        let mut requested = 0;
        let mut wanted = self.prompter.confirm(&first_page_question())?;
        while wanted {
            requested += PAGE_SIZE;
            debug!("Showing first {} raw rows", requested);
            let lines = build_table_lines(&table.headers, table.head(requested));
            write_lines(self.prompter.output(), &lines)?;
            wanted = self.prompter.confirm(&next_page_question())?;
        }
        Ok(requested)
    }

    fn emit_section(&mut self, title: &str, body: Vec<String>, started: Instant) -> Result<()> {
        let lines = build_section(title, body, started.elapsed());
        write_lines(self.prompter.output(), &lines)?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    const HEADER: &str = ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type";

    fn write_washington(dir: &Path, rows: usize) {
        let mut body = String::from(HEADER);
        body.push('\n');
        for i in 0..rows {
            body.push_str(&format!(
                "{i},2017-06-{:02} 08:00:00,2017-06-{:02} 08:10:00,600,Station {},Dock {},Subscriber\n",
                i % 28 + 1,
                i % 28 + 1,
                i % 3,
                i % 2
            ));
        }
        std::fs::write(dir.join("washington.csv"), body).unwrap();
    }

    fn run_session(dir: &Path, script: &str, basic: bool) -> (Result<()>, String) {
        let mut out = Vec::new();
        let result = ReportSession::new(script.as_bytes(), &mut out, Loader::new(dir))
            .with_basic_stats(basic)
            .run();
        (result, String::from_utf8(out).unwrap())
    }

    /// Count data lines printed for raw rows (their first cell is the index).
    fn raw_row_count(out: &str) -> usize {
        out.lines()
            .filter(|l| l.contains("08:00:00") && l.contains("Subscriber"))
            .count()
    }

    #[test]
    fn test_session_single_cycle_report_order() {
        let dir = TempDir::new().unwrap();
        write_washington(dir.path(), 5);

        let (result, out) = run_session(dir.path(), "washington\nall\nall\nno\nno\n", false);
        result.unwrap();

        let time = out.find("Calculating The Most Frequent Times of Travel").unwrap();
        let station = out.find("Calculating The Most Popular Stations and Trip").unwrap();
        let duration = out.find("Calculating Trip Duration").unwrap();
        let users = out.find("Calculating User Stats").unwrap();
        assert!(time < station && station < duration && duration < users);

        assert!(out.contains("Most frequent travel month is June, with 5 instances."));
        assert!(out.contains("Total travel time is..: 3000 seconds (or 0:50:00)."));
        assert!(out.contains("User type Subscriber, has 5 instances."));
        assert!(out.contains("no 'Gender' column"));
        assert!(out.contains("no 'Birth Year' column"));
        assert!(!out.contains("Calculating Basic Stats"));
        assert_eq!(raw_row_count(&out), 0);
    }

    #[test]
    fn test_session_paging_grows_cumulatively() {
        let dir = TempDir::new().unwrap();
        write_washington(dir.path(), 25);

        let (result, out) = run_session(
            dir.path(),
            "washington\nall\nall\nyes\nYes\nyes\nyes\nno\nno\n",
            false,
        );
        result.unwrap();

        // Pages of 10, 20, 25 (capped), 25 rows: each starts from the top.
        assert_eq!(raw_row_count(&out), 10 + 20 + 25 + 25);
        assert_eq!(out.matches("Would you like to add another 10 rows?").count(), 4);
    }

    #[test]
    fn test_page_raw_rows_returns_requested() {
        let dir = TempDir::new().unwrap();
        write_washington(dir.path(), 3);
        let table = Loader::new(dir.path())
            .load_by_name("washington", "all", "all")
            .unwrap()
            .table;

        let mut out = Vec::new();
        let mut session = ReportSession::new("yes\nyes\nnope\n".as_bytes(), &mut out, Loader::new(dir.path()));
        assert_eq!(session.page_raw_rows(&table).unwrap(), 20);
    }

    #[test]
    fn test_session_restart_runs_again() {
        let dir = TempDir::new().unwrap();
        write_washington(dir.path(), 4);

        let (result, out) = run_session(
            dir.path(),
            "washington\njune\nall\nno\nYES\nwashington\njanuary\nall\nno\nno\n",
            false,
        );
        result.unwrap();

        assert_eq!(out.matches("Hello! Let's explore").count(), 2);
        assert!(out.contains("Month..: June"));
        assert!(out.contains("Month..: January"));
        // January has no rows in the fixture.
        assert!(out.contains("No trips matched the selected filters."));
    }

    #[test]
    fn test_session_missing_file_reports_diagnostic() {
        let dir = TempDir::new().unwrap();

        let (result, out) = run_session(dir.path(), "chicago\nall\nall\nno\nno\n", false);
        result.unwrap();

        assert!(out.contains("Data file for Chicago could not be found"));
        assert!(out.contains("No trips matched the selected filters."));
    }

    #[test]
    fn test_session_basic_stats_enabled() {
        let dir = TempDir::new().unwrap();
        write_washington(dir.path(), 12);

        let (result, out) = run_session(dir.path(), "washington\nall\nall\nno\nno\n", true);
        result.unwrap();

        assert!(out.contains("Calculating Basic Stats..."));
        // 12 rows × 7 columns.
        assert!(out.contains("Size: 84"));
        assert_eq!(raw_row_count(&out), 10);
    }

    #[test]
    fn test_session_input_closed_mid_prompt() {
        let dir = TempDir::new().unwrap();
        write_washington(dir.path(), 1);

        let (result, _) = run_session(dir.path(), "washington\n", false);
        assert!(result.is_err());
    }

    #[test]
    fn test_session_eof_at_restart_ends_cleanly() {
        let dir = TempDir::new().unwrap();
        write_washington(dir.path(), 2);

        let (result, _) = run_session(dir.path(), "washington\nall\nall\n", false);
        assert!(result.is_ok());
    }
}
