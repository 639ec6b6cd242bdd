//! Plain-text presentation layer for the bikeshare explorer.
//!
//! Every report section is built as a list of lines so it can be asserted on
//! directly in tests and written to any output stream.

pub mod report;
pub mod table_view;

pub use bikeshare_core as core;

use std::io::{self, Write};

/// Write each line followed by a newline.
pub fn write_lines<W: Write>(out: &mut W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
