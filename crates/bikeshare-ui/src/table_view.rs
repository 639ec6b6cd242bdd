//! Fixed-width rendering of raw trip rows.

use unicode_width::UnicodeWidthStr;

use bikeshare_core::models::TripRecord;

const COLUMN_GAP: &str = "  ";

/// Lay out `rows` under `headers` as an aligned text table.
///
/// Cells are left-aligned and padded by display width, so station names with
/// wide characters still line up. Rows shorter than the header are padded
/// with blanks.
pub fn build_table_lines(headers: &[String], rows: &[TripRecord]) -> Vec<String> {
    if headers.is_empty() || rows.is_empty() {
        return vec!["(no rows to display)".to_string()];
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (idx, cell) in row.raw.iter().enumerate().take(widths.len()) {
            widths[idx] = widths[idx].max(cell.width());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_row(headers.iter().map(String::as_str), &widths));
    for row in rows {
        lines.push(format_row(row.raw.iter().map(String::as_str), &widths));
    }
    lines
}

fn format_row<'a>(mut cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let mut out = String::new();
    for (idx, width) in widths.iter().enumerate() {
        let cell = cells.next().unwrap_or("");
        if idx > 0 {
            out.push_str(COLUMN_GAP);
        }
        out.push_str(cell);
        out.push_str(&" ".repeat(width.saturating_sub(cell.width())));
    }
    out.trim_end().to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn row(raw: &[&str]) -> TripRecord {
        TripRecord {
            start_time: NaiveDateTime::parse_from_str("2017-01-01 00:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            end_time: None,
            trip_duration: 0.0,
            start_station: String::new(),
            end_station: String::new(),
            user_type: None,
            gender: None,
            birth_year: None,
            raw: raw.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_table_lines_header_and_rows() {
        let lines = build_table_lines(
            &headers(&["id", "Start Station"]),
            &[row(&["1", "Canal St"]), row(&["22", "Clark St & Lake St"])],
        );
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "id  Start Station");
        assert_eq!(lines[1], "1   Canal St");
        assert_eq!(lines[2], "22  Clark St & Lake St");
    }

    #[test]
    fn test_table_lines_wide_characters_align() {
        let lines = build_table_lines(
            &headers(&["name", "n"]),
            &[row(&["駅", "1"]), row(&["abcd", "2"])],
        );
        // "駅" has display width 2, padded to 4.
        assert_eq!(lines[1], "駅    1");
        assert_eq!(lines[2], "abcd  2");
    }

    #[test]
    fn test_table_lines_short_row_padded() {
        let lines = build_table_lines(&headers(&["a", "b", "c"]), &[row(&["x"])]);
        assert_eq!(lines[1], "x");
    }

    #[test]
    fn test_table_lines_empty() {
        let lines = build_table_lines(&[], &[]);
        assert_eq!(lines, vec!["(no rows to display)".to_string()]);
    }
}
