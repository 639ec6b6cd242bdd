/// Title-case a string: the first letter of every alphabetic run is upper
/// case, the rest lower case.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::title_case;
///
/// assert_eq!(title_case("new york city"), "New York City");
/// assert_eq!(title_case("jUNE"), "June");
/// assert_eq!(title_case(""), "");
/// ```
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// Render a number of seconds as a time delta: `D day(s), H:MM:SS[.ffffff]`.
///
/// The day part is omitted when it is zero. Negative spans borrow from the
/// day count, so the clock part is always in `0:00:00..24:00:00`.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::format_duration;
///
/// assert_eq!(format_duration(0.0),        "0:00:00");
/// assert_eq!(format_duration(3_725.0),    "1:02:05");
/// assert_eq!(format_duration(90_061.0),   "1 day, 1:01:01");
/// assert_eq!(format_duration(1_015.24),   "0:16:55.240000");
/// assert_eq!(format_duration(-1.0),       "-1 day, 23:59:59");
/// ```
pub fn format_duration(seconds: f64) -> String {
    const MICROS_PER_SECOND: i64 = 1_000_000;
    const MICROS_PER_DAY: i64 = 86_400 * MICROS_PER_SECOND;

    let total_micros = (seconds * MICROS_PER_SECOND as f64).round() as i64;
    let days = total_micros.div_euclid(MICROS_PER_DAY);
    let rem = total_micros.rem_euclid(MICROS_PER_DAY);

    let micros = rem % MICROS_PER_SECOND;
    let total_secs = rem / MICROS_PER_SECOND;
    let hours = total_secs / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let secs = total_secs % 60;

    let mut out = String::new();
    if days != 0 {
        let plural = if days.abs() == 1 { "" } else { "s" };
        out.push_str(&format!("{days} day{plural}, "));
    }
    out.push_str(&format!("{hours}:{minutes:02}:{secs:02}"));
    if micros != 0 {
        out.push_str(&format!(".{micros:06}"));
    }
    out
}

/// Format a wall-clock measurement in seconds the way report footers show it.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::format_elapsed;
///
/// assert_eq!(format_elapsed(0.0123456), "This took 0.012346 seconds.");
/// ```
pub fn format_elapsed(seconds: f64) -> String {
    format!("This took {seconds:.6} seconds.")
}

// ── Tests ──────────────────────────────────────────────────────────────────────
