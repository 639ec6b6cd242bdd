use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive explorer for US bike-share trip data
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bikeshare",
    about = "Interactive explorer for US bike-share trip data",
    version
)]
pub struct Settings {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, default_value = ".", env = "BIKESHARE_DATA_DIR")]
    pub data_dir: PathBuf,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path (logs go to stderr when absent)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging and print basic table stats before each report
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply derived values.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    /// `--debug` overrides the log level.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::parse_from(["bikeshare"]);

        assert_eq!(settings.data_dir, PathBuf::from("."));
        assert_eq!(settings.log_level, "WARNING");
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
    }

    #[test]
    fn test_settings_cli_data_dir() {
        let settings = Settings::load_from(["bikeshare", "--data-dir", "/srv/bikeshare"]);
        assert_eq!(settings.data_dir, PathBuf::from("/srv/bikeshare"));
    }

    #[test]
    fn test_settings_cli_log_file() {
        let settings = Settings::load_from(["bikeshare", "--log-file", "/tmp/bikeshare.log"]);
        assert_eq!(settings.log_file, Some(PathBuf::from("/tmp/bikeshare.log")));
    }

    #[test]
    fn test_settings_debug_overrides_log_level() {
        let settings = Settings::load_from(["bikeshare", "--log-level", "ERROR", "--debug"]);
        assert!(settings.debug);
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_settings_rejects_unknown_log_level() {
        let result = Settings::try_parse_from(["bikeshare", "--log-level", "TRACE"]);
        assert!(result.is_err());
    }
}
