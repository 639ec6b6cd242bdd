use std::path::PathBuf;
use thiserror::Error;

/// All errors produced while loading and analysing trip data.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV document could not be parsed.
    #[error("Failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from the header row.
    #[error("Column '{column}' not found in {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// A start or end timestamp did not match any recognised format.
    #[error("Invalid timestamp on row {row}: {value}")]
    TimestampParse { row: usize, value: String },

    /// Standard input reached end-of-file while a prompt was waiting.
    #[error("Input closed before a valid answer was given")]
    InputClosed,

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Failures from third-party crates such as the terminal prompt library.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the bikeshare crates.
pub type Result<T> = std::result::Result<T, BikeshareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = BikeshareError::FileRead {
            path: PathBuf::from("/data/chicago.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/data/chicago.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = BikeshareError::MissingColumn {
            path: PathBuf::from("washington.csv"),
            column: "Start Time".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Column 'Start Time' not found in washington.csv"
        );
    }

    #[test]
    fn test_error_display_timestamp_parse() {
        let err = BikeshareError::TimestampParse {
            row: 7,
            value: "yesterday".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid timestamp on row 7: yesterday");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: BikeshareError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_anyhow() {
        let err: BikeshareError = anyhow::anyhow!("stdin closed").into();
        assert_eq!(err.to_string(), "stdin closed");
    }
}
