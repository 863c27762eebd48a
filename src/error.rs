use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: '{column}'")]
    MissingColumn { column: String },

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Invalid timestamp: '{value}'")]
    TimestampParse { value: String },

    #[error("Unknown season code: {code} (expected 1-4)")]
    UnknownSeason { code: i32 },

    #[error("Hour {hour} is outside the day (expected 0-23)")]
    HourOutOfRange { hour: i32 },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: Box<ProcessingError>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse failure family, used by callers that only care whether the source,
/// a timestamp, or a value's domain was at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Load,
    Parse,
    Domain,
    Configuration,
    Output,
}

impl ProcessingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProcessingError::Io(_)
            | ProcessingError::Csv(_)
            | ProcessingError::MissingColumn { .. }
            | ProcessingError::InvalidFormat(_) => ErrorKind::Load,
            ProcessingError::TimestampParse { .. } => ErrorKind::Parse,
            ProcessingError::UnknownSeason { .. }
            | ProcessingError::HourOutOfRange { .. }
            | ProcessingError::Validation(_) => ErrorKind::Domain,
            ProcessingError::Row { source, .. } => source.kind(),
            ProcessingError::Config(_) | ProcessingError::Settings(_) => ErrorKind::Configuration,
            ProcessingError::Json(_) => ErrorKind::Output,
        }
    }

    /// Attach the 1-based data row on which the error occurred.
    pub fn at_row(self, row: usize) -> Self {
        ProcessingError::Row {
            row,
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_wrapper_keeps_kind() {
        let err = ProcessingError::UnknownSeason { code: 7 }.at_row(12);
        assert_eq!(err.kind(), ErrorKind::Domain);
        assert_eq!(err.to_string(), "Row 12: Unknown season code: 7 (expected 1-4)");

        let err = ProcessingError::TimestampParse {
            value: "yesterday".to_string(),
        }
        .at_row(3);
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_missing_column_is_load_error() {
        let err = ProcessingError::MissingColumn {
            column: "registered".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Load);
    }
}
