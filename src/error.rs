//! Error kinds raised while loading a survey and evaluating its metrics.

use thiserror::Error;

/// Result type for survey operations.
pub type Result<T> = std::result::Result<T, SurveyError>;

/// Errors that can occur while loading or aggregating a traffic survey.
#[derive(Error, Debug)]
pub enum SurveyError {
    /// A data line does not have as many fields as the header.
    #[error("Malformed record on line {line}: expected {expected} fields, found {found}")]
    MalformedRecord {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// The header itself is unusable (empty or duplicated column names).
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    /// A metric referenced a column the dataset does not have.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// The `timeOfDay` prefix of a row is not an hour in 0..=23.
    #[error("Invalid time of day {value:?} at row {row}")]
    TimeFormat { row: usize, value: String },

    /// A percentage or average was requested over an empty group.
    #[error("Division by zero")]
    DivisionByZero,

    /// A cell that should be numeric could not be parsed.
    #[error("Non-numeric value {value:?} in column {column} at row {row}")]
    TypeMismatch {
        row: usize,
        column: String,
        value: String,
    },

    /// Peak-hour resolution was asked for over zero rows.
    #[error("No hourly counts to resolve a peak from")]
    EmptyHourCount,

    #[error("Failed to read survey data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse survey CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid metric configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl SurveyError {
    /// Returns true for errors that only invalidate the metric that raised
    /// them. Everything else aborts the whole aggregation run.
    pub fn is_metric_local(&self) -> bool {
        matches!(self, Self::DivisionByZero | Self::EmptyHourCount)
    }

    /// Short reason used when a metric is reported as undefined.
    pub fn undefined_reason(&self) -> &'static str {
        match self {
            Self::DivisionByZero => "division by zero",
            Self::EmptyHourCount => "no records",
            _ => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_local_classification() {
        assert!(SurveyError::DivisionByZero.is_metric_local());
        assert!(SurveyError::EmptyHourCount.is_metric_local());
        assert!(!SurveyError::UnknownColumn("x".into()).is_metric_local());
        assert!(
            !SurveyError::TimeFormat {
                row: 0,
                value: "ab:00".into()
            }
            .is_metric_local()
        );
    }

    #[test]
    fn test_malformed_record_message() {
        let err = SurveyError::MalformedRecord {
            line: 3,
            expected: 9,
            found: 8,
        };
        assert_eq!(
            err.to_string(),
            "Malformed record on line 3: expected 9 fields, found 8"
        );
    }
}
