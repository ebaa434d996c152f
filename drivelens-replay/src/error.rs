//! Replay errors

use drivelens_core::ClassifierError;
use thiserror::Error;

/// Result type for replay operations
pub type ReplayResult<T> = Result<T, ReplayError>;

/// Errors while loading, classifying or saving a log
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("Invalid timestamp {value:?} on row {row}")]
    InvalidTimestamp { row: usize, value: String },

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = ReplayError::MissingColumn("timestamp");
        assert_eq!(err.to_string(), "Missing required column: timestamp");

        let err = ReplayError::InvalidTimestamp {
            row: 3,
            value: "yesterday".into(),
        };
        assert_eq!(err.to_string(), "Invalid timestamp \"yesterday\" on row 3");
    }

    #[test]
    fn classifier_errors_are_transparent() {
        let err: ReplayError = ClassifierError::InvalidConfig {
            reason: "min_samples must be at least 1",
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Invalid classifier configuration: min_samples must be at least 1"
        );
    }
}
