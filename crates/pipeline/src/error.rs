//! Error types for the pipeline crate.
//!
//! Two families:
//! - `PipelineError` is fatal and aborts the run with no output
//! - `CoercionError` describes why a single row was dropped; it never
//!   leaves the sanitizer except inside log lines and the report counts

use thiserror::Error;

/// Fatal failures of a pipeline run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// One or more required columns are absent from the input table
    #[error("Required column(s) missing from input: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    /// Nothing survived filtering, so the catalog mean and vote
    /// percentile are undefined
    #[error("Catalog is empty after {stage}; mean rating and vote percentile are undefined")]
    EmptyCatalog { stage: String },
}

/// Why a single row failed validation.
///
/// Non-fatal: the row is dropped and the run continues.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionError {
    #[error("missing value for {field}")]
    MissingField { field: &'static str },

    #[error("rating is not a number: {value:?}")]
    InvalidRating { value: String },

    #[error("rating {value} outside plausible range {min}..={max}")]
    RatingOutOfRange { value: f64, min: f64, max: f64 },

    #[error("vote count is not a non-negative integer: {value:?}")]
    InvalidVotes { value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_names_missing_columns() {
        let err = PipelineError::Schema {
            missing: vec!["Plot".to_string(), "Votes".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Required column(s) missing from input: Plot, Votes"
        );
    }
}
