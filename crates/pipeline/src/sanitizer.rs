//! Record sanitizer: turns the raw table into validated `CleanRow`s.
//!
//! ## Steps
//! 1. Resolve the required columns (missing column = fatal `Schema` error)
//! 2. Project each record onto a `RawRow`
//! 3. Coerce rating and votes; rows that fail are dropped and counted
//! 4. Drop exact duplicates, first occurrence wins
//!
//! The input table is only borrowed; nothing upstream is mutated.

use crate::error::{CoercionError, PipelineError, Result};
use data_loader::{CleanRow, ColumnMapping, RawRow, RawTable};
use std::collections::HashSet;
use std::ops::RangeInclusive;
use tracing::{debug, info};

/// Counts of what the sanitizer kept and why it dropped the rest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    pub input_rows: usize,
    pub missing_fields: usize,
    pub invalid_rating: usize,
    pub invalid_votes: usize,
    pub duplicates: usize,
    pub kept: usize,
}

impl SanitizeReport {
    fn record_drop(&mut self, error: &CoercionError) {
        match error {
            CoercionError::MissingField { .. } => self.missing_fields += 1,
            CoercionError::InvalidRating { .. } | CoercionError::RatingOutOfRange { .. } => {
                self.invalid_rating += 1
            }
            CoercionError::InvalidVotes { .. } => self.invalid_votes += 1,
        }
    }

    pub fn dropped(&self) -> usize {
        self.input_rows - self.kept
    }
}

/// Validates and coerces raw catalog records.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    columns: ColumnMapping,
    rating_range: RangeInclusive<f64>,
}

impl Sanitizer {
    /// Create a sanitizer with the default column names and a 0-10 rating scale
    pub fn new() -> Self {
        Self {
            columns: ColumnMapping::default(),
            rating_range: 0.0..=10.0,
        }
    }

    /// Configure the source column names
    pub fn with_columns(mut self, columns: ColumnMapping) -> Self {
        self.columns = columns;
        self
    }

    /// Configure the plausible rating range (default: 0.0..=10.0)
    pub fn with_rating_range(mut self, range: RangeInclusive<f64>) -> Self {
        self.rating_range = range;
        self
    }

    /// Sanitize a raw table.
    ///
    /// # Returns
    /// * `Ok((rows, report))` - clean rows in source order plus drop counts
    /// * `Err(PipelineError::Schema)` - if any required column is absent
    pub fn sanitize(&self, table: &RawTable) -> Result<(Vec<CleanRow>, SanitizeReport)> {
        let indices = self.resolve_columns(table)?;

        let mut report = SanitizeReport {
            input_rows: table.len(),
            ..SanitizeReport::default()
        };
        let mut seen = HashSet::new();
        let mut rows = Vec::with_capacity(table.len());

        for (position, record) in table.records().iter().enumerate() {
            let cell = |i: usize| record[indices[i]].clone();
            let raw = RawRow {
                title: cell(0),
                genre: cell(1),
                description: cell(2),
                rating: cell(3),
                votes: cell(4),
            };

            let row = match self.coerce(raw) {
                Ok(row) => row,
                Err(e) => {
                    debug!("Dropping record {}: {}", position + 1, e);
                    report.record_drop(&e);
                    continue;
                }
            };

            if !seen.insert(dedup_key(&row)) {
                debug!("Dropping duplicate record {}: {:?}", position + 1, row.title);
                report.duplicates += 1;
                continue;
            }
            rows.push(row);
        }

        report.kept = rows.len();
        info!(
            "Sanitized {} records: kept {}, dropped {} (missing {}, bad rating {}, bad votes {}, duplicate {})",
            report.input_rows,
            report.kept,
            report.dropped(),
            report.missing_fields,
            report.invalid_rating,
            report.invalid_votes,
            report.duplicates
        );
        Ok((rows, report))
    }

    /// Positions of the required columns in field order
    fn resolve_columns(&self, table: &RawTable) -> Result<[usize; 5]> {
        let required = self.columns.required();
        let mut indices = [0usize; 5];
        let mut missing = Vec::new();

        for (slot, name) in indices.iter_mut().zip(required) {
            match table.column_index(name) {
                Some(index) => *slot = index,
                None => missing.push(name.to_string()),
            }
        }

        if missing.is_empty() {
            Ok(indices)
        } else {
            Err(PipelineError::Schema { missing })
        }
    }

    /// Coerce one projected record into a `CleanRow`
    pub fn coerce(&self, raw: RawRow) -> std::result::Result<CleanRow, CoercionError> {
        let title = require(raw.title, "title")?;
        let genre = require(raw.genre, "genre")?;
        let description = require(raw.description, "description")?;
        let rating_text = require(raw.rating, "rating")?;
        let votes_text = require(raw.votes, "votes")?;

        let rating = self.parse_rating(&rating_text)?;
        let votes = parse_votes(&votes_text)?;

        Ok(CleanRow {
            title,
            genre,
            description,
            rating,
            votes,
        })
    }

    fn parse_rating(&self, text: &str) -> std::result::Result<f64, CoercionError> {
        let value: f64 = text
            .trim()
            .parse()
            .map_err(|_| CoercionError::InvalidRating {
                value: text.to_string(),
            })?;

        if !value.is_finite() {
            return Err(CoercionError::InvalidRating {
                value: text.to_string(),
            });
        }
        if !self.rating_range.contains(&value) {
            return Err(CoercionError::RatingOutOfRange {
                value,
                min: *self.rating_range.start(),
                max: *self.rating_range.end(),
            });
        }
        Ok(value)
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

fn require(value: Option<String>, field: &'static str) -> std::result::Result<String, CoercionError> {
    value.ok_or(CoercionError::MissingField { field })
}

/// Parse a vote count, ignoring thousands separators.
///
/// Integral decimal text ("1200.0") is accepted; fractions and negatives are not.
pub fn parse_votes(text: &str) -> std::result::Result<u64, CoercionError> {
    let invalid = || CoercionError::InvalidVotes {
        value: text.to_string(),
    };
    let digits: String = text.trim().chars().filter(|&c| c != ',').collect();

    if let Ok(votes) = digits.parse::<u64>() {
        return Ok(votes);
    }

    let value: f64 = digits.parse().map_err(|_| invalid())?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Ok(value as u64)
    } else {
        Err(invalid())
    }
}

fn dedup_key(row: &CleanRow) -> (String, String, String, u64, u64) {
    (
        row.title.clone(),
        row.genre.clone(),
        row.description.clone(),
        row.rating.to_bits(),
        row.votes,
    )
}
