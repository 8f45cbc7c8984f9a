//! Core row types shared by every stage of the catalog pipeline.
//!
//! Data moves through three shapes:
//! - `RawTable`: the rectangular table handed over by the file boundary
//! - `RawRow`: one record projected onto the required columns, still text
//! - `CleanRow`: a validated record with numeric rating and vote count

use serde::{Deserialize, Serialize};

// =============================================================================
// Source schema
// =============================================================================

/// Names of the source columns that feed each required field.
///
/// The defaults match the headers of the public movies dataset the
/// pipeline was built for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub title: String,
    pub genre: String,
    pub description: String,
    pub rating: String,
    pub votes: String,
}

impl ColumnMapping {
    /// Required source columns in field order
    /// (title, genre, description, rating, votes)
    pub fn required(&self) -> [&str; 5] {
        [
            &self.title,
            &self.genre,
            &self.description,
            &self.rating,
            &self.votes,
        ]
    }
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            title: "Movie Name".to_string(),
            genre: "Genre".to_string(),
            description: "Plot".to_string(),
            rating: "Rating".to_string(),
            votes: "Votes".to_string(),
        }
    }
}

// =============================================================================
// RawTable - what the loader produces
// =============================================================================

/// A rectangular table of optional text cells.
///
/// `None` marks a missing cell (empty or whitespace-only in the source).
/// Every record has exactly `header.len()` cells.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    header: Vec<String>,
    records: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Creates an empty table with the given column names
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            records: Vec::new(),
        }
    }

    /// Creates an empty table from borrowed column names
    pub fn with_columns(columns: &[&str]) -> Self {
        Self::new(columns.iter().map(|c| c.to_string()).collect())
    }

    /// Append a record, padding short records with missing cells.
    ///
    /// Cells beyond the header width are discarded; the loader never
    /// hands such records in (it skips them with a warning).
    pub fn push_record(&mut self, mut record: Vec<Option<String>>) {
        record.resize(self.header.len(), None);
        self.records.push(record);
    }

    /// Append a record of text cells; blank cells become missing
    pub fn push_text_record(&mut self, cells: &[&str]) {
        let record = cells.iter().map(|cell| normalize_cell(cell)).collect();
        self.push_record(record);
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Position of a column by exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    pub fn records(&self) -> &[Vec<Option<String>>] {
        &self.records
    }

    /// Get a single cell, `None` if missing or out of range
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.records
            .get(row)
            .and_then(|record| record.get(column))
            .and_then(|cell| cell.as_deref())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Blank text is a missing value
pub(crate) fn normalize_cell(cell: &str) -> Option<String> {
    if cell.trim().is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}

// =============================================================================
// Row types
// =============================================================================

/// One source record projected onto the required columns.
///
/// Still untyped text; any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub rating: Option<String>,
    pub votes: Option<String>,
}

/// A validated catalog row.
///
/// `rating` and `votes` are always present and numeric; rows that fail
/// coercion never become a `CleanRow`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanRow {
    pub title: String,
    pub genre: String,
    pub description: String,
    pub rating: f64,
    pub votes: u64,
}

impl CleanRow {
    pub fn new(
        title: impl Into<String>,
        genre: impl Into<String>,
        description: impl Into<String>,
        rating: f64,
        votes: u64,
    ) -> Self {
        Self {
            title: title.into(),
            genre: genre.into(),
            description: description.into(),
            rating,
            votes,
        }
    }
}
