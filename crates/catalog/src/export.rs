//! JSON output boundary.
//!
//! The field names of `ExportRecord` are what downstream consumers read;
//! they must not change.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;
use tracing::info;

use crate::assembler::CatalogEntry;

/// The source data has no year column; every record carries this placeholder
pub const YEAR_PLACEHOLDER: &str = "N/A";

/// One exported catalog record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub title: String,
    pub genre: String,
    pub description: String,
    pub imdb_rating: f64,
    pub weighted_rating: f64,
    pub similar_movies: Vec<String>,
    pub year: String,
}

impl From<&CatalogEntry> for ExportRecord {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            title: entry.row.title.clone(),
            genre: entry.row.genre.clone(),
            description: entry.row.description.clone(),
            imdb_rating: entry.row.rating,
            weighted_rating: entry.weighted_rating,
            similar_movies: entry.similar_titles.clone(),
            year: YEAR_PLACEHOLDER.to_string(),
        }
    }
}

/// Serialize entries as a JSON array with 4-space indentation
pub fn to_json(entries: &[CatalogEntry]) -> Result<Vec<u8>> {
    let records: Vec<ExportRecord> = entries.iter().map(ExportRecord::from).collect();

    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    records
        .serialize(&mut serializer)
        .context("Failed to serialize catalog")?;
    Ok(buf)
}

/// Write entries to `path`.
///
/// The JSON goes to a fresh temporary file in the same directory, which is
/// then persisted over `path`. `path` either keeps its previous content or
/// holds the full catalog, and no other file in the directory is touched.
pub fn write_json(path: &Path, entries: &[CatalogEntry]) -> Result<()> {
    let json = to_json(entries)?;
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp_file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    temp_file
        .write_all(&json)
        .with_context(|| format!("Failed to write {}", temp_file.path().display()))?;
    temp_file
        .persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to move output into {}", path.display()))?;

    info!("Wrote {} records to {}", entries.len(), path.display());
    Ok(())
}
