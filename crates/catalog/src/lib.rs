//! # Catalog Crate
//!
//! Turns a raw movie table into the enriched catalog: popularity-ranked rows
//! with a weighted rating and the most similar titles attached.
//!
//! ## Components
//!
//! - **config**: `PipelineConfig`
//! - **assembler**: `CatalogBuilder` runs the pipeline and assembles `CatalogEntry`s
//! - **export**: JSON output with a fixed record layout
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{run, PipelineConfig};
//!
//! let summary = run(Path::new("movies.csv"), Path::new("catalog.json"), &PipelineConfig::default())?;
//! println!("{} entries", summary.entries);
//! ```

pub mod config;
pub mod assembler;
pub mod export;

use std::path::Path;

use anyhow::{Context, Result};

pub use assembler::{assemble, BuildReport, Catalog, CatalogBuilder, CatalogEntry};
pub use config::PipelineConfig;
pub use export::{to_json, write_json, ExportRecord, YEAR_PLACEHOLDER};

/// Outcome of `run`
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub input_records: usize,
    pub entries: usize,
    pub report: BuildReport,
}

/// Load `input`, build the catalog and write it to `output`.
///
/// Fails without touching `output` if loading or building fails.
pub fn run(input: &Path, output: &Path, config: &PipelineConfig) -> Result<RunSummary> {
    let table = data_loader::load_csv(input)
        .with_context(|| format!("Failed to load catalog from {}", input.display()))?;

    let catalog = CatalogBuilder::new(config.clone())
        .build(&table)
        .context("Catalog build aborted")?;

    write_json(output, &catalog.entries)?;

    Ok(RunSummary {
        input_records: table.len(),
        entries: catalog.entries.len(),
        report: catalog.report,
    })
}
