//! # Data Loader Crate
//!
//! Input boundary of the catalog pipeline: reads a CSV catalog export into a
//! rectangular `RawTable` and defines the row types every later stage uses.
//!
//! ## Main Components
//!
//! - **types**: `RawTable`, `RawRow`, `CleanRow`, `ColumnMapping`
//! - **parser**: CSV reading with quote handling and bad-record skipping
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::load_csv;
//! use std::path::Path;
//!
//! let table = load_csv(Path::new("data/movies.csv"))?;
//! println!("{} columns, {} records", table.header().len(), table.len());
//! ```

pub mod error;
pub mod types;
pub mod parser;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use parser::{load_csv, parse_csv};
pub use types::{CleanRow, ColumnMapping, RawRow, RawTable};
