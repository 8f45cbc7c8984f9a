//! Core traits for the ranking pipeline.
//!
//! This module defines the Stage trait that allows composable
//! row-set transformations (filters, sorts, truncations).

use crate::error::Result;
use data_loader::CleanRow;

/// A single step applied to the cleaned catalog.
///
/// ## Design Note
/// - `Send + Sync` allows stages to be shared across threads
/// - Stages take ownership of the rows and return the transformed set,
///   so no earlier stage ever observes a later stage's changes
pub trait Stage: Send + Sync {
    /// Returns the name of this stage (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this stage to a set of rows.
    ///
    /// # Returns
    /// * `Ok(Vec<CleanRow>)` - The transformed rows
    /// * `Err` - If the stage cannot produce a valid row set
    fn apply(&self, rows: Vec<CleanRow>) -> Result<Vec<CleanRow>>;
}
