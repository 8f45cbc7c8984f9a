//! Filter to ensure a minimum popularity signal.
//!
//! Removes movies with too few votes; their average rating is too noisy
//! to rank or to feed the catalog-wide statistics.

use crate::error::Result;
use crate::traits::Stage;
use data_loader::CleanRow;

/// Removes rows whose vote count is below a threshold.
///
/// ## Algorithm
/// Keep a row only if `votes >= min_votes`. Relative order is preserved.
pub struct MinimumVotesFilter {
    min_votes: u64,
}

impl MinimumVotesFilter {
    /// Create a new MinimumVotesFilter.
    ///
    /// # Arguments
    /// * `min_votes` - Minimum number of votes (typically 1000)
    pub fn new(min_votes: u64) -> Self {
        Self { min_votes }
    }
}

impl Stage for MinimumVotesFilter {
    fn name(&self) -> &str {
        "MinimumVotesFilter"
    }

    fn apply(&self, rows: Vec<CleanRow>) -> Result<Vec<CleanRow>> {
        let filtered: Vec<CleanRow> = rows
            .into_iter()
            .filter(|row| row.votes >= self.min_votes)
            .collect();

        Ok(filtered)
    }
}
