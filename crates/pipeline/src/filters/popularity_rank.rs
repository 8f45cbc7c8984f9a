//! Ranks the catalog by popularity and caps its size.
//!
//! The order produced here is the canonical catalog order: every later
//! tie-break and the title index depend on it.

use crate::error::Result;
use crate::traits::Stage;
use data_loader::CleanRow;

/// Sorts rows by vote count (descending) and keeps the first `max_rows`.
///
/// ## Algorithm
/// `sort_by` is stable, so rows with equal votes keep their input order.
pub struct PopularityRanker {
    max_rows: usize,
}

impl PopularityRanker {
    /// Create a new PopularityRanker.
    ///
    /// # Arguments
    /// * `max_rows` - Catalog size cap (typically 5000)
    pub fn new(max_rows: usize) -> Self {
        Self { max_rows }
    }
}

impl Stage for PopularityRanker {
    fn name(&self) -> &str {
        "PopularityRanker"
    }

    fn apply(&self, mut rows: Vec<CleanRow>) -> Result<Vec<CleanRow>> {
        rows.sort_by(|a, b| b.votes.cmp(&a.votes));
        rows.truncate(self.max_rows);
        Ok(rows)
    }
}
