//! Weighted rating engine.
//!
//! Corrects raw average ratings for vote-count sparsity by shrinking each
//! rating toward the catalog mean:
//!
//! ```text
//! weighted_rating = v/(v+m) * R + m/(v+m) * C
//! ```
//!
//! - `v`: the row's vote count
//! - `R`: the row's rating
//! - `C`: mean rating over the whole ranked catalog
//! - `m`: vote count at the configured percentile (0.90) of the catalog
//!
//! `C` and `m` are computed once per run, before any row is scored.

use crate::error::{PipelineError, Result};
use data_loader::CleanRow;
use rayon::prelude::*;
use tracing::{info, instrument};

/// Catalog-wide statistics used for shrinkage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShrinkageStats {
    /// `C`: mean rating across the catalog
    pub mean_rating: f64,
    /// `m`: vote count at the configured percentile
    pub vote_floor: f64,
}

impl ShrinkageStats {
    /// Compute `C` and `m` over the given rows.
    ///
    /// Fails with `EmptyCatalog` when there are no rows.
    pub fn from_rows(rows: &[CleanRow], percentile: f64) -> Result<Self> {
        if rows.is_empty() {
            return Err(PipelineError::EmptyCatalog {
                stage: "popularity filtering".to_string(),
            });
        }

        let mean_rating = rows.iter().map(|r| r.rating).sum::<f64>() / rows.len() as f64;

        let mut votes: Vec<f64> = rows.iter().map(|r| r.votes as f64).collect();
        votes.sort_by(f64::total_cmp);
        let vote_floor = quantile(&votes, percentile);

        Ok(Self {
            mean_rating,
            vote_floor,
        })
    }

    /// Shrinkage-corrected score for a single row, unrounded.
    ///
    /// Returns `None` when `v + m == 0`: there is neither evidence nor a
    /// prior weight to combine.
    pub fn weighted(&self, votes: u64, rating: f64) -> Option<f64> {
        let v = votes as f64;
        let m = self.vote_floor;
        let total = v + m;
        if total == 0.0 {
            return None;
        }
        Some((v / total) * rating + (m / total) * self.mean_rating)
    }
}

/// Linear-interpolated quantile of an ascending slice.
///
/// Uses `pos = (n - 1) * q` and interpolates between the two closest ranks.
/// `q` is clamped to `[0, 1]`. Returns 0.0 for an empty slice.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let q = q.clamp(0.0, 1.0);
    let pos = (sorted.len() - 1) as f64 * q;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let fraction = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Round to two decimals, ties to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Computes weighted ratings for a ranked catalog.
#[derive(Debug, Clone, Copy)]
pub struct WeightedRatingEngine {
    percentile: f64,
}

impl WeightedRatingEngine {
    /// Create an engine using the given vote percentile for `m` (typically 0.90)
    pub fn new(percentile: f64) -> Self {
        Self { percentile }
    }

    /// Score every row, in input order.
    ///
    /// # Returns
    /// * `Ok((stats, scores))` - the global statistics and one rounded score per row
    /// * `Err(EmptyCatalog)` - no rows, or `v + m` is zero for every row
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub fn score(&self, rows: &[CleanRow]) -> Result<(ShrinkageStats, Vec<f64>)> {
        let stats = ShrinkageStats::from_rows(rows, self.percentile)?;

        if stats.vote_floor == 0.0 && rows.iter().all(|r| r.votes == 0) {
            return Err(PipelineError::EmptyCatalog {
                stage: "weighted rating (no votes in catalog)".to_string(),
            });
        }

        info!(
            "Shrinkage statistics: C = {:.4}, m = {:.1}",
            stats.mean_rating, stats.vote_floor
        );

        let scores = rows
            .par_iter()
            .map(|row| {
                let score = stats.weighted(row.votes, row.rating).unwrap_or(stats.mean_rating);
                round2(score)
            })
            .collect();

        Ok((stats, scores))
    }
}

impl Default for WeightedRatingEngine {
    fn default() -> Self {
        Self::new(0.90)
    }
}
