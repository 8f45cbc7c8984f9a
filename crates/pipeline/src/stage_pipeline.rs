//! The StagePipeline orchestrates multiple stages.
//!
//! This module provides the StagePipeline struct that chains
//! stages together using the builder pattern.

use crate::error::Result;
use crate::filters::{MinimumVotesFilter, PopularityRanker};
use crate::traits::Stage;
use data_loader::CleanRow;
use tracing;

/// Chains multiple stages together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = StagePipeline::new()
///     .add_stage(MinimumVotesFilter::new(1000))
///     .add_stage(PopularityRanker::new(5000));
///
/// let ranked = pipeline.apply(clean_rows)?;
/// ```
pub struct StagePipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl StagePipeline {
    /// Create a new empty StagePipeline.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// The standard popularity ranking: vote threshold, then rank and truncate.
    pub fn popularity(min_votes: u64, max_rows: usize) -> Self {
        Self::new()
            .add_stage(MinimumVotesFilter::new(min_votes))
            .add_stage(PopularityRanker::new(max_rows))
    }

    /// Add a stage to the pipeline (builder pattern).
    pub fn add_stage(mut self, stage: impl Stage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Apply all stages in sequence.
    ///
    /// Stops at the first stage that fails.
    pub fn apply(&self, rows: Vec<CleanRow>) -> Result<Vec<CleanRow>> {
        let mut current = rows;
        for stage in &self.stages {
            tracing::debug!(
                "Applying stage: {} (input count: {})",
                stage.name(),
                current.len()
            );
            current = stage.apply(current)?;
            tracing::debug!(
                "Stage applied: {} (output count: {})",
                stage.name(),
                current.len()
            );
        }
        Ok(current)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Default for StagePipeline {
    fn default() -> Self {
        Self::new()
    }
}
