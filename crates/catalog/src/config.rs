//! Run configuration for catalog building.

use data_loader::ColumnMapping;
use std::ops::RangeInclusive;

/// Tunables of one pipeline run. `Default` carries the production values.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Rows with fewer votes are dropped before ranking
    pub min_votes: u64,
    /// Ranked catalog is truncated to this many rows
    pub max_catalog_size: usize,
    /// Vote percentile used as the shrinkage weight `m`
    pub vote_percentile: f64,
    /// Vocabulary bound for description vectors
    pub max_features: usize,
    /// Similar titles attached to each entry
    pub top_k: usize,
    pub columns: ColumnMapping,
    pub rating_range: RangeInclusive<f64>,
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self {
            min_votes: 1000,
            max_catalog_size: 5000,
            vote_percentile: 0.90,
            max_features: 5000,
            top_k: 5,
            columns: ColumnMapping::default(),
            rating_range: 0.0..=10.0,
        }
    }

    /// Configure the vote threshold (default: 1000)
    pub fn with_min_votes(mut self, min_votes: u64) -> Self {
        self.min_votes = min_votes;
        self
    }

    /// Configure the catalog size cap (default: 5000)
    pub fn with_max_catalog_size(mut self, size: usize) -> Self {
        self.max_catalog_size = size;
        self
    }

    /// Configure the vote percentile for `m` (default: 0.90)
    pub fn with_vote_percentile(mut self, percentile: f64) -> Self {
        self.vote_percentile = percentile;
        self
    }

    /// Configure the vocabulary bound (default: 5000)
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Configure the number of similar titles per entry (default: 5)
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_columns(mut self, columns: ColumnMapping) -> Self {
        self.columns = columns;
        self
    }

    /// Configure the plausible rating range (default: 0.0..=10.0)
    pub fn with_rating_range(mut self, range: RangeInclusive<f64>) -> Self {
        self.rating_range = range;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.min_votes, 1000);
        assert_eq!(config.max_catalog_size, 5000);
        assert_eq!(config.vote_percentile, 0.90);
        assert_eq!(config.max_features, 5000);
        assert_eq!(config.top_k, 5);
        assert_eq!(config.columns.title, "Movie Name");
    }

    #[test]
    fn test_builder() {
        let config = PipelineConfig::new().with_min_votes(10).with_top_k(3);
        assert_eq!(config.min_votes, 10);
        assert_eq!(config.top_k, 3);
        assert_eq!(config.max_features, 5000);
    }
}
