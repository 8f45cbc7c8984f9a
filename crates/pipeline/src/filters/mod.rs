//! Stage implementations for the ranking pipeline.
//!
//! This module contains the concrete stages that can be composed
//! into a StagePipeline.

pub mod minimum_votes;
pub mod popularity_rank;

// Re-export for convenience
pub use minimum_votes::MinimumVotesFilter;
pub use popularity_rank::PopularityRanker;
