//! Cleaning, ranking and scoring of the movie catalog.
//!
//! This crate provides:
//! - Sanitizer for validating and coercing raw records
//! - Stage trait and implementations for popularity filtering and ranking
//! - StagePipeline for composing stages
//! - WeightedRatingEngine for shrinkage-corrected scores
//!
//! ## Architecture
//! The catalog is processed in stages:
//! 1. The sanitizer turns the raw table into clean rows
//! 2. Stages drop low-signal rows, rank by votes and cap the catalog size
//! 3. The weighted rating engine scores every ranked row
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{Sanitizer, StagePipeline, WeightedRatingEngine};
//!
//! let (rows, report) = Sanitizer::new().sanitize(&table)?;
//! let ranked = StagePipeline::popularity(1000, 5000).apply(rows)?;
//! let (stats, scores) = WeightedRatingEngine::new(0.90).score(&ranked)?;
//! ```

pub mod error;
pub mod traits;
pub mod filters;
pub mod stage_pipeline;
pub mod sanitizer;
pub mod weighted_rating;

// Re-export main types
pub use error::{CoercionError, PipelineError, Result};
pub use traits::Stage;
pub use stage_pipeline::StagePipeline;
pub use sanitizer::{SanitizeReport, Sanitizer};
pub use weighted_rating::{ShrinkageStats, WeightedRatingEngine};
