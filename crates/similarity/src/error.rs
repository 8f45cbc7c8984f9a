//! Error types for similarity lookups.
//!
//! Nothing in here is fatal. A `LookupMiss` is absorbed at the query
//! boundary and turned into an empty result.

use thiserror::Error;

/// Why a similarity query produced no result
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupMiss {
    /// The title is not part of the indexed catalog
    #[error("Title not in catalog: {title:?}")]
    UnknownTitle { title: String },

    /// The title index points outside the similarity matrix
    #[error("Index position {position} out of bounds for {len} rows")]
    CorruptIndex { position: usize, len: usize },
}
