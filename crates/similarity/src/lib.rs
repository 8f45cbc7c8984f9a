//! # Similarity Crate
//!
//! Content-based similarity between catalog entries, computed from their
//! plot descriptions.
//!
//! ## Components
//!
//! - **tokenizer**: lowercasing, word splitting, English stop words
//! - **vectorizer**: TF-IDF over a bounded vocabulary
//! - **matrix**: dense pairwise cosine similarity, built in parallel
//! - **title_index**: title to catalog position, first occurrence wins
//! - **index**: `SimilarityIndex` and the `top_similar` query
//!
//! ## Example Usage
//!
//! ```ignore
//! use similarity::{SimilarityIndex, TfidfVectorizer};
//!
//! let index = SimilarityIndex::from_rows(&ranked_rows, &TfidfVectorizer::new(5000));
//! let similar = index.top_similar("The Dark Knight", 5);
//! ```

pub mod error;
pub mod tokenizer;
pub mod vectorizer;
pub mod matrix;
pub mod title_index;
pub mod index;

pub use error::LookupMiss;
pub use index::SimilarityIndex;
pub use matrix::SimilarityMatrix;
pub use title_index::TitleIndex;
pub use tokenizer::{Tokenizer, ENGLISH_STOP_WORDS};
pub use vectorizer::{SparseVector, TermId, TfidfVectorizer, Vocabulary};
