//! Dense pairwise cosine similarity matrix.
//!
//! Vectors come in L2-normalized, so cosine similarity is the dot product.
//! Each row is accumulated through an inverted index (term -> postings), so
//! only documents sharing at least one term are touched. Rows are built in
//! parallel, one rayon task per row.
//!
//! Shared terms are always visited in ascending term-id order, which makes
//! `get(i, j)` and `get(j, i)` the same sum of the same products in the same
//! order: the matrix is exactly symmetric.
//!
//! Scores are kept in `f64` (8 bytes per cell, 200 MB at 5000 rows) so that
//! neighbours whose scores differ only past `f32` precision still rank by
//! score and not by catalog position.

use crate::vectorizer::SparseVector;
use rayon::prelude::*;
use tracing::{info, instrument};

/// N x N similarity scores in row-major order
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    n: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Compute all pairwise similarities.
    ///
    /// Entries are clamped to `[0, 1]`. The diagonal is 1.0 for every
    /// non-empty vector and 0.0 for an all-zero one.
    #[instrument(skip(vectors), fields(rows = vectors.len()))]
    pub fn build(vectors: &[SparseVector]) -> Self {
        let n = vectors.len();
        if n == 0 {
            return Self::default();
        }

        let postings = inverted_index(vectors);
        let mut values = vec![0f64; n * n];

        values
            .par_chunks_mut(n)
            .enumerate()
            .for_each_init(
                || vec![0f64; n],
                |scratch, (i, row)| {
                    for &(term, weight) in vectors[i].entries() {
                        for &(j, other) in &postings[term as usize] {
                            scratch[j] += weight * other;
                        }
                    }
                    for (cell, acc) in row.iter_mut().zip(scratch.iter_mut()) {
                        *cell = acc.clamp(0.0, 1.0);
                        *acc = 0.0;
                    }
                    row[i] = if vectors[i].is_empty() { 0.0 } else { 1.0 };
                },
            );

        info!("Built {}x{} similarity matrix", n, n);
        Self { n, values }
    }

    /// Number of rows (and columns)
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.n && j < self.n {
            Some(self.values[i * self.n + j])
        } else {
            None
        }
    }

    /// All similarities of row `i`, indexed by column
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i < self.n {
            Some(&self.values[i * self.n..(i + 1) * self.n])
        } else {
            None
        }
    }
}

/// Postings per term id: `(document, weight)` in ascending document order
fn inverted_index(vectors: &[SparseVector]) -> Vec<Vec<(usize, f64)>> {
    let terms = vectors
        .iter()
        .filter_map(|v| v.entries().last().map(|&(term, _)| term as usize + 1))
        .max()
        .unwrap_or(0);

    let mut postings = vec![Vec::new(); terms];
    for (doc, vector) in vectors.iter().enumerate() {
        for &(term, weight) in vector.entries() {
            postings[term as usize].push((doc, weight));
        }
    }
    postings
}
