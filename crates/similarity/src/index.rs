//! Similarity index over a ranked catalog.
//!
//! ## Query
//! `top_similar(title, k)`:
//! 1. Resolve the title through the `TitleIndex` (unknown -> empty result)
//! 2. Rank every other row by similarity descending, ties by catalog position
//! 3. Skip the query row and any row carrying the same title
//! 4. Return the titles of the first `k`

use crate::error::LookupMiss;
use crate::matrix::SimilarityMatrix;
use crate::title_index::TitleIndex;
use crate::vectorizer::TfidfVectorizer;
use data_loader::CleanRow;
use std::cmp::Ordering;
use tracing::{debug, info, instrument};

/// Vectors, pairwise similarities and title lookup for one catalog.
#[derive(Debug, Clone, Default)]
pub struct SimilarityIndex {
    titles: Vec<String>,
    title_index: TitleIndex,
    matrix: SimilarityMatrix,
    vocabulary_size: usize,
}

impl SimilarityIndex {
    /// Vectorize the descriptions of `rows` and build the full matrix.
    ///
    /// Row positions in the index are positions in `rows`.
    #[instrument(skip(rows, vectorizer), fields(rows = rows.len()))]
    pub fn from_rows(rows: &[CleanRow], vectorizer: &TfidfVectorizer) -> Self {
        let descriptions: Vec<&str> = rows.iter().map(|r| r.description.as_str()).collect();
        let (vocabulary, vectors) = vectorizer.fit_transform(&descriptions);
        let matrix = SimilarityMatrix::build(&vectors);

        let titles: Vec<String> = rows.iter().map(|r| r.title.clone()).collect();
        let title_index = TitleIndex::build(titles.iter().map(String::as_str));

        info!(
            "Similarity index ready: {} rows, {} terms, {} duplicate titles",
            titles.len(),
            vocabulary.len(),
            title_index.duplicates()
        );

        Self {
            titles,
            title_index,
            matrix,
            vocabulary_size: vocabulary.len(),
        }
    }

    /// Titles of the `k` rows most similar to `title`.
    ///
    /// Never fails: an unknown title or an inconsistent index gives an empty list.
    pub fn top_similar(&self, title: &str, k: usize) -> Vec<String> {
        match self.try_top_similar(title, k) {
            Ok(similar) => similar,
            Err(miss) => {
                debug!("No similar titles: {}", miss);
                Vec::new()
            }
        }
    }

    /// Same as `top_similar`, but reports why a lookup produced nothing
    pub fn try_top_similar(&self, title: &str, k: usize) -> Result<Vec<String>, LookupMiss> {
        let position = self
            .title_index
            .get(title)
            .ok_or_else(|| LookupMiss::UnknownTitle {
                title: title.to_string(),
            })?;

        let len = self.matrix.len();
        let scores = self
            .matrix
            .row(position)
            .filter(|_| self.titles.len() == len)
            .ok_or(LookupMiss::CorruptIndex { position, len })?;

        if k == 0 {
            return Ok(Vec::new());
        }

        let mut candidates: Vec<usize> = (0..len)
            .filter(|&j| j != position && self.titles[j] != title)
            .collect();

        // Score descending, then catalog position ascending
        let by_rank = |a: &usize, b: &usize| -> Ordering {
            scores[*b]
                .total_cmp(&scores[*a])
                .then_with(|| a.cmp(b))
        };

        if candidates.len() > k {
            candidates.select_nth_unstable_by(k - 1, by_rank);
            candidates.truncate(k);
        }
        candidates.sort_unstable_by(by_rank);

        Ok(candidates
            .into_iter()
            .map(|j| self.titles[j].clone())
            .collect())
    }

    /// Similarity between two catalog positions
    pub fn similarity(&self, i: usize, j: usize) -> Option<f64> {
        self.matrix.get(i, j)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    pub fn title_index(&self) -> &TitleIndex {
        &self.title_index
    }
}
