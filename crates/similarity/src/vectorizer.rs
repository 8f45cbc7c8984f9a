//! TF-IDF vectorization of plot descriptions.
//!
//! ## Algorithm
//! 1. Tokenize every document (in parallel)
//! 2. Keep the `max_features` terms with the highest total corpus count,
//!    ties broken by term order
//! 3. Assign term ids in lexicographic order of the kept terms
//! 4. Weight each term as `count * idf`, with the smoothed
//!    `idf = ln((1 + n) / (1 + df)) + 1`
//! 5. L2-normalize each document vector
//!
//! A document without any kept term yields an empty (all-zero) vector.

use crate::tokenizer::Tokenizer;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, instrument};

/// Id of a term in the fitted vocabulary
pub type TermId = u32;

/// A document vector with entries sorted by term id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(TermId, f64)>,
}

impl SparseVector {
    /// Build from `(term, weight)` pairs. Entries are sorted by term id and
    /// zero weights are dropped.
    pub fn from_entries(mut entries: Vec<(TermId, f64)>) -> Self {
        entries.retain(|&(_, w)| w != 0.0);
        entries.sort_by_key(|&(term, _)| term);
        Self { entries }
    }

    pub fn entries(&self) -> &[(TermId, f64)] {
        &self.entries
    }

    /// True for the all-zero vector
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product, walking both sorted entry lists once
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a, wa) = self.entries[i];
            let (b, wb) = other.entries[j];
            match a.cmp(&b) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }
}

/// The fitted vocabulary: terms in id order and their idf weights
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    idf: Vec<f64>,
}

impl Vocabulary {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Id of a term, if it made it into the vocabulary
    pub fn id_of(&self, term: &str) -> Option<TermId> {
        self.terms
            .binary_search_by(|t| t.as_str().cmp(term))
            .ok()
            .map(|id| id as TermId)
    }

    pub fn idf(&self, id: TermId) -> Option<f64> {
        self.idf.get(id as usize).copied()
    }
}

/// Builds TF-IDF vectors over a bounded vocabulary.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    tokenizer: Tokenizer,
    max_features: usize,
}

impl TfidfVectorizer {
    /// Create a vectorizer with English stop-word removal
    pub fn new(max_features: usize) -> Self {
        Self {
            tokenizer: Tokenizer::english(),
            max_features,
        }
    }

    /// Use a different tokenizer
    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn max_features(&self) -> usize {
        self.max_features
    }

    /// Fit the vocabulary on `documents` and return one vector per document,
    /// in input order.
    #[instrument(skip(self, documents), fields(documents = documents.len()))]
    pub fn fit_transform<S>(&self, documents: &[S]) -> (Vocabulary, Vec<SparseVector>)
    where
        S: AsRef<str> + Sync,
    {
        let tokenized: Vec<Vec<String>> = documents
            .par_iter()
            .map(|doc| self.tokenizer.tokenize(doc.as_ref()))
            .collect();

        let corpus_counts = tokenized
            .par_iter()
            .fold(HashMap::new, |mut local: HashMap<&str, usize>, tokens| {
                for token in tokens {
                    *local.entry(token.as_str()).or_insert(0) += 1;
                }
                local
            })
            .reduce(HashMap::new, |mut acc, local| {
                for (term, count) in local {
                    *acc.entry(term).or_insert(0) += count;
                }
                acc
            });
        debug!("Corpus has {} distinct terms", corpus_counts.len());

        let terms = self.select_terms(corpus_counts);
        let ids: HashMap<&str, TermId> = terms
            .iter()
            .enumerate()
            .map(|(id, term)| (term.as_str(), id as TermId))
            .collect();

        // Per-document counts over the kept terms, in term-id order
        let counts: Vec<BTreeMap<TermId, usize>> = tokenized
            .par_iter()
            .map(|tokens| {
                let mut doc = BTreeMap::new();
                for token in tokens {
                    if let Some(&id) = ids.get(token.as_str()) {
                        *doc.entry(id).or_insert(0) += 1;
                    }
                }
                doc
            })
            .collect();

        let mut document_frequency = vec![0usize; terms.len()];
        for doc in &counts {
            for &id in doc.keys() {
                document_frequency[id as usize] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let vectors: Vec<SparseVector> = counts
            .into_par_iter()
            .map(|doc| {
                let mut vector = SparseVector {
                    entries: doc
                        .into_iter()
                        .map(|(id, count)| (id, count as f64 * idf[id as usize]))
                        .collect(),
                };
                vector.normalize();
                vector
            })
            .collect();

        let empty = vectors.iter().filter(|v| v.is_empty()).count();
        info!(
            "Vectorized {} documents over {} terms ({} without any term)",
            vectors.len(),
            terms.len(),
            empty
        );

        (Vocabulary { terms, idf }, vectors)
    }

    /// Top `max_features` terms by corpus count, returned in lexicographic order
    fn select_terms(&self, corpus_counts: HashMap<&str, usize>) -> Vec<String> {
        let mut ranked: Vec<(&str, usize)> = corpus_counts.into_iter().collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(t, _)| t.to_string()).collect();
        terms.sort_unstable();
        terms
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new(5000)
    }
}
