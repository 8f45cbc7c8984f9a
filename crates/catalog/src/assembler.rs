//! # Catalog Builder
//!
//! Coordinates one full pipeline run over a loaded table:
//! 1. Sanitize raw records into `CleanRow`s
//! 2. Filter by vote threshold, rank by votes, truncate
//! 3. Score weighted ratings and build the similarity index (in parallel)
//! 4. Assemble one `CatalogEntry` per ranked row, in catalog order
//!
//! Any fatal error stops the run before anything is assembled.

use std::time::Instant;

use data_loader::{CleanRow, RawTable};
use pipeline::{
    PipelineError, Result, SanitizeReport, Sanitizer, ShrinkageStats, StagePipeline,
    WeightedRatingEngine,
};
use rayon::prelude::*;
use similarity::{SimilarityIndex, TfidfVectorizer};
use tracing::{info, instrument};

use crate::config::PipelineConfig;

/// A ranked catalog row enriched with its score and similar titles
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub row: CleanRow,
    pub weighted_rating: f64,
    /// At most `top_k` titles, most similar first
    pub similar_titles: Vec<String>,
}

/// What happened during a run
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub sanitize: SanitizeReport,
    /// Rows surviving the popularity filter and cap
    pub ranked_rows: usize,
    pub stats: ShrinkageStats,
    pub vocabulary_size: usize,
    pub duplicate_titles: usize,
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct Catalog {
    pub entries: Vec<CatalogEntry>,
    pub report: BuildReport,
}

/// Runs the enrichment pipeline with a fixed configuration.
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    config: PipelineConfig,
    sanitizer: Sanitizer,
    engine: WeightedRatingEngine,
    vectorizer: TfidfVectorizer,
}

impl CatalogBuilder {
    pub fn new(config: PipelineConfig) -> Self {
        let sanitizer = Sanitizer::new()
            .with_columns(config.columns.clone())
            .with_rating_range(config.rating_range.clone());
        let engine = WeightedRatingEngine::new(config.vote_percentile);
        let vectorizer = TfidfVectorizer::new(config.max_features);

        Self {
            config,
            sanitizer,
            engine,
            vectorizer,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Build the enriched catalog from a raw table.
    ///
    /// # Returns
    /// * `Ok(catalog)` - entries in catalog order plus a run report
    /// * `Err(Schema)` - a required column is missing
    /// * `Err(EmptyCatalog)` - nothing survived sanitizing and filtering
    #[instrument(skip(self, table), fields(records = table.len()))]
    pub fn build(&self, table: &RawTable) -> Result<Catalog> {
        let start_time = Instant::now();

        let (clean, sanitize) = self.sanitizer.sanitize(table)?;
        if clean.is_empty() {
            return Err(PipelineError::EmptyCatalog {
                stage: "sanitizing".to_string(),
            });
        }

        let ranked = StagePipeline::popularity(self.config.min_votes, self.config.max_catalog_size)
            .apply(clean)?;
        if ranked.is_empty() {
            return Err(PipelineError::EmptyCatalog {
                stage: format!("popularity filtering (min votes {})", self.config.min_votes),
            });
        }
        info!(
            "Ranked catalog: {} rows (min votes {}, cap {})",
            ranked.len(),
            self.config.min_votes,
            self.config.max_catalog_size
        );

        // Scoring and vectorization only read the ranked rows
        let (scored, index) = rayon::join(
            || self.engine.score(&ranked),
            || SimilarityIndex::from_rows(&ranked, &self.vectorizer),
        );
        let (stats, scores) = scored?;

        let report = BuildReport {
            sanitize,
            ranked_rows: ranked.len(),
            stats,
            vocabulary_size: index.vocabulary_size(),
            duplicate_titles: index.title_index().duplicates(),
        };

        let entries = assemble(ranked, &scores, &index, self.config.top_k);
        info!(
            "Assembled {} catalog entries in {:.2?}",
            entries.len(),
            start_time.elapsed()
        );

        Ok(Catalog { entries, report })
    }
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

/// Join rows with their scores and similar titles, preserving row order.
///
/// `scores[i]` belongs to `rows[i]`.
pub fn assemble(
    rows: Vec<CleanRow>,
    scores: &[f64],
    index: &SimilarityIndex,
    top_k: usize,
) -> Vec<CatalogEntry> {
    rows.into_par_iter()
        .zip(scores.par_iter())
        .map(|(row, &weighted_rating)| {
            let similar_titles = index.top_similar(&row.title, top_k);
            CatalogEntry {
                row,
                weighted_rating,
                similar_titles,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: [&str; 5] = ["Movie Name", "Genre", "Plot", "Rating", "Votes"];

    fn table(rows: &[[&str; 5]]) -> RawTable {
        let mut table = RawTable::with_columns(&HEADER);
        for row in rows {
            table.push_text_record(row);
        }
        table
    }

    #[test]
    fn test_three_row_scenario() {
        let input = table(&[
            ["A", "Sci-Fi", "space adventure", "8.0", "5000"],
            ["B", "Sci-Fi", "space war adventure", "9.0", "200"],
            ["C", "Drama", "courtroom drama", "7.0", "10000"],
        ]);

        let catalog = CatalogBuilder::default().build(&input).unwrap();
        let titles: Vec<_> = catalog.entries.iter().map(|e| e.row.title.as_str()).collect();

        assert_eq!(titles, vec!["C", "A"]);
        assert_eq!(catalog.entries[0].similar_titles, vec!["A"]);
        assert_eq!(catalog.entries[1].similar_titles, vec!["C"]);
        assert_eq!(catalog.report.ranked_rows, 2);
        assert_eq!(catalog.report.stats.mean_rating, 7.5);
    }

    #[test]
    fn test_duplicate_titles_keep_their_rows() {
        let input = table(&[
            ["Heat", "Crime", "heist crew", "8.3", "9000"],
            ["Heat", "Crime", "heist crew remake", "6.0", "3000"],
            ["Ronin", "Crime", "heist crew in paris", "7.2", "5000"],
        ]);

        let catalog = CatalogBuilder::default().build(&input).unwrap();

        assert_eq!(catalog.entries.len(), 3);
        assert_eq!(catalog.report.duplicate_titles, 1);
        // Both "Heat" rows answer with the first one's neighbors
        assert_eq!(catalog.entries[0].similar_titles, vec!["Ronin"]);
        assert_eq!(catalog.entries[2].similar_titles, vec!["Ronin"]);
        assert_eq!(catalog.entries[1].similar_titles, vec!["Heat", "Heat"]);
    }

    #[test]
    fn test_empty_after_filtering_is_fatal() {
        let input = table(&[["A", "Drama", "x", "8.0", "10"]]);
        let err = CatalogBuilder::default().build(&input).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyCatalog { .. }));
    }

    #[test]
    fn test_empty_after_sanitizing_is_fatal() {
        let input = table(&[["A", "Drama", "", "8.0", "5000"]]);
        let err = CatalogBuilder::default().build(&input).unwrap_err();
        assert_eq!(
            err,
            PipelineError::EmptyCatalog {
                stage: "sanitizing".to_string()
            }
        );
    }

    #[test]
    fn test_config_is_applied() {
        let input = table(&[
            ["A", "Drama", "war story", "8.0", "50"],
            ["B", "Drama", "war epic", "7.0", "40"],
            ["C", "Drama", "war drama", "6.0", "30"],
        ]);
        let config = PipelineConfig::new()
            .with_min_votes(35)
            .with_top_k(1);

        let builder = CatalogBuilder::new(config);
        assert_eq!(builder.config().min_votes, 35);
        assert_eq!(builder.config().top_k, 1);

        let catalog = builder.build(&input).unwrap();
        assert_eq!(catalog.entries.len(), 2);
        assert!(catalog.entries.iter().all(|e| e.similar_titles.len() == 1));
    }
}
