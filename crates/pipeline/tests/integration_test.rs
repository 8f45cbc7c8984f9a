//! Integration tests for the pipeline.
//!
//! These tests verify that sanitizing, ranking and scoring work together
//! on a realistic raw table.

use data_loader::{RawTable, parse_csv};
use pipeline::filters::{MinimumVotesFilter, PopularityRanker};
use pipeline::{PipelineError, Sanitizer, StagePipeline, WeightedRatingEngine};

fn create_test_table() -> RawTable {
    let content = "\
Movie Name,Genre,Plot,Rating,Votes
Space Saga,Sci-Fi,A crew explores deep space.,8.0,\"5,000\"
Space War,Sci-Fi,A space war breaks out.,9.0,200
Courtroom,Drama,A lawyer defends a client.,7.0,\"10,000\"
Broken,Drama,Missing votes.,6.0,
Garbled,Drama,Rating is text.,great,\"3,000\"
";
    parse_csv(content, "movies.csv").unwrap()
}

#[test]
fn test_full_pipeline_filters_correctly() {
    let table = create_test_table();

    let (rows, report) = Sanitizer::new().sanitize(&table).unwrap();
    assert_eq!(report.input_rows, 5);
    assert_eq!(report.kept, 3);

    let pipeline = StagePipeline::new()
        .add_stage(MinimumVotesFilter::new(1000))
        .add_stage(PopularityRanker::new(5000));
    let ranked = pipeline.apply(rows).unwrap();

    // Space War has too few votes; the rest ranks by votes
    let titles: Vec<_> = ranked.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Courtroom", "Space Saga"]);
}

#[test]
fn test_scores_after_ranking() {
    let table = create_test_table();
    let (rows, _) = Sanitizer::new().sanitize(&table).unwrap();
    let ranked = StagePipeline::popularity(1000, 5000).apply(rows).unwrap();

    let (stats, scores) = WeightedRatingEngine::default().score(&ranked).unwrap();

    assert_eq!(stats.mean_rating, 7.5);
    assert_eq!(scores.len(), ranked.len());
    for (row, score) in ranked.iter().zip(&scores) {
        // Shrinkage toward 7.5 never overshoots the observed range
        assert!(*score >= 7.0 && *score <= 8.0, "{} -> {}", row.title, score);
    }
    // Courtroom (7.0) is pulled up, Space Saga (8.0) pulled down
    assert!(scores[0] > 7.0);
    assert!(scores[1] < 8.0);
}

#[test]
fn test_everything_filtered_is_fatal() {
    let table = create_test_table();
    let (rows, _) = Sanitizer::new().sanitize(&table).unwrap();
    let ranked = StagePipeline::popularity(1_000_000, 5000).apply(rows).unwrap();

    assert!(ranked.is_empty());
    let err = WeightedRatingEngine::default().score(&ranked).unwrap_err();
    assert!(matches!(err, PipelineError::EmptyCatalog { .. }));
}
