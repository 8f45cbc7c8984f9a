use data_loader::CleanRow;
use pipeline::{StagePipeline, WeightedRatingEngine};
use proptest::prelude::*;

/// Ratings on a one-decimal 1.0-10.0 scale, like the source data
fn arb_row() -> impl Strategy<Value = CleanRow> {
    (10u32..=100, 0u64..200_000).prop_map(|(tenths, votes)| {
        CleanRow::new("t", "g", "d", tenths as f64 / 10.0, votes)
    })
}

proptest! {
    #[test]
    fn weighted_rating_stays_within_observed_range(rows in prop::collection::vec(arb_row(), 1..60)) {
        prop_assume!(rows.iter().any(|r| r.votes > 0));

        let (_, scores) = WeightedRatingEngine::default().score(&rows).unwrap();
        let min = rows.iter().map(|r| r.rating).fold(f64::INFINITY, f64::min);
        let max = rows.iter().map(|r| r.rating).fold(f64::NEG_INFINITY, f64::max);

        for score in scores {
            prop_assert!(score >= 0.0);
            prop_assert!(score >= min && score <= max, "{} not in [{}, {}]", score, min, max);
        }
    }

    #[test]
    fn ranking_respects_threshold_and_order(rows in prop::collection::vec(arb_row(), 0..80)) {
        let ranked = StagePipeline::popularity(1000, 50).apply(rows.clone()).unwrap();

        prop_assert!(ranked.len() <= 50);
        prop_assert!(ranked.iter().all(|r| r.votes >= 1000));
        prop_assert!(ranked.windows(2).all(|w| w[0].votes >= w[1].votes));
    }

    #[test]
    fn scoring_is_deterministic(rows in prop::collection::vec(arb_row(), 1..40)) {
        prop_assume!(rows.iter().any(|r| r.votes > 0));

        let engine = WeightedRatingEngine::default();
        let (_, first) = engine.score(&rows).unwrap();
        let (_, second) = engine.score(&rows).unwrap();
        prop_assert_eq!(first, second);
    }
}
