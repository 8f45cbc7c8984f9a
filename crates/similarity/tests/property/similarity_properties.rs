use data_loader::CleanRow;
use proptest::prelude::*;
use similarity::{SimilarityIndex, SimilarityMatrix, TfidfVectorizer};

const WORDS: &[&str] = &[
    "space", "heist", "war", "love", "robot", "ghost", "the", "of", "a", "city", "spy", "race",
];

/// Descriptions drawn from a small vocabulary (stop words included), possibly empty
fn arb_description() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 0..6).prop_map(|words| words.join(" "))
}

/// Rows with titles from a small pool so duplicates occur
fn arb_rows() -> impl Strategy<Value = Vec<CleanRow>> {
    prop::collection::vec((0u8..12, arb_description()), 1..25).prop_map(|rows| {
        rows.into_iter()
            .map(|(t, desc)| CleanRow::new(format!("Title {t}"), "Drama", desc, 7.0, 5000))
            .collect()
    })
}

proptest! {
    #[test]
    fn matrix_is_symmetric_bounded_with_maximal_diagonal(
        docs in prop::collection::vec(arb_description(), 0..30)
    ) {
        let (_, vectors) = TfidfVectorizer::default().fit_transform(&docs);
        let m = SimilarityMatrix::build(&vectors);
        prop_assert_eq!(m.len(), docs.len());

        for i in 0..m.len() {
            let diagonal = m.get(i, i).unwrap();
            for j in 0..m.len() {
                let s = m.get(i, j).unwrap();
                prop_assert!((0.0..=1.0).contains(&s));
                prop_assert_eq!(s, m.get(j, i).unwrap());
                prop_assert!(s <= diagonal || vectors[i].is_empty());
            }
        }
    }

    #[test]
    fn top_similar_contract(rows in arb_rows(), k in 0usize..8) {
        let index = SimilarityIndex::from_rows(&rows, &TfidfVectorizer::default());

        for row in &rows {
            let similar = index.top_similar(&row.title, k);
            let others = rows.iter().filter(|r| r.title != row.title).count();

            prop_assert!(!similar.contains(&row.title));
            prop_assert_eq!(similar.len(), k.min(others));
        }
    }

    #[test]
    fn top_similar_is_ranked(docs in prop::collection::vec(arb_description(), 1..25)) {
        let rows: Vec<CleanRow> = docs
            .iter()
            .enumerate()
            .map(|(i, desc)| CleanRow::new(format!("Title {i}"), "Drama", desc.as_str(), 7.0, 5000))
            .collect();
        let index = SimilarityIndex::from_rows(&rows, &TfidfVectorizer::default());
        let similar = index.top_similar("Title 0", rows.len());
        prop_assert_eq!(similar.len(), rows.len() - 1);

        // Score descending, then catalog position ascending
        let ranked: Vec<(f64, usize)> = similar
            .iter()
            .map(|title| {
                let j = index.title_index().get(title).unwrap();
                (index.similarity(0, j).unwrap(), j)
            })
            .collect();
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].0 > pair[1].0 || (pair[0].0 == pair[1].0 && pair[0].1 < pair[1].1));
        }
    }

    #[test]
    fn unknown_title_is_empty(rows in arb_rows()) {
        let index = SimilarityIndex::from_rows(&rows, &TfidfVectorizer::default());
        prop_assert!(index.top_similar("Not A Title", 5).is_empty());
    }

    #[test]
    fn build_is_deterministic(rows in arb_rows()) {
        let vectorizer = TfidfVectorizer::default();
        let first = SimilarityIndex::from_rows(&rows, &vectorizer);
        let second = SimilarityIndex::from_rows(&rows, &vectorizer);

        for row in &rows {
            prop_assert_eq!(first.top_similar(&row.title, 5), second.top_similar(&row.title, 5));
        }
    }
}
