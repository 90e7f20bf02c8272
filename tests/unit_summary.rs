// Property tests for sentence ranking.
//
// Sentences are drawn from a small legal vocabulary (with some stop words
// mixed in) so term frequencies collide and ties actually happen.

use proptest::prelude::*;

use quill::summary::tfidf::{rank, Normalization, TfIdfRanker};
use quill::summary::traits::SentenceRanker;
use quill::text::tokenize::StopWords;
use quill::AnalysisError;

fn arb_sentence() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop::sample::select(vec![
            "tenant", "landlord", "rent", "shall", "pay", "the", "of", "premises", "notice",
            "repair", "deposit", "and",
        ]),
        1..8,
    )
    .prop_map(|words| format!("{}.", words.join(" ")))
}

fn arb_sentences() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(arb_sentence(), 0..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn length_is_min_of_k_and_sentence_count(sentences in arb_sentences(), k in 1usize..15) {
        let ranked = rank(&sentences, k, &StopWords::english()).unwrap();
        prop_assert_eq!(ranked.len(), k.min(sentences.len()));
    }

    #[test]
    fn ranking_is_deterministic(sentences in arb_sentences(), k in 1usize..15) {
        let stop = StopWords::english();
        let first = rank(&sentences, k, &stop).unwrap();
        let second = rank(&sentences, k, &stop).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_result_is_a_verbatim_input(sentences in arb_sentences(), k in 1usize..15) {
        let ranked = rank(&sentences, k, &StopWords::english()).unwrap();
        for sentence in &ranked {
            prop_assert!(sentences.contains(sentence));
        }
    }

    #[test]
    fn large_k_returns_each_sentence_once(sentences in arb_sentences()) {
        let k = sentences.len() + 3;
        let ranker = TfIdfRanker::new(StopWords::english());
        let ranked = ranker.rank(&sentences, k).unwrap();

        let mut indices: Vec<usize> = ranked.iter().map(|r| r.index).collect();
        indices.sort_unstable();
        prop_assert_eq!(indices, (0..sentences.len()).collect::<Vec<_>>());
    }

    #[test]
    fn scores_are_non_increasing_and_ties_keep_order(
        sentences in arb_sentences(),
        l2 in any::<bool>(),
    ) {
        let normalization = if l2 { Normalization::L2 } else { Normalization::Raw };
        let ranker = TfIdfRanker::new(StopWords::english()).with_normalization(normalization);
        let ranked = ranker.rank(&sentences, sentences.len().max(1)).unwrap();

        for pair in ranked.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].index < pair[1].index);
            }
        }
    }
}

#[test]
fn zero_k_fails_with_invalid_argument() {
    let sentences = vec!["The tenant shall pay rent.".to_string()];
    let err = rank(&sentences, 0, &StopWords::english()).unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidArgument(_)));
}

#[test]
fn distinctive_sentence_outranks_boilerplate() {
    let sentences: Vec<String> = [
        "The tenant shall pay rent.",
        "The tenant shall pay rent.",
        "Indemnification obligations survive termination, assignment, and insolvency proceedings.",
        "The tenant shall pay rent.",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let ranked = rank(&sentences, 1, &StopWords::english()).unwrap();
    assert_eq!(ranked, vec![sentences[2].clone()]);
}
