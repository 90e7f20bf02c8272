// TF-IDF sentence ranking.
//
// Each sentence is its own "document" for IDF purposes: a term that shows up
// in every sentence gets the minimum weight, while a term concentrated in a
// few sentences gets boosted. A sentence's score is the plain sum of its term
// weights. Without normalization longer sentences with many distinctive terms
// win; Normalization::L2 divides by the vector length instead.

use std::collections::BTreeMap;
use std::str::FromStr;

use tracing::{debug, info};

use super::traits::{RankedSentence, SentenceRanker};
use crate::error::{AnalysisError, Result};
use crate::text::tokenize::{tokenize, StopWords, DEFAULT_MIN_TOKEN_LEN};

/// How a sentence's term vector is reduced to a single score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Normalization {
    /// Raw sum of weights.
    #[default]
    Raw,
    /// Sum of weights after scaling the vector to unit L2 length.
    L2,
}

impl FromStr for Normalization {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "raw" => Ok(Self::Raw),
            "l2" => Ok(Self::L2),
            other => Err(AnalysisError::InvalidArgument(format!(
                "unknown normalization '{other}' (expected 'none' or 'l2')"
            ))),
        }
    }
}

/// Smoothed inverse document frequency: `ln((1 + n) / (1 + df)) + 1`.
///
/// The +1 inside the ratio acts as if one extra sentence contained every
/// term; the trailing +1 keeps terms found in every sentence from vanishing.
pub fn smoothed_idf(n: usize, df: usize) -> f64 {
    ((1.0 + n as f64) / (1.0 + df as f64)).ln() + 1.0
}

/// Sparse (sentence, term) -> tf * idf weights for one document.
///
/// Rows use ordered maps so score sums are bit-for-bit reproducible.
#[derive(Debug, Clone, Default)]
pub struct TermWeightMatrix {
    rows: Vec<BTreeMap<String, f64>>,
    idf: BTreeMap<String, f64>,
}

impl TermWeightMatrix {
    pub fn build(sentences: &[String], stopwords: &StopWords, min_token_len: usize) -> Self {
        let counts: Vec<BTreeMap<String, u32>> = sentences
            .iter()
            .map(|sentence| {
                let mut tf = BTreeMap::new();
                for token in tokenize(sentence, min_token_len).filter(|t| !stopwords.contains(t)) {
                    *tf.entry(token).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        let mut df: BTreeMap<&str, usize> = BTreeMap::new();
        for tf in &counts {
            for term in tf.keys() {
                *df.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let n = sentences.len();
        let idf: BTreeMap<String, f64> = df
            .into_iter()
            .map(|(term, df)| (term.to_string(), smoothed_idf(n, df)))
            .collect();

        let rows = counts
            .iter()
            .map(|tf| {
                tf.iter()
                    .map(|(term, &count)| (term.clone(), f64::from(count) * idf[term]))
                    .collect()
            })
            .collect();

        Self { rows, idf }
    }

    /// Weight of `term` in sentence `sentence`; zero when absent.
    pub fn weight(&self, sentence: usize, term: &str) -> f64 {
        self.rows
            .get(sentence)
            .and_then(|row| row.get(&term.to_lowercase()))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.idf.get(&term.to_lowercase()).copied()
    }

    /// All non-stop-word terms, in lexical order.
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.idf.keys().map(String::as_str)
    }

    pub fn row(&self, sentence: usize) -> Option<&BTreeMap<String, f64>> {
        self.rows.get(sentence)
    }

    pub fn sentence_count(&self) -> usize {
        self.rows.len()
    }

    /// One score per sentence, in sentence order.
    pub fn scores(&self, normalization: Normalization) -> Vec<f64> {
        self.rows
            .iter()
            .map(|row| {
                let sum: f64 = row.values().sum();
                match normalization {
                    Normalization::Raw => sum,
                    Normalization::L2 => {
                        let norm = row.values().map(|w| w * w).sum::<f64>().sqrt();
                        if norm > 0.0 {
                            sum / norm
                        } else {
                            0.0
                        }
                    }
                }
            })
            .collect()
    }
}

/// Rank `sentences` and return the top `k` verbatim, highest score first.
///
/// Equal scores keep their document order. Uses raw summed weights and the
/// default token length.
pub fn rank(sentences: &[String], k: usize, stopwords: &StopWords) -> Result<Vec<String>> {
    let ranked = rank_sentences(
        sentences,
        k,
        stopwords,
        Normalization::Raw,
        DEFAULT_MIN_TOKEN_LEN,
    )?;
    Ok(ranked.into_iter().map(|r| r.text).collect())
}

fn rank_sentences(
    sentences: &[String],
    k: usize,
    stopwords: &StopWords,
    normalization: Normalization,
    min_token_len: usize,
) -> Result<Vec<RankedSentence>> {
    if k == 0 {
        return Err(AnalysisError::InvalidArgument(
            "summary length must be at least 1".to_string(),
        ));
    }

    let matrix = TermWeightMatrix::build(sentences, stopwords, min_token_len);
    let scores = matrix.scores(normalization);

    let mut order: Vec<usize> = (0..sentences.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));

    let ranked: Vec<RankedSentence> = order
        .into_iter()
        .take(k)
        .map(|index| RankedSentence {
            index,
            text: sentences[index].clone(),
            score: scores[index],
        })
        .collect();

    for r in &ranked {
        debug!(index = r.index, score = r.score, "Ranked sentence");
    }

    Ok(ranked)
}

/// TF-IDF ranker with its stop words and scoring knobs.
#[derive(Debug, Clone)]
pub struct TfIdfRanker {
    pub stopwords: StopWords,
    pub normalization: Normalization,
    pub min_token_len: usize,
}

impl Default for TfIdfRanker {
    fn default() -> Self {
        Self::new(StopWords::english())
    }
}

impl TfIdfRanker {
    pub fn new(stopwords: StopWords) -> Self {
        Self {
            stopwords,
            normalization: Normalization::Raw,
            min_token_len: DEFAULT_MIN_TOKEN_LEN,
        }
    }

    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    pub fn with_min_token_len(mut self, min_token_len: usize) -> Self {
        self.min_token_len = min_token_len;
        self
    }
}

impl SentenceRanker for TfIdfRanker {
    fn rank(&self, sentences: &[String], k: usize) -> Result<Vec<RankedSentence>> {
        let ranked = rank_sentences(
            sentences,
            k,
            &self.stopwords,
            self.normalization,
            self.min_token_len,
        )?;

        if let Some(top) = ranked.first() {
            info!(
                sentences = sentences.len(),
                selected = ranked.len(),
                top_index = top.index,
                top_score = top.score,
                "Ranked sentences by TF-IDF"
            );
        }

        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(sentences: &[&str]) -> Vec<String> {
        sentences.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn smoothed_idf_matches_formula() {
        assert!((smoothed_idf(2, 2) - 1.0).abs() < 1e-12);
        assert!((smoothed_idf(2, 1) - (1.5f64.ln() + 1.0)).abs() < 1e-12);
        assert!((smoothed_idf(9, 1) - (5.0f64.ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn matrix_weights_are_tf_times_idf() {
        let sentences = owned(&["alpha alpha beta", "alpha"]);
        let matrix = TermWeightMatrix::build(&sentences, &StopWords::none(), 2);

        assert_eq!(matrix.sentence_count(), 2);
        assert!((matrix.weight(0, "alpha") - 2.0).abs() < 1e-12);
        assert!((matrix.weight(0, "beta") - (1.5f64.ln() + 1.0)).abs() < 1e-12);
        assert_eq!(matrix.weight(1, "beta"), 0.0);
        assert_eq!(matrix.weight(7, "alpha"), 0.0);

        let scores = matrix.scores(Normalization::Raw);
        assert!((scores[0] - (3.0 + 1.5f64.ln() + 1.0)).abs() < 1e-12);
        assert!((scores[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn stop_words_never_enter_the_vocabulary() {
        let sentences = owned(&["The tenant shall pay", "The landlord shall repair"]);
        let stop = StopWords::from_words(["the", "shall"]);
        let matrix = TermWeightMatrix::build(&sentences, &stop, 2);

        let vocab: Vec<&str> = matrix.vocabulary().collect();
        assert_eq!(vocab, vec!["landlord", "pay", "repair", "tenant"]);
        assert!(matrix.idf("the").is_none());
        assert_eq!(matrix.weight(0, "shall"), 0.0);
    }

    #[test]
    fn l2_normalization_favours_varied_vocabulary() {
        let sentences = owned(&["alpha alpha alpha alpha alpha", "beta gamma"]);
        let matrix = TermWeightMatrix::build(&sentences, &StopWords::none(), 2);

        let raw = matrix.scores(Normalization::Raw);
        let l2 = matrix.scores(Normalization::L2);
        assert!(raw[0] > raw[1]);
        assert!(l2[1] > l2[0]);
        assert!((l2[0] - 1.0).abs() < 1e-12);
        assert!((l2[1] - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn rank_orders_by_descending_score() {
        let sentences = owned(&[
            "Rent is due.",
            "The tenant must maintain insurance covering fire, flood and theft.",
            "Rent is late.",
        ]);
        let ranked = rank(&sentences, 2, &StopWords::from_words(["is", "the"])).unwrap();
        assert_eq!(ranked[0], sentences[1]);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn ties_keep_document_order() {
        let sentences = owned(&["alpha beta", "gamma delta", "epsilon zeta"]);
        let ranked = rank(&sentences, 3, &StopWords::none()).unwrap();
        assert_eq!(ranked, sentences);
    }

    #[test]
    fn all_stop_word_sentences_degenerate_to_document_order() {
        let sentences = owned(&["the of and", "and the", "of"]);
        let ranker = TfIdfRanker::new(StopWords::from_words(["the", "of", "and"]));
        let ranked = ranker.rank(&sentences, 2).unwrap();

        assert_eq!(ranked.iter().map(|r| r.index).collect::<Vec<_>>(), vec![0, 1]);
        assert!(ranked.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn zero_k_is_invalid() {
        let err = rank(&owned(&["One."]), 0, &StopWords::none()).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidArgument(_)));
    }

    #[test]
    fn no_sentences_yields_empty() {
        assert!(rank(&[], 5, &StopWords::none()).unwrap().is_empty());
    }

    #[test]
    fn ranker_reports_indices_and_scores() {
        let sentences = owned(&["short", "much longer distinctive sentence"]);
        let ranker = TfIdfRanker::new(StopWords::none()).with_normalization(Normalization::Raw);
        let ranked = ranker.rank(&sentences, 5).unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].index, 1);
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn normalization_parses_from_config_strings() {
        assert_eq!("L2".parse::<Normalization>().unwrap(), Normalization::L2);
        assert_eq!("none".parse::<Normalization>().unwrap(), Normalization::Raw);
        assert!("cosine".parse::<Normalization>().is_err());
    }
}
