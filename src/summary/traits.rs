// Sentence ranker trait.
//
// The analyzer only needs "give me the k most salient sentences". TF-IDF is
// the implementation today; a graph-based ranker could slot in here without
// touching the pipeline.

use serde::Serialize;

use crate::error::Result;

/// A sentence picked for the summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSentence {
    /// Position of the sentence in the source document.
    pub index: usize,
    pub text: String,
    pub score: f64,
}

/// Trait for choosing the most salient sentences of a document.
pub trait SentenceRanker {
    /// Return at most `k` sentences ordered by descending score.
    ///
    /// Fails with `InvalidArgument` when `k` is zero.
    fn rank(&self, sentences: &[String], k: usize) -> Result<Vec<RankedSentence>>;
}
